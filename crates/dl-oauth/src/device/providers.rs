//! Provider endpoint presets
//!
//! A preset only supplies endpoint URLs; the flow itself is identical for
//! every provider.

use super::client::DeviceFlowClient;
use super::types::DeviceFlowConfig;

const GOOGLE_USER_CODE_URL: &str = "https://accounts.google.com/o/oauth2/device/code";
const GOOGLE_TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";

impl DeviceFlowClient {
    /// Client preconfigured for Google's device flow endpoints
    pub fn google(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self::new(DeviceFlowConfig::new(
            GOOGLE_USER_CODE_URL,
            GOOGLE_TOKEN_URL,
            client_id,
            client_secret,
            scope,
        ))
    }
}
