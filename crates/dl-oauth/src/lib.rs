//! OAuth 2.0 device authorization grant client for DeviceLink

pub mod device;

// Re-export device flow public API
pub use device::{
    DeviceFlowClient, DeviceFlowConfig, OAuthError, TokenGrant, TokenOutcome, UserCodeGrant,
    DEFAULT_DEVICE_GRANT_TYPE, DEFAULT_USER_AGENT,
};
