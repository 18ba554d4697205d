//! Shared types for the device authorization grant flow

use serde::{Deserialize, Serialize};

/// User agent sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = "qt-oauth2/1.0";

/// Grant type identifier for the device flow token exchange unless overridden
pub const DEFAULT_DEVICE_GRANT_TYPE: &str = "http://oauth.net/grant_type/device/1.0";

/// Device flow configuration
///
/// Endpoints and client credentials for one OAuth provider. Held by the
/// [`DeviceFlowClient`](crate::device::DeviceFlowClient) and read-only while
/// requests are in flight.
#[derive(Debug, Clone)]
pub struct DeviceFlowConfig {
    /// OAuth client identifier
    pub client_id: String,

    /// OAuth client secret (confidential clients)
    pub client_secret: String,

    /// Space-separated scopes requested in step 1
    pub scope: String,

    /// Endpoint returning the device/user code pair
    pub user_code_url: String,

    /// Endpoint exchanging device codes and refresh tokens for access tokens
    pub token_url: String,

    /// Grant type identifier sent with the device code exchange
    pub grant_type: String,

    /// User agent header value
    pub user_agent: String,
}

impl DeviceFlowConfig {
    /// Create a configuration with the default grant type and user agent
    pub fn new(
        user_code_url: impl Into<String>,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: scope.into(),
            user_code_url: user_code_url.into(),
            token_url: token_url.into(),
            grant_type: DEFAULT_DEVICE_GRANT_TYPE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Device/user code pair returned by the user code endpoint
///
/// Missing fields deserialize to empty strings / zero; an all-empty grant is
/// what a provider answering `{}` produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCodeGrant {
    /// Opaque code exchanged for a token once the user approves
    #[serde(default)]
    pub device_code: String,

    /// Short code the user enters at the verification URL
    #[serde(default)]
    pub user_code: String,

    /// URL where the user enters the code
    #[serde(default)]
    pub verification_url: String,

    /// Seconds until the device code expires
    #[serde(default)]
    pub expires_in: u64,

    /// Minimum seconds between token poll requests
    #[serde(default)]
    pub interval: u64,
}

/// Access token issued by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    /// Bearer credential for API requests
    #[serde(default)]
    pub access_token: String,

    /// Token type (usually "Bearer")
    #[serde(default)]
    pub token_type: String,

    /// Seconds until the access token expires
    #[serde(default)]
    pub expires_in: u64,

    /// Refresh token; empty when the provider did not issue one
    #[serde(default)]
    pub refresh_token: String,
}

/// Structured OAuth error returned by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthError {
    /// Error code from the `error` field
    pub error: String,

    /// Human-readable description; empty when the provider sent none
    #[serde(default)]
    pub error_description: String,
}

impl OAuthError {
    /// The user has not approved the device code yet; poll again after the
    /// advertised interval.
    pub fn is_authorization_pending(&self) -> bool {
        self.error == "authorization_pending"
    }

    /// The provider asked for a longer pause between polls.
    pub fn is_slow_down(&self) -> bool {
        self.error == "slow_down"
    }
}

/// Outcome of a token or refresh request
///
/// Exactly one of the two variants is produced per request. A provider
/// answer carrying an `error` key is always [`TokenOutcome::Error`], even if
/// token fields are present alongside it.
#[derive(Debug, Clone)]
pub enum TokenOutcome {
    /// Provider issued an access token
    Granted(TokenGrant),

    /// Provider answered with a structured OAuth error
    /// (e.g. `authorization_pending` while the user has not approved yet)
    Error(OAuthError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_code_grant_deserialization() {
        let json = r#"{
            "device_code": "D1",
            "user_code": "U1",
            "verification_url": "https://x/verify",
            "expires_in": 1800,
            "interval": 5
        }"#;

        let grant: UserCodeGrant = serde_json::from_str(json).unwrap();
        assert_eq!(grant.device_code, "D1");
        assert_eq!(grant.user_code, "U1");
        assert_eq!(grant.verification_url, "https://x/verify");
        assert_eq!(grant.expires_in, 1800);
        assert_eq!(grant.interval, 5);
    }

    #[test]
    fn test_user_code_grant_missing_fields_default() {
        let grant: UserCodeGrant = serde_json::from_str("{}").unwrap();
        assert_eq!(grant.device_code, "");
        assert_eq!(grant.user_code, "");
        assert_eq!(grant.verification_url, "");
        assert_eq!(grant.expires_in, 0);
        assert_eq!(grant.interval, 0);
    }

    #[test]
    fn test_token_grant_deserialization_minimal() {
        let json = r#"{
            "access_token": "test_access"
        }"#;

        let grant: TokenGrant = serde_json::from_str(json).unwrap();
        assert_eq!(grant.access_token, "test_access");
        assert_eq!(grant.token_type, ""); // default
        assert_eq!(grant.expires_in, 0);
        assert_eq!(grant.refresh_token, "");
    }

    #[test]
    fn test_oauth_error_helpers() {
        let pending = OAuthError {
            error: "authorization_pending".to_string(),
            error_description: String::new(),
        };
        assert!(pending.is_authorization_pending());
        assert!(!pending.is_slow_down());

        let denied = OAuthError {
            error: "access_denied".to_string(),
            error_description: "user refused".to_string(),
        };
        assert!(!denied.is_authorization_pending());
        assert!(!denied.is_slow_down());
    }

    #[test]
    fn test_config_defaults() {
        let config = DeviceFlowConfig::new(
            "https://example.com/device/code",
            "https://example.com/token",
            "client",
            "secret",
            "email",
        );

        assert_eq!(config.grant_type, DEFAULT_DEVICE_GRANT_TYPE);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
