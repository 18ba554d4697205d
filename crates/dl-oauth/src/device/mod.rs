//! OAuth 2.0 device authorization grant flow
//!
//! Client side of the device grant: authorize an application on an
//! input-constrained device by showing the user a short code to enter on a
//! secondary device.
//!
//! # Features
//! - User code retrieval (step 1 of the grant)
//! - Device code → access token exchange (step 2)
//! - Access token refresh (step 3)
//! - Structured OAuth error surface for the caller's polling policy
//! - Provider endpoint presets (Google)
//!
//! The polling cadence is the caller's responsibility: re-invoke
//! [`DeviceFlowClient::request_access_token`] every [`UserCodeGrant::interval`]
//! seconds until the provider stops answering `authorization_pending`, the
//! grant expires, or a token arrives.
//!
//! # Usage Example
//! ```no_run
//! use dl_oauth::device::{DeviceFlowClient, TokenOutcome};
//!
//! # async fn run() -> dl_types::AppResult<()> {
//! let client = DeviceFlowClient::google("my-client-id", "my-secret", "email");
//! let grant = client.request_user_code().await?;
//! println!("Visit {} and enter {}", grant.verification_url, grant.user_code);
//! // ... later, from the caller's polling loop:
//! match client.request_access_token(&grant.device_code).await? {
//!     TokenOutcome::Granted(tokens) => println!("token: {}", tokens.access_token),
//!     TokenOutcome::Error(e) if e.is_authorization_pending() => { /* poll again */ }
//!     TokenOutcome::Error(e) => eprintln!("denied: {}", e.error),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod providers;
mod types;

// Re-export public API
pub use client::DeviceFlowClient;
pub use types::{
    DeviceFlowConfig, OAuthError, TokenGrant, TokenOutcome, UserCodeGrant,
    DEFAULT_DEVICE_GRANT_TYPE, DEFAULT_USER_AGENT,
};
