//! Device flow client - user code retrieval, token exchange and refresh

use dl_types::{AppError, AppResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error, info};

use super::types::{DeviceFlowConfig, OAuthError, TokenGrant, TokenOutcome, UserCodeGrant};

/// Raw token endpoint response, before error-key classification
///
/// Token fields and error fields can arrive in the same object; the `error`
/// key decides which half counts.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,

    #[serde(default)]
    token_type: String,

    #[serde(default)]
    expires_in: u64,

    #[serde(default)]
    refresh_token: String,

    error: Option<String>,

    #[serde(default)]
    error_description: String,
}

/// OAuth 2.0 device authorization grant client
///
/// Issues the three requests of the device grant against one provider and
/// translates the JSON answers into typed results. Stateless apart from the
/// configuration: operations take `&self`, share one [`reqwest::Client`] and
/// may run concurrently. The caller owns the polling loop. Dropping an
/// operation's future before completion aborts the exchange; no result is
/// delivered for it.
pub struct DeviceFlowClient {
    config: DeviceFlowConfig,
    client: Client,
}

impl DeviceFlowClient {
    /// Create a client for the given provider configuration
    pub fn new(config: DeviceFlowConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create a client using a caller-supplied HTTP client
    ///
    /// Timeouts, proxies and TLS settings belong on the [`reqwest::Client`],
    /// not in this crate.
    pub fn with_http_client(config: DeviceFlowConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Provider configuration in use
    pub fn config(&self) -> &DeviceFlowConfig {
        &self.config
    }

    /// User agent sent with every request
    pub fn user_agent(&self) -> &str {
        &self.config.user_agent
    }

    /// Override the user agent
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.config.user_agent = user_agent.into();
    }

    /// Grant type identifier sent with the device code exchange
    pub fn grant_type(&self) -> &str {
        &self.config.grant_type
    }

    /// Override the grant type identifier
    pub fn set_grant_type(&mut self, grant_type: impl Into<String>) {
        self.config.grant_type = grant_type.into();
    }

    /// Request a device/user code pair (step 1 of the grant)
    ///
    /// One attempt, no retry. The returned grant tells the caller what to
    /// display ([`UserCodeGrant::user_code`], [`UserCodeGrant::verification_url`])
    /// and how to pace the token polling that follows.
    pub async fn request_user_code(&self) -> AppResult<UserCodeGrant> {
        info!(
            "Requesting device and user codes for client: {}",
            self.config.client_id
        );

        let body = self.user_code_body();
        let (status, text) = self.post_form(&self.config.user_code_url, body).await?;

        if !status.is_success() {
            error!("User code request failed with status {}: {}", status, text);
            return Err(AppError::Transport(format!(
                "User code request failed with status {}: {}",
                status, text
            )));
        }

        let grant: UserCodeGrant = serde_json::from_str(&text).map_err(|e| {
            AppError::MalformedResponse(format!("Failed to parse user code response: {}", e))
        })?;

        debug!(
            "User code received: user_code={}, expires_in={}s, interval={}s",
            grant.user_code, grant.expires_in, grant.interval
        );

        Ok(grant)
    }

    /// Exchange a device code for an access token (step 2 of the grant)
    ///
    /// Returns [`TokenOutcome::Error`] for the structured OAuth answers the
    /// provider sends while the user has not approved yet
    /// (`authorization_pending`, `slow_down`) and for terminal refusals
    /// (`access_denied`, `expired_token`). Interpreting those codes is the
    /// caller's polling policy.
    pub async fn request_access_token(&self, device_code: &str) -> AppResult<TokenOutcome> {
        if device_code.is_empty() {
            return Err(AppError::InvalidParams(
                "device_code must not be empty".to_string(),
            ));
        }

        info!("Exchanging device code for access token");

        let body = self.token_body(device_code);
        let (status, text) = self.post_form(&self.config.token_url, body).await?;

        Self::interpret_token_response(status, &text)
    }

    /// Exchange a refresh token for a fresh access token (step 3)
    ///
    /// Sends the literal grant type `refresh_token`, independent of the
    /// configured device grant type identifier.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> AppResult<TokenOutcome> {
        if refresh_token.is_empty() {
            return Err(AppError::InvalidParams(
                "refresh_token must not be empty".to_string(),
            ));
        }

        info!("Refreshing access token");

        let body = self.refresh_body(refresh_token);
        let (status, text) = self.post_form(&self.config.token_url, body).await?;

        Self::interpret_token_response(status, &text)
    }

    /// Step 1 request body
    fn user_code_body(&self) -> String {
        format!(
            "client_id={}&scope={}",
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.scope),
        )
    }

    /// Step 2 request body
    fn token_body(&self, device_code: &str) -> String {
        format!(
            "client_id={}&client_secret={}&code={}&grant_type={}",
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.client_secret),
            urlencoding::encode(device_code),
            urlencoding::encode(&self.config.grant_type),
        )
    }

    /// Step 3 request body; grant_type is always the literal `refresh_token`
    fn refresh_body(&self, refresh_token: &str) -> String {
        format!(
            "client_id={}&client_secret={}&refresh_token={}&grant_type=refresh_token",
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.client_secret),
            urlencoding::encode(refresh_token),
        )
    }

    /// Send one form-encoded POST and collect the response body
    async fn post_form(&self, url: &str, body: String) -> AppResult<(StatusCode, String)> {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("User-Agent", &self.config.user_agent)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to send request to {}: {}", url, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok((status, text))
    }

    /// Classify a token endpoint response
    ///
    /// The body is parsed before the HTTP status is consulted: providers
    /// deliver `authorization_pending` and friends as JSON errors on 4xx, and
    /// those must surface as [`TokenOutcome::Error`], not as transport
    /// failures. The `error` key takes precedence over any token fields in
    /// the same object.
    fn interpret_token_response(status: StatusCode, text: &str) -> AppResult<TokenOutcome> {
        let response: TokenResponse = match serde_json::from_str(text) {
            Ok(response) => response,
            Err(e) => {
                if !status.is_success() {
                    error!("Token request failed with status {}: {}", status, text);
                    return Err(AppError::Transport(format!(
                        "Token request failed with status {}: {}",
                        status, text
                    )));
                }
                return Err(AppError::MalformedResponse(format!(
                    "Failed to parse token response: {}",
                    e
                )));
            }
        };

        if let Some(code) = response.error {
            debug!("Token endpoint answered with OAuth error: {}", code);
            return Ok(TokenOutcome::Error(OAuthError {
                error: code,
                error_description: response.error_description,
            }));
        }

        if !status.is_success() {
            error!("Token request failed with status {}: {}", status, text);
            return Err(AppError::Transport(format!(
                "Token request failed with status {}: {}",
                status, text
            )));
        }

        debug!(
            "Access token received (type: {}, expires_in: {}s)",
            response.token_type, response.expires_in
        );

        Ok(TokenOutcome::Granted(TokenGrant {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
            refresh_token: response.refresh_token,
        }))
    }
}
