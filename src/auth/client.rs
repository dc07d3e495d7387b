//! Transport for the authentication endpoint

use std::future::Future;
use std::time::Duration;

use crate::auth::models::{Credentials, TokenResponse};
use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// Something that can exchange credentials for a token response
pub trait AuthApi: Send + Sync {
    /// Send one authentication request. Implementations must not retry.
    fn request_token(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<TokenResponse>> + Send;
}

/// HTTP client for `POST /authenticate`
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: reqwest::Client,
    url: String,
}

impl HttpAuthApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.authenticate_url(),
        })
    }

    /// Full URL requests are sent to
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AuthApi for HttpAuthApi {
    async fn request_token(&self, credentials: &Credentials) -> Result<TokenResponse> {
        tracing::debug!("POST {} for user '{}'", self.url, credentials.username);

        let response = self.client.post(&self.url).json(credentials).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Network(format!("HTTP {}: {}", status, body.trim())));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(TokenResponse::default());
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Network(format!("Invalid response body: {}", e)))
    }
}
