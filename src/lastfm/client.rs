use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    config::{Config, Credentials},
    error::RemoteError,
    lastfm::{Endpoint, LastFmApi},
};

/// reqwest-backed [`LastFmApi`].
///
/// One connection pool is shared by every feed. The timeout covers the whole
/// request so a hanging server cannot stall a build.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Builds a client for `base_url` with a whole-request `timeout`.
    ///
    /// # Errors
    ///
    /// [`RemoteError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Client for `config.api_url` and `config.timeout`.
    pub fn from_config(config: &Config) -> Result<Self, RemoteError> {
        Self::new(config.api_url.clone(), config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LastFmApi for HttpClient {
    async fn fetch(
        &self,
        credentials: &Credentials,
        endpoint: &Endpoint,
    ) -> Result<Value, RemoteError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&endpoint.query(credentials))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_body(status, &body)
    }
}

/// Maps status and body to the decoded tree or a [`RemoteError`].
///
/// Last.fm reports failures as `{"error": <code>, "message": <text>}`, usually
/// with a 4xx status but occasionally with 200.
pub fn parse_body(status: StatusCode, body: &str) -> Result<Value, RemoteError> {
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));

        return Err(RemoteError::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            message,
        });
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| RemoteError::Decode(e.to_string()))?;

    if let Some(code) = value.get("error").and_then(Value::as_i64) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(RemoteError::Api { code, message });
    }

    Ok(value)
}
