//! Discord-style HTTP webhook notifier.
//!
//! Posts `{"content": "<text>"}` as JSON to a webhook URL. The URL is a
//! secret and comes from the environment, never from the rotation config.

use std::time::Duration;

use crate::traits::{Notifier, NotifyError};

/// Environment variable holding the webhook URL.
pub const WEBHOOK_URL_ENV: &str = "DISCORD_WEBHOOK_URL";

/// Request timeout used when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers messages as JSON over HTTP to a configured endpoint.
#[derive(Debug)]
pub struct WebhookNotifier {
    /// Target URL.
    url: String,
    /// Shared HTTP client with the request timeout baked in.
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a notifier for `url` whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(NotifyError::Config("webhook URL must not be empty".to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }

    /// Read the URL from `var`.
    ///
    /// A missing or empty variable produces [`NotifyError::Config`].
    pub fn from_env_var(var: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let url = std::env::var(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| NotifyError::Config(format!("Missing {var} secret")))?;
        Self::new(url, timeout)
    }

    /// Read the URL from [`WEBHOOK_URL_ENV`].
    pub fn from_env(timeout: Duration) -> Result<Self, NotifyError> {
        Self::from_env_var(WEBHOOK_URL_ENV, timeout)
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, content: &str) -> Result<(), NotifyError> {
        let payload = serde_json::json!({ "content": content });

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // The URL embeds the webhook token, so it is kept out of logs.
            tracing::warn!(%status, body = %body, "webhook returned non-2xx status");
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(%status, "webhook notification delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "webhook"
    }
}
