//! Notifier trait definition and shared error types.

/// Errors that can occur during notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("no announcement target one week after {0}")]
    DateOutOfRange(chrono::NaiveDate),
}

/// Trait for outbound message channels.
///
/// A channel takes one opaque text payload per call. Implementations must
/// report a rejected delivery as an error; callers do not retry.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `content` through this channel.
    async fn send(&self, content: &str) -> Result<(), NotifyError>;

    /// Human-readable name for this channel (e.g., "webhook").
    fn channel_name(&self) -> &str;
}

#[async_trait::async_trait]
impl<N: Notifier + ?Sized> Notifier for Box<N> {
    async fn send(&self, content: &str) -> Result<(), NotifyError> {
        (**self).send(content).await
    }

    fn channel_name(&self) -> &str {
        (**self).channel_name()
    }
}
