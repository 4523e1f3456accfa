//! Notifier that only logs what it would have sent.

use crate::traits::{Notifier, NotifyError};

#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunNotifier;

#[async_trait::async_trait]
impl Notifier for DryRunNotifier {
    async fn send(&self, content: &str) -> Result<(), NotifyError> {
        tracing::info!(content, "dry run, message not delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "dry-run"
    }
}
