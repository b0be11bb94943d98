use anyhow::Result;
use async_trait::async_trait;

/// Delivers short, human readable messages to the user.
///
/// Notifications are fire-and-forget, callers log errors returned from
/// [Notifier::notify] and carry on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<()>;
}
