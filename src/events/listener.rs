use async_trait::async_trait;

use super::AuthEvent;

/// Handles session events.
///
/// Listeners run in registration order, inline with the session operation
/// that fired the event.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &AuthEvent);
}
