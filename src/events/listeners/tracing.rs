use async_trait::async_trait;

use crate::events::{AuthEvent, Listener};

/// Emits session events as tracing events.
///
/// Requires the `tracing` feature.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &AuthEvent) {
        tracing::info!(
            target: "enclave_remember::events",
            event_name = event.name(),
            user_id = event.user_id(),
            ?event,
            "session event"
        );
    }
}
