use async_trait::async_trait;

use crate::events::{AuthEvent, Listener};

/// Logs every session event through the `log` crate.
///
/// # Example
///
/// ```rust,ignore
/// use enclave_remember::register_event_listeners;
/// use enclave_remember::events::listeners::LoggingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(LoggingListener::with_level(log::Level::Debug));
/// });
/// ```
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Logs at INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &AuthEvent) {
        match event {
            AuthEvent::SignInRejected {
                user_id, reason, ..
            } => log::log!(
                target: "enclave_remember::events",
                self.level,
                "event={} user_id={user_id:?} reason=\"{reason}\" at={}",
                event.name(),
                event.timestamp().to_rfc3339()
            ),
            _ => log::log!(
                target: "enclave_remember::events",
                self.level,
                "event={} user_id={:?} at={}",
                event.name(),
                event.user_id(),
                event.timestamp().to_rfc3339()
            ),
        }
    }
}
