use std::sync::OnceLock;

use super::{AuthEvent, Listener};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// Registered event listeners.
///
/// Use [`register_event_listeners`] to configure listeners at application startup.
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Listeners are called in the order they are registered.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    async fn notify(&self, event: &AuthEvent) {
        log::trace!(
            target: "enclave_remember::events",
            "msg=\"dispatching event\", event={}, listeners={}",
            event.name(),
            self.listeners.len()
        );
        for listener in &self.listeners {
            listener.handle(event).await;
        }
    }
}

/// Registers event listeners. Call once during startup; later calls are
/// ignored with a warning.
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);
    let count = registry.len();

    match REGISTRY.set(registry) {
        Ok(()) => log::debug!(
            target: "enclave_remember::events",
            "msg=\"event listeners registered\", listeners={count}"
        ),
        Err(_) => log::warn!(
            target: "enclave_remember::events",
            "msg=\"event listeners already registered, ignoring\""
        ),
    }
}

/// Sends an event to every registered listener. No-op when none are registered.
pub async fn dispatch(event: AuthEvent) {
    match REGISTRY.get() {
        Some(registry) if !registry.is_empty() => registry.notify(&event).await,
        _ => {}
    }
}
