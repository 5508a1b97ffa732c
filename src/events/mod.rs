//! Events fired by sessions.
//!
//! Sessions dispatch an [`AuthEvent`] on every sign-in attempt and sign-out.
//! With no listeners registered, dispatch is a no-op.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use enclave_remember::register_event_listeners;
//! use enclave_remember::events::listeners::LoggingListener;
//!
//! fn main() {
//!     register_event_listeners(|registry| {
//!         registry.listen(LoggingListener::new());
//!     });
//! }
//! ```
//!
//! # Custom Listeners
//!
//! ```rust,ignore
//! use enclave_remember::events::{AuthEvent, Listener};
//! use async_trait::async_trait;
//!
//! struct RejectionCounter;
//!
//! #[async_trait]
//! impl Listener for RejectionCounter {
//!     async fn handle(&self, event: &AuthEvent) {
//!         if let AuthEvent::SignInRejected { .. } = event {
//!             // increment counter
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::AuthEvent;
pub use listener::Listener;
pub use registry::{EventRegistry, dispatch, register_event_listeners};
