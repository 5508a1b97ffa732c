//! Sign-in guards.
//!
//! Guards run before a sign-in is committed and may veto it. Each guard is
//! built with a [`GuardContext`] and the next guard in the chain; it either
//! forwards the user to `next` or returns a failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use enclave_remember::{AuthUser, GuardRegistry, guard_fn};
//!
//! let mut registry = GuardRegistry::<AuthUser>::new();
//! registry.register(
//!     "email_confirmed",
//!     guard_fn(|_ctx, user: &AuthUser| {
//!         if user.email.ends_with("@example.com") {
//!             Ok(())
//!         } else {
//!             Err("Email address not confirmed".to_owned())
//!         }
//!     }),
//! );
//! ```

mod chain;
mod registry;
mod status;

pub use chain::{
    DefaultSignInGuard, GuardContext, GuardFactory, SignInGuard, SignInGuardChain, guard_fn,
};
pub use registry::GuardRegistry;
pub use status::{AuthStatus, FailureReason};
