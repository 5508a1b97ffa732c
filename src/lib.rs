//! Cookie-based "remember me" authentication.
//!
//! A signed-in user carries a long-lived remember token in a cookie. On each
//! request a [`Session`] decodes that cookie, resolves the user through a
//! [`TokenStore`], and stages cookie writes for sign-in and sign-out.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use enclave_remember::{Authenticator, InMemoryTokenStore, RememberConfig, RequestContext, ResponseCookies};
//!
//! let authenticator = Authenticator::new(RememberConfig::default(), InMemoryTokenStore::new())?;
//!
//! let request = RequestContext::from_cookie_header("remember_token=abc123");
//! let mut session = authenticator.session(&request);
//!
//! if session.signed_in().await? {
//!     // ...
//! }
//!
//! let mut response = ResponseCookies::new();
//! session.add_cookie_to_headers(&mut response);
//! ```

pub mod authenticator;
pub mod config;
pub mod crypto;
pub mod events;
pub mod guard;
pub mod repository;
mod secret;
pub mod session;

#[cfg(feature = "actix")]
pub mod api;

use std::fmt;

pub use authenticator::Authenticator;
pub use config::{CookieDomain, CookieExpiration, CookieSigning, RememberConfig, SameSite};
pub use events::register_event_listeners;
pub use guard::{
    AuthStatus, DefaultSignInGuard, FailureReason, GuardContext, GuardFactory, GuardRegistry,
    SignInGuard, SignInGuardChain, guard_fn,
};
pub use repository::{AuthUser, InMemoryTokenStore, Rememberable, TokenStore};
pub use secret::SecretString;
pub use session::{
    CookieAttributes, CookieCodec, CookieSink, RequestContext, RequestCookies, ResponseCookie,
    ResponseCookies, Session,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    UserNotFound,
    TokenExpired,
    TokenInvalid,
    DatabaseError(String),
    ConfigurationError(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::TokenExpired => write!(f, "Remember token has expired"),
            AuthError::TokenInvalid => write!(f, "Invalid remember token"),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            AuthError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::TokenInvalid.to_string(), "Invalid remember token");
        assert_eq!(
            AuthError::ConfigurationError("unknown guard".to_owned()).to_string(),
            "Configuration error: unknown guard"
        );
        assert_eq!(
            AuthError::DatabaseError("connection reset".to_owned()).to_string(),
            "Database error: connection reset"
        );
    }
}
