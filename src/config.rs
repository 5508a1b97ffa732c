//! Configuration for remember-me cookies.
//!
//! A [`RememberConfig`] is built once at startup and handed to an
//! [`Authenticator`](crate::Authenticator). Tests build their own instead of
//! mutating shared state.
//!
//! # Example
//!
//! ```rust
//! use chrono::Duration;
//! use enclave_remember::{CookieDomain, CookieExpiration, CookieSigning, RememberConfig, SameSite, SecretString};
//!
//! let config = RememberConfig {
//!     signed_cookie: CookieSigning::Migrate,
//!     secret_key: SecretString::new("a-cookie-signing-key-of-32-bytes!"),
//!     secure_cookie: true,
//!     same_site: Some(SameSite::Lax),
//!     cookie_domain: Some(CookieDomain::literal(".example.com")),
//!     cookie_expiration: CookieExpiration::Fixed(Duration::days(30)),
//!     ..Default::default()
//! };
//!
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::crypto::DEFAULT_TOKEN_LENGTH;
use crate::session::{RequestContext, RequestCookies};
use crate::{AuthError, SecretString};

pub const DEFAULT_COOKIE_NAME: &str = "remember_token";

const MIN_SECRET_LENGTH: usize = 32;

/// How the remember-token cookie is signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CookieSigning {
    /// Read and write HMAC-signed values only.
    Signed,
    /// Read and write raw values.
    #[default]
    Unsigned,
    /// Read signed values, falling back to raw ones; write raw values.
    ///
    /// Lets a deployment move to signed cookies without dropping sessions
    /// that still carry unsigned ones.
    Migrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

type DomainResolver = dyn Fn(&RequestContext) -> String + Send + Sync;
type ExpirationResolver = dyn Fn(&RequestCookies) -> Option<DateTime<Utc>> + Send + Sync;

/// Cookie domain, either fixed or derived from the request.
#[derive(Clone)]
pub enum CookieDomain {
    Literal(String),
    Computed(Arc<DomainResolver>),
}

impl CookieDomain {
    pub fn literal(domain: impl Into<String>) -> Self {
        CookieDomain::Literal(domain.into())
    }

    pub fn computed<F>(resolver: F) -> Self
    where
        F: Fn(&RequestContext) -> String + Send + Sync + 'static,
    {
        CookieDomain::Computed(Arc::new(resolver))
    }

    pub fn resolve(&self, request: &RequestContext) -> String {
        match self {
            CookieDomain::Literal(domain) => domain.clone(),
            CookieDomain::Computed(resolver) => resolver(request),
        }
    }
}

impl fmt::Debug for CookieDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieDomain::Literal(domain) => f.debug_tuple("Literal").field(domain).finish(),
            CookieDomain::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// When the remember-token cookie expires.
#[derive(Clone)]
pub enum CookieExpiration {
    /// A fixed lifetime counted from the moment the cookie is written.
    Fixed(Duration),
    /// Computed from the request's cookies. `None` writes a session cookie.
    Computed(Arc<ExpirationResolver>),
}

impl CookieExpiration {
    pub fn computed<F>(resolver: F) -> Self
    where
        F: Fn(&RequestCookies) -> Option<DateTime<Utc>> + Send + Sync + 'static,
    {
        CookieExpiration::Computed(Arc::new(resolver))
    }

    pub fn resolve(&self, cookies: &RequestCookies, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            CookieExpiration::Fixed(lifetime) => Some(now + *lifetime),
            CookieExpiration::Computed(resolver) => resolver(cookies),
        }
    }
}

impl Default for CookieExpiration {
    fn default() -> Self {
        CookieExpiration::Fixed(Duration::days(365))
    }
}

impl fmt::Debug for CookieExpiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieExpiration::Fixed(lifetime) => f.debug_tuple("Fixed").field(lifetime).finish(),
            CookieExpiration::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RememberConfig {
    pub cookie_name: String,
    pub signed_cookie: CookieSigning,
    /// Key for signed cookies. Unused with [`CookieSigning::Unsigned`].
    pub secret_key: SecretString,
    pub http_only: bool,
    pub secure_cookie: bool,
    pub same_site: Option<SameSite>,
    pub cookie_domain: Option<CookieDomain>,
    pub cookie_path: Option<String>,
    pub cookie_expiration: CookieExpiration,
    /// Guard identifiers, resolved against a [`GuardRegistry`](crate::GuardRegistry).
    /// Guards run in list order.
    pub sign_in_guards: Vec<String>,
    /// Length of remember tokens generated by
    /// [`InMemoryTokenStore::from_config`](crate::InMemoryTokenStore::from_config).
    pub token_length: usize,
}

impl Default for RememberConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_owned(),
            signed_cookie: CookieSigning::default(),
            secret_key: SecretString::default(),
            http_only: true,
            secure_cookie: false,
            same_site: None,
            cookie_domain: None,
            cookie_path: None,
            cookie_expiration: CookieExpiration::default(),
            sign_in_guards: Vec::new(),
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

impl RememberConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.cookie_name.is_empty() {
            return Err(AuthError::ConfigurationError(
                "cookie_name must not be empty".to_owned(),
            ));
        }
        if self.signed_cookie != CookieSigning::Unsigned {
            if self.secret_key.is_empty() {
                return Err(AuthError::ConfigurationError(
                    "secret_key is required for signed cookies".to_owned(),
                ));
            }
            if self.secret_key.len() < MIN_SECRET_LENGTH {
                return Err(AuthError::ConfigurationError(format!(
                    "secret_key should be at least {MIN_SECRET_LENGTH} bytes"
                )));
            }
        }
        if self.token_length == 0 {
            return Err(AuthError::ConfigurationError(
                "token_length must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-very-long-secret-key-for-testing";

    #[test]
    fn test_default_config() {
        let config = RememberConfig::default();
        assert_eq!(config.cookie_name, "remember_token");
        assert_eq!(config.signed_cookie, CookieSigning::Unsigned);
        assert!(config.http_only);
        assert!(!config.secure_cookie);
        assert!(config.same_site.is_none());
        assert!(config.cookie_domain.is_none());
        assert!(config.cookie_path.is_none());
        assert!(config.sign_in_guards.is_empty());
        assert!(matches!(
            config.cookie_expiration,
            CookieExpiration::Fixed(lifetime) if lifetime == Duration::days(365)
        ));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_cookie_name() {
        let config = RememberConfig {
            cookie_name: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_signed_without_secret() {
        for signing in [CookieSigning::Signed, CookieSigning::Migrate] {
            let config = RememberConfig {
                signed_cookie: signing,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(AuthError::ConfigurationError(_))));
        }
    }

    #[test]
    fn test_validate_short_secret() {
        let config = RememberConfig {
            signed_cookie: CookieSigning::Signed,
            secret_key: SecretString::new("short"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_signed_with_secret() {
        let config = RememberConfig {
            signed_cookie: CookieSigning::Signed,
            secret_key: SecretString::new(SECRET),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_domain_literal_and_computed() {
        let request = RequestContext::new().with_host("app.example.com");

        let literal = CookieDomain::literal(".example.com");
        assert_eq!(literal.resolve(&request), ".example.com");

        let computed = CookieDomain::computed(|req| {
            format!(".{}", req.host().unwrap_or("localhost"))
        });
        assert_eq!(computed.resolve(&request), ".app.example.com");
    }

    #[test]
    fn test_expiration_fixed() {
        let now = Utc::now();
        let expiration = CookieExpiration::Fixed(Duration::hours(2));
        assert_eq!(
            expiration.resolve(&RequestCookies::new(), now),
            Some(now + Duration::hours(2))
        );
    }

    #[test]
    fn test_expiration_computed_sees_cookies() {
        let expiration = CookieExpiration::computed(|cookies| {
            cookies
                .get("short_lived")
                .map(|_| DateTime::<Utc>::UNIX_EPOCH + Duration::days(1))
        });

        let mut cookies = RequestCookies::new();
        assert_eq!(expiration.resolve(&cookies, Utc::now()), None);

        cookies.insert("short_lived", "1");
        assert_eq!(
            expiration.resolve(&cookies, Utc::now()),
            Some(DateTime::<Utc>::UNIX_EPOCH + Duration::days(1))
        );
    }

    #[test]
    fn test_debug_hides_resolvers() {
        let domain = CookieDomain::computed(|_| "x".to_owned());
        assert_eq!(format!("{domain:?}"), "Computed(..)");
    }
}
