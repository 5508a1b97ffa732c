use std::fmt;

use crate::guard::{GuardRegistry, SignInGuardChain};
use crate::session::{RequestContext, Session};
use crate::{AuthError, RememberConfig, TokenStore};

/// Process-wide remember-me setup: configuration, token store and the
/// resolved sign-in guard chain.
///
/// Build one at startup and create a [`Session`] per request with
/// [`session`](Self::session).
pub struct Authenticator<S: TokenStore> {
    config: RememberConfig,
    store: S,
    guards: SignInGuardChain<S::User>,
}

impl<S: TokenStore> Authenticator<S> {
    /// Creates an authenticator without guards.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` if the configuration is invalid
    /// or names any sign-in guard.
    pub fn new(config: RememberConfig, store: S) -> Result<Self, AuthError> {
        Self::with_guards(config, store, &GuardRegistry::new())
    }

    /// Creates an authenticator, resolving `config.sign_in_guards` against
    /// `registry`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` if the configuration is invalid
    /// or names a guard missing from the registry.
    pub fn with_guards(
        config: RememberConfig,
        store: S,
        registry: &GuardRegistry<S::User>,
    ) -> Result<Self, AuthError> {
        config.validate()?;
        let guards = registry.build_chain(&config.sign_in_guards)?;

        log::debug!(
            target: "enclave_remember",
            "msg=\"authenticator ready\", cookie=\"{}\", signing={:?}, guards={:?}",
            config.cookie_name,
            config.signed_cookie,
            guards
        );

        Ok(Self {
            config,
            store,
            guards,
        })
    }

    pub fn config(&self) -> &RememberConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn guards(&self) -> &SignInGuardChain<S::User> {
        &self.guards
    }

    pub fn session<'a>(&'a self, request: &'a RequestContext) -> Session<'a, S> {
        Session::new(self, request)
    }
}

impl<S: TokenStore> fmt::Debug for Authenticator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("config", &self.config)
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}
