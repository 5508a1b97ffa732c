use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::chain::{GuardFactory, SignInGuardChain};
use crate::AuthError;

/// Named guard factories.
///
/// Configuration refers to guards by name; the registry turns that list into
/// a [`SignInGuardChain`] once, at startup.
pub struct GuardRegistry<U> {
    factories: HashMap<String, Arc<dyn GuardFactory<U>>>,
}

impl<U: 'static> GuardRegistry<U> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: GuardFactory<U> + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Resolves guard names, in order, into a chain.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` for a name that was never
    /// registered.
    pub fn build_chain<S: AsRef<str>>(&self, names: &[S]) -> Result<SignInGuardChain<U>, AuthError> {
        names.iter().try_fold(SignInGuardChain::empty(), |chain, name| {
            let name = name.as_ref();
            let factory = self.factories.get(name).ok_or_else(|| {
                log::error!(target: "enclave_remember::guard", "msg=\"unknown sign-in guard\", guard=\"{name}\"");
                AuthError::ConfigurationError(format!("unknown sign-in guard `{name}`"))
            })?;
            Ok(chain.with_guard(name, Arc::clone(factory)))
        })
    }
}

impl<U: 'static> Default for GuardRegistry<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> fmt::Debug for GuardRegistry<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort_unstable();
        f.debug_struct("GuardRegistry").field("guards", &names).finish()
    }
}
