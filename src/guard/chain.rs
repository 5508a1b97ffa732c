use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::status::{AuthStatus, FailureReason};
use crate::RememberConfig;
use crate::session::RequestContext;

/// A link in the sign-in guard chain.
///
/// Implementations either return `next.call(user)` or short-circuit with
/// [`AuthStatus::failure`].
pub trait SignInGuard<U> {
    fn call(&self, user: U) -> AuthStatus<U>;
}

/// Terminal guard: accepts the user it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSignInGuard;

impl<U> SignInGuard<U> for DefaultSignInGuard {
    fn call(&self, user: U) -> AuthStatus<U> {
        AuthStatus::success(user)
    }
}

/// What a guard can see of the session it runs in.
pub struct GuardContext<'a, U> {
    request: &'a RequestContext,
    config: &'a RememberConfig,
    current_user: Option<&'a U>,
}

impl<'a, U> GuardContext<'a, U> {
    pub fn new(
        request: &'a RequestContext,
        config: &'a RememberConfig,
        current_user: Option<&'a U>,
    ) -> Self {
        Self {
            request,
            config,
            current_user,
        }
    }

    pub fn request(&self) -> &'a RequestContext {
        self.request
    }

    pub fn config(&self) -> &'a RememberConfig {
        self.config
    }

    pub fn cookie(&self, name: &str) -> Option<&'a str> {
        self.request.cookie(name)
    }

    /// The user the session had already resolved before this sign-in, if any.
    pub fn current_user(&self) -> Option<&'a U> {
        self.current_user
    }

    pub fn signed_in(&self) -> bool {
        self.current_user.is_some()
    }
}

impl<U> Clone for GuardContext<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for GuardContext<'_, U> {}

/// Builds a guard around the next link of the chain.
pub trait GuardFactory<U>: Send + Sync {
    fn build<'a>(
        &self,
        ctx: GuardContext<'a, U>,
        next: Box<dyn SignInGuard<U> + 'a>,
    ) -> Box<dyn SignInGuard<U> + 'a>;
}

/// Makes a veto-style guard factory from a check function.
///
/// `Ok(())` passes the user on, `Err(message)` rejects the sign-in.
pub fn guard_fn<U, F>(check: F) -> FnGuardFactory<U, F>
where
    F: Fn(&GuardContext<'_, U>, &U) -> Result<(), String> + Send + Sync + 'static,
{
    FnGuardFactory {
        check: Arc::new(check),
        _marker: PhantomData,
    }
}

pub struct FnGuardFactory<U, F> {
    check: Arc<F>,
    _marker: PhantomData<fn(&U)>,
}

impl<U, F> GuardFactory<U> for FnGuardFactory<U, F>
where
    U: 'static,
    F: Fn(&GuardContext<'_, U>, &U) -> Result<(), String> + Send + Sync + 'static,
{
    fn build<'a>(
        &self,
        ctx: GuardContext<'a, U>,
        next: Box<dyn SignInGuard<U> + 'a>,
    ) -> Box<dyn SignInGuard<U> + 'a> {
        Box::new(FnGuard {
            check: Arc::clone(&self.check),
            ctx,
            next,
        })
    }
}

struct FnGuard<'a, U, F> {
    check: Arc<F>,
    ctx: GuardContext<'a, U>,
    next: Box<dyn SignInGuard<U> + 'a>,
}

impl<U, F> SignInGuard<U> for FnGuard<'_, U, F>
where
    F: Fn(&GuardContext<'_, U>, &U) -> Result<(), String>,
{
    fn call(&self, user: U) -> AuthStatus<U> {
        match (self.check)(&self.ctx, &user) {
            Ok(()) => self.next.call(user),
            Err(message) => AuthStatus::failure(message),
        }
    }
}

/// Ordered guards run by every sign-in.
///
/// Guards run in the order they were added; the first failure stops the
/// chain. Every chain ends in [`DefaultSignInGuard`].
pub struct SignInGuardChain<U> {
    guards: Vec<(String, Arc<dyn GuardFactory<U>>)>,
}

impl<U: 'static> SignInGuardChain<U> {
    pub fn empty() -> Self {
        Self { guards: Vec::new() }
    }

    #[must_use]
    pub fn with_guard(mut self, name: impl Into<String>, factory: Arc<dyn GuardFactory<U>>) -> Self {
        self.guards.push((name.into(), factory));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.guards.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Runs the chain for `user`.
    ///
    /// A missing user fails immediately without building or running any guard.
    pub fn call<'c>(&self, ctx: GuardContext<'c, U>, user: Option<U>) -> AuthStatus<U> {
        let Some(user) = user else {
            log::debug!(target: "enclave_remember::guard", "msg=\"sign in without user\"");
            return AuthStatus::Failure(FailureReason::MissingUser);
        };

        // Built innermost-first so the first configured guard runs first.
        let mut stack: Box<dyn SignInGuard<U> + 'c> = Box::new(DefaultSignInGuard);
        for (_, factory) in self.guards.iter().rev() {
            stack = factory.build(ctx, stack);
        }

        let status = stack.call(user);
        if let Some(reason) = status.failure_reason() {
            log::info!(
                target: "enclave_remember::guard",
                "msg=\"sign in rejected\", reason=\"{reason}\""
            );
        }
        status
    }
}

impl<U: 'static> Default for SignInGuardChain<U> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<U> fmt::Debug for SignInGuardChain<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.guards.iter().map(|(name, _)| name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    type Log = Arc<Mutex<Vec<&'static str>>>;

    struct Recording {
        label: &'static str,
        verdict: Result<(), &'static str>,
        log: Log,
    }

    struct RecordingGuard<'a> {
        label: &'static str,
        verdict: Result<(), &'static str>,
        log: Log,
        next: Box<dyn SignInGuard<u32> + 'a>,
    }

    impl GuardFactory<u32> for Recording {
        fn build<'a>(
            &self,
            _ctx: GuardContext<'a, u32>,
            next: Box<dyn SignInGuard<u32> + 'a>,
        ) -> Box<dyn SignInGuard<u32> + 'a> {
            Box::new(RecordingGuard {
                label: self.label,
                verdict: self.verdict,
                log: Arc::clone(&self.log),
                next,
            })
        }
    }

    impl SignInGuard<u32> for RecordingGuard<'_> {
        fn call(&self, user: u32) -> AuthStatus<u32> {
            self.log.lock().unwrap().push(self.label);
            match self.verdict {
                Ok(()) => self.next.call(user),
                Err(message) => AuthStatus::failure(message),
            }
        }
    }

    fn recording(label: &'static str, verdict: Result<(), &'static str>, log: &Log) -> Arc<dyn GuardFactory<u32>> {
        Arc::new(Recording {
            label,
            verdict,
            log: Arc::clone(log),
        })
    }

    fn ctx<'a>(request: &'a RequestContext, config: &'a RememberConfig) -> GuardContext<'a, u32> {
        GuardContext::new(request, config, None)
    }

    #[test]
    fn test_empty_chain_succeeds() {
        let (request, config) = (RequestContext::new(), RememberConfig::default());
        let chain = SignInGuardChain::empty();

        assert_eq!(chain.call(ctx(&request, &config), Some(7)), AuthStatus::Success(7));
    }

    #[test]
    fn test_guards_run_in_configured_order() {
        let (request, config) = (RequestContext::new(), RememberConfig::default());
        let log = Log::default();
        let chain = SignInGuardChain::empty()
            .with_guard("first", recording("first", Ok(()), &log))
            .with_guard("second", recording("second", Ok(()), &log))
            .with_guard("third", recording("third", Ok(()), &log));

        let status = chain.call(ctx(&request, &config), Some(1));

        assert_eq!(status, AuthStatus::Success(1));
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_failure_short_circuits() {
        let (request, config) = (RequestContext::new(), RememberConfig::default());
        let log = Log::default();
        let chain = SignInGuardChain::empty()
            .with_guard("first", recording("first", Err("Account locked"), &log))
            .with_guard("second", recording("second", Ok(()), &log));

        let status = chain.call(ctx(&request, &config), Some(1));

        assert_eq!(status.failure_message().as_deref(), Some("Account locked"));
        assert_eq!(*log.lock().unwrap(), vec!["first"]);
    }

    #[test]
    fn test_missing_user_runs_no_guard() {
        let (request, config) = (RequestContext::new(), RememberConfig::default());
        let log = Log::default();
        let chain = SignInGuardChain::empty().with_guard("first", recording("first", Ok(()), &log));

        let status = chain.call(ctx(&request, &config), None);

        assert_eq!(status, AuthStatus::Failure(FailureReason::MissingUser));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_guard_fn_sees_context() {
        let request = RequestContext::new().with_cookie("beta", "1");
        let config = RememberConfig::default();
        let chain = SignInGuardChain::empty().with_guard(
            "beta_only",
            Arc::new(guard_fn(|ctx: &GuardContext<'_, u32>, _user: &u32| {
                ctx.cookie("beta")
                    .map(|_| ())
                    .ok_or_else(|| "Beta access required".to_owned())
            })),
        );

        assert!(chain.call(ctx(&request, &config), Some(1)).is_success());

        let outsider = RequestContext::new();
        let status = chain.call(ctx(&outsider, &config), Some(1));
        assert_eq!(status.failure_message().as_deref(), Some("Beta access required"));
    }

    #[test]
    fn test_debug_lists_names() {
        let log = Log::default();
        let chain = SignInGuardChain::empty().with_guard("first", recording("first", Ok(()), &log));
        assert_eq!(format!("{chain:?}"), "[\"first\"]");
        assert_eq!(chain.names().collect::<Vec<_>>(), vec!["first"]);
        assert_eq!(chain.len(), 1);
    }
}
