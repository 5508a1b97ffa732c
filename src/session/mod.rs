//! Per-request remember-me session.
//!
//! A [`Session`] lives for one request. It resolves the current user from the
//! remember-token cookie at most once, runs sign-in guards, and stages at most
//! one cookie write or deletion for the response.

mod cookie;
mod request;
mod response;

use chrono::Utc;

pub use self::cookie::CookieCodec;
pub use request::{RequestContext, RequestCookies};
pub use response::{CookieAttributes, CookieSink, ResponseCookie, ResponseCookies};
use crate::events::{AuthEvent, dispatch};
use crate::guard::{AuthStatus, GuardContext};
use crate::{AuthError, Authenticator, Rememberable, TokenStore};

enum CurrentUser<U> {
    Unresolved,
    Resolved(Option<U>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StagedCookie {
    Write(String),
    Delete,
}

pub struct Session<'a, S: TokenStore> {
    authenticator: &'a Authenticator<S>,
    request: &'a RequestContext,
    current_user: CurrentUser<S::User>,
    staged: Option<StagedCookie>,
}

impl<'a, S: TokenStore> Session<'a, S> {
    pub fn new(authenticator: &'a Authenticator<S>, request: &'a RequestContext) -> Self {
        Self {
            authenticator,
            request,
            current_user: CurrentUser::Unresolved,
            staged: None,
        }
    }

    fn codec(&self) -> CookieCodec<'a> {
        CookieCodec::new(self.authenticator.config())
    }

    /// The signed-in user, resolved from the remember-token cookie on first
    /// call and cached for the rest of the session.
    ///
    /// A missing, tampered, unknown or expired token resolves to `None`.
    ///
    /// # Errors
    ///
    /// Propagates token store failures unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "current_user", skip_all, err)
    )]
    pub async fn current_user(&mut self) -> Result<Option<&S::User>, AuthError> {
        if let CurrentUser::Unresolved = self.current_user {
            let user = self.resolve().await?;
            self.current_user = CurrentUser::Resolved(user);
        }

        Ok(match &self.current_user {
            CurrentUser::Resolved(user) => user.as_ref(),
            CurrentUser::Unresolved => None,
        })
    }

    async fn resolve(&self) -> Result<Option<S::User>, AuthError> {
        let Some(token) = self.codec().read(self.request.cookies()) else {
            return Ok(None);
        };

        let user = self
            .authenticator
            .store()
            .find_by_remember_token(&token)
            .await?;

        match user {
            Some(user) if user.remember_token() != token => {
                log::warn!(
                    target: "enclave_remember::session",
                    "msg=\"token store returned inexact match\", user_id={}",
                    user.id()
                );
                Ok(None)
            }
            Some(user) if user.remember_token_expired() => {
                log::info!(
                    target: "enclave_remember::session",
                    "msg=\"remember token expired\", user_id={}",
                    user.id()
                );
                Ok(None)
            }
            Some(user) => Ok(Some(user)),
            None => {
                log::debug!(target: "enclave_remember::session", "msg=\"unknown remember token\"");
                Ok(None)
            }
        }
    }

    pub async fn signed_in(&mut self) -> Result<bool, AuthError> {
        Ok(self.current_user().await?.is_some())
    }

    pub async fn signed_out(&mut self) -> Result<bool, AuthError> {
        Ok(self.current_user().await?.is_none())
    }

    /// Signs `user` in after running the sign-in guards.
    ///
    /// On success the user becomes the current user and its remember token is
    /// staged as the outbound cookie. On failure nothing changes.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "sign_in", skip_all)
    )]
    pub async fn sign_in(&mut self, user: Option<S::User>) -> AuthStatus<S::User> {
        let candidate_id = user.as_ref().map(Rememberable::id);

        let status = {
            let current = match &self.current_user {
                CurrentUser::Resolved(current) => current.as_ref(),
                CurrentUser::Unresolved => None,
            };
            let ctx = GuardContext::new(self.request, self.authenticator.config(), current);
            self.authenticator.guards().call(ctx, user)
        };

        match &status {
            AuthStatus::Success(user) => {
                if user.remember_token().is_empty() {
                    log::warn!(
                        target: "enclave_remember::session",
                        "msg=\"signed in user has no remember token\", user_id={}",
                        user.id()
                    );
                }
                self.current_user = CurrentUser::Resolved(Some(user.clone()));
                self.staged = Some(StagedCookie::Write(user.remember_token().to_owned()));

                log::info!(
                    target: "enclave_remember::session",
                    "msg=\"sign in success\", user_id={}",
                    user.id()
                );
                dispatch(AuthEvent::SignInSucceeded {
                    user_id: user.id(),
                    at: Utc::now(),
                })
                .await;
            }
            AuthStatus::Failure(reason) => {
                dispatch(AuthEvent::SignInRejected {
                    user_id: candidate_id,
                    reason: reason.to_string(),
                    at: Utc::now(),
                })
                .await;
            }
        }

        status
    }

    /// Signs `user` in and hands the outcome to `continuation`.
    pub async fn sign_in_with<F, R>(&mut self, user: Option<S::User>, continuation: F) -> R
    where
        F: FnOnce(&AuthStatus<S::User>) -> R,
    {
        let status = self.sign_in(user).await;
        continuation(&status)
    }

    /// Signs the current user out.
    ///
    /// Always clears the current user and stages a cookie deletion. When a
    /// user was signed in, its remember token is rotated so the old cookie no
    /// longer resolves.
    ///
    /// # Errors
    ///
    /// Propagates token store failures; the user is cleared and the deletion
    /// staged regardless.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "sign_out", skip_all, err)
    )]
    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        let resolved = self.current_user().await.map(|user| user.cloned());

        self.current_user = CurrentUser::Resolved(None);
        self.staged = Some(StagedCookie::Delete);

        let user = resolved?;
        if let Some(user) = &user {
            self.authenticator.store().forget_token(user).await?;
        }

        let user_id = user.as_ref().map(Rememberable::id);
        log::info!(
            target: "enclave_remember::session",
            "msg=\"sign out\", user_id={user_id:?}"
        );
        dispatch(AuthEvent::SignedOut {
            user_id,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }

    /// True when a sign-in or sign-out has staged a cookie not yet flushed.
    pub fn has_staged_cookie(&self) -> bool {
        self.staged.is_some()
    }

    /// Flushes the staged cookie write or deletion into `sink`.
    ///
    /// Does nothing if neither `sign_in` nor `sign_out` staged a cookie, or if
    /// it was already flushed.
    pub fn add_cookie_to_headers<K>(&mut self, sink: &mut K)
    where
        K: CookieSink + ?Sized,
    {
        let Some(staged) = self.staged.take() else {
            return;
        };

        let codec = self.codec();
        match staged {
            StagedCookie::Write(token) => {
                let attributes = codec.write_attributes(self.request, Utc::now());
                codec.write(sink, &token, &attributes);
            }
            StagedCookie::Delete => {
                let attributes = codec.removal_attributes(self.request);
                codec.delete(sink, &attributes);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuthUser, InMemoryTokenStore, RememberConfig};

    fn authenticator() -> (Authenticator<InMemoryTokenStore>, AuthUser) {
        let store = InMemoryTokenStore::new();
        let user = store.insert(AuthUser::new(1, "test@example.com", "Test User")).unwrap();
        let authenticator = Authenticator::new(RememberConfig::default(), store).unwrap();
        (authenticator, user)
    }

    #[tokio::test]
    async fn test_resolution_is_memoized() {
        let (authenticator, user) = authenticator();
        let request = RequestContext::new().with_cookie("remember_token", user.remember_token());
        let mut session = authenticator.session(&request);

        assert_eq!(session.current_user().await.unwrap().map(|u| u.id), Some(1));

        // rotating the stored token does not affect the cached resolution
        authenticator.store().forget_token(&user).await.unwrap();
        assert!(session.signed_in().await.unwrap());
    }

    #[tokio::test]
    async fn test_staged_cookie_flushed_once() {
        let (authenticator, user) = authenticator();
        let request = RequestContext::new();
        let mut session = authenticator.session(&request);

        assert!(!session.has_staged_cookie());
        session.sign_in(Some(user)).await;
        assert!(session.has_staged_cookie());

        let mut sink = ResponseCookies::new();
        session.add_cookie_to_headers(&mut sink);
        session.add_cookie_to_headers(&mut sink);

        assert_eq!(sink.len(), 1);
        assert!(!session.has_staged_cookie());
    }

    #[tokio::test]
    async fn test_sign_out_after_sign_in_stages_deletion() {
        let (authenticator, user) = authenticator();
        let request = RequestContext::new();
        let mut session = authenticator.session(&request);

        session.sign_in(Some(user)).await;
        session.sign_out().await.unwrap();

        let mut sink = ResponseCookies::new();
        session.add_cookie_to_headers(&mut sink);

        assert_eq!(sink.len(), 1);
        assert!(sink.get("remember_token").unwrap().is_deletion());
    }

    #[tokio::test]
    async fn test_expired_token_resolves_signed_out() {
        let store = InMemoryTokenStore::new();
        let mut user = AuthUser::new(1, "test@example.com", "Test User");
        user.remember_token_expires_at = Some(Utc::now() - chrono::Duration::minutes(1));
        let user = store.insert(user).unwrap();
        let authenticator = Authenticator::new(RememberConfig::default(), store).unwrap();

        let request = RequestContext::new().with_cookie("remember_token", user.remember_token());
        let mut session = authenticator.session(&request);

        assert!(session.signed_out().await.unwrap());
    }
}
