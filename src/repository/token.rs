use std::sync::Arc;

use async_trait::async_trait;

use super::user::Rememberable;
use crate::AuthError;

/// Persistence for remember tokens.
///
/// Lookups are by exact token match. A missing user is `Ok(None)`; `Err` is
/// reserved for storage faults, which callers propagate unchanged.
#[async_trait]
pub trait TokenStore: Send + Sync {
    type User: Rememberable;

    async fn find_by_remember_token(&self, token: &str) -> Result<Option<Self::User>, AuthError>;

    /// Replaces the user's remember token so cookies carrying the old one no
    /// longer resolve.
    async fn forget_token(&self, user: &Self::User) -> Result<(), AuthError>;
}

#[async_trait]
impl<T> TokenStore for Arc<T>
where
    T: TokenStore + ?Sized,
{
    type User = T::User;

    async fn find_by_remember_token(&self, token: &str) -> Result<Option<Self::User>, AuthError> {
        (**self).find_by_remember_token(token).await
    }

    async fn forget_token(&self, user: &Self::User) -> Result<(), AuthError> {
        (**self).forget_token(user).await
    }
}
