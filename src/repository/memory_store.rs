//! In-memory remember-token storage.
//!
//! Suitable for development, testing, and single-instance deployments.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::token::TokenStore;
use super::user::{AuthUser, Rememberable};
use crate::{AuthError, RememberConfig};
use crate::crypto::{DEFAULT_TOKEN_LENGTH, generate_remember_token};

/// In-memory token store.
///
/// Users are kept in a `HashMap` keyed by their current remember token,
/// behind a `RwLock`. Clones share the same map.
///
/// # Note
///
/// Users are lost when the process restarts.
#[derive(Clone)]
pub struct InMemoryTokenStore<U = AuthUser> {
    users: Arc<RwLock<HashMap<String, U>>>,
    token_length: usize,
}

impl<U: Rememberable> InMemoryTokenStore<U> {
    pub fn new() -> Self {
        Self::with_token_length(DEFAULT_TOKEN_LENGTH)
    }

    /// Creates a store that generates tokens of `token_length` characters.
    pub fn with_token_length(token_length: usize) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            token_length,
        }
    }

    /// Creates a store that generates tokens of the configured length.
    pub fn from_config(config: &RememberConfig) -> Self {
        Self::with_token_length(config.token_length)
    }

    /// Stores a user under its remember token, generating one if it is empty.
    ///
    /// Returns the user as stored.
    pub fn insert(&self, mut user: U) -> Result<U, AuthError> {
        if user.remember_token().is_empty() {
            let expires_at = user.remember_token_expires_at();
            user.set_remember_token(generate_remember_token(self.token_length), expires_at);
        }

        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::DatabaseError("Lock poisoned".to_owned()))?;
        users.retain(|_, existing| existing.id() != user.id());
        users.insert(user.remember_token().to_owned(), user.clone());

        Ok(user)
    }

    /// Returns the stored user with the given id.
    pub fn find_by_id(&self, id: i64) -> Result<Option<U>, AuthError> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::DatabaseError("Lock poisoned".to_owned()))?;

        Ok(users.values().find(|user| user.id() == id).cloned())
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<U: Rememberable> Default for InMemoryTokenStore<U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<U: Rememberable> TokenStore for InMemoryTokenStore<U> {
    type User = U;

    async fn find_by_remember_token(&self, token: &str) -> Result<Option<U>, AuthError> {
        if token.is_empty() {
            return Ok(None);
        }

        let users = self
            .users
            .read()
            .map_err(|_| AuthError::DatabaseError("Lock poisoned".to_owned()))?;

        Ok(users.get(token).cloned())
    }

    #[allow(clippy::significant_drop_tightening)]
    async fn forget_token(&self, user: &U) -> Result<(), AuthError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::DatabaseError("Lock poisoned".to_owned()))?;

        let current_token = users
            .iter()
            .find(|(_, stored)| stored.id() == user.id())
            .map(|(token, _)| token.clone())
            .ok_or(AuthError::UserNotFound)?;

        let Some(mut stored) = users.remove(&current_token) else {
            return Err(AuthError::UserNotFound);
        };
        let expires_at = stored.remember_token_expires_at();
        stored.set_remember_token(generate_remember_token(self.token_length), expires_at);
        users.insert(stored.remember_token().to_owned(), stored);

        Ok(())
    }
}
