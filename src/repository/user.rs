use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::{DEFAULT_TOKEN_LENGTH, generate_remember_token};

/// A user record that carries a remember token.
///
/// The token is the credential stored in the cookie; rotating it invalidates
/// every cookie issued with the old value.
pub trait Rememberable: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;

    fn remember_token(&self) -> &str;

    fn remember_token_expires_at(&self) -> Option<DateTime<Utc>>;

    fn set_remember_token(&mut self, token: String, expires_at: Option<DateTime<Utc>>);

    /// True once `remember_token_expires_at` has passed. Tokens without an
    /// expiry never expire.
    fn remember_token_expired(&self) -> bool {
        self.remember_token_expires_at()
            .is_some_and(|expires_at| expires_at <= Utc::now())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub remember_token: String,
    pub remember_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuthUser {
    /// Creates a user with a freshly generated remember token.
    pub fn new(id: i64, email: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        AuthUser {
            id,
            email: email.into(),
            name: name.into(),
            remember_token: generate_remember_token(DEFAULT_TOKEN_LENGTH),
            remember_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Rememberable for AuthUser {
    fn id(&self) -> i64 {
        self.id
    }

    fn remember_token(&self) -> &str {
        &self.remember_token
    }

    fn remember_token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.remember_token_expires_at
    }

    fn set_remember_token(&mut self, token: String, expires_at: Option<DateTime<Utc>>) {
        self.remember_token = token;
        self.remember_token_expires_at = expires_at;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_new_user_has_token() {
        let user = AuthUser::new(1, "test@example.com", "Test User");
        assert_eq!(user.remember_token().len(), DEFAULT_TOKEN_LENGTH);
        assert!(!user.remember_token_expired());
    }

    #[test]
    fn test_remember_token_expiry() {
        let mut user = AuthUser::new(1, "test@example.com", "Test User");

        user.set_remember_token("fresh".to_owned(), Some(Utc::now() + Duration::hours(1)));
        assert!(!user.remember_token_expired());

        user.set_remember_token("stale".to_owned(), Some(Utc::now() - Duration::hours(1)));
        assert!(user.remember_token_expired());
        assert_eq!(user.remember_token(), "stale");
    }

    #[test]
    fn test_serialize_skips_token() {
        let user = AuthUser::new(7, "test@example.com", "Test User");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains(&user.remember_token));
        assert!(json.contains("test@example.com"));
    }
}
