use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignInSucceeded {
        user_id: i64,
        at: DateTime<Utc>,
    },
    SignInRejected {
        /// `None` when `sign_in` was called without a user.
        user_id: Option<i64>,
        reason: String,
        at: DateTime<Utc>,
    },
    SignedOut {
        /// `None` when no user was signed in.
        user_id: Option<i64>,
        at: DateTime<Utc>,
    },
}

impl AuthEvent {
    /// Dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignInSucceeded { .. } => "auth.sign_in.success",
            Self::SignInRejected { .. } => "auth.sign_in.rejected",
            Self::SignedOut { .. } => "auth.sign_out",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SignInSucceeded { at, .. }
            | Self::SignInRejected { at, .. }
            | Self::SignedOut { at, .. } => *at,
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        match self {
            Self::SignInSucceeded { user_id, .. } => Some(*user_id),
            Self::SignInRejected { user_id, .. } | Self::SignedOut { user_id, .. } => *user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            AuthEvent::SignInSucceeded { user_id: 1, at: now }.name(),
            "auth.sign_in.success"
        );
        assert_eq!(
            AuthEvent::SignInRejected {
                user_id: Some(1),
                reason: "Account locked".to_owned(),
                at: now
            }
            .name(),
            "auth.sign_in.rejected"
        );
        assert_eq!(
            AuthEvent::SignedOut { user_id: None, at: now }.name(),
            "auth.sign_out"
        );
    }

    #[test]
    fn test_event_accessors() {
        let now = Utc::now();
        let event = AuthEvent::SignInRejected {
            user_id: None,
            reason: "No user to sign in".to_owned(),
            at: now,
        };

        assert_eq!(event.timestamp(), now);
        assert_eq!(event.user_id(), None);
        assert_eq!(AuthEvent::SignInSucceeded { user_id: 9, at: now }.user_id(), Some(9));
    }
}
