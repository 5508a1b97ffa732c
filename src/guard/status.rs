use std::fmt;

/// Outcome of a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus<U> {
    Success(U),
    Failure(FailureReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// `sign_in` was called without a user.
    MissingUser,
    /// A guard vetoed the sign-in.
    Rejected(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MissingUser => write!(f, "No user to sign in"),
            FailureReason::Rejected(message) => write!(f, "{message}"),
        }
    }
}

impl<U> AuthStatus<U> {
    pub fn success(user: U) -> Self {
        AuthStatus::Success(user)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        AuthStatus::Failure(FailureReason::Rejected(message.into()))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthStatus::Success(_))
    }

    pub fn user(&self) -> Option<&U> {
        match self {
            AuthStatus::Success(user) => Some(user),
            AuthStatus::Failure(_) => None,
        }
    }

    pub fn into_user(self) -> Option<U> {
        match self {
            AuthStatus::Success(user) => Some(user),
            AuthStatus::Failure(_) => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match self {
            AuthStatus::Success(_) => None,
            AuthStatus::Failure(reason) => Some(reason),
        }
    }

    /// Message suitable for a flash notice, `None` on success.
    pub fn failure_message(&self) -> Option<String> {
        self.failure_reason().map(ToString::to_string)
    }
}
