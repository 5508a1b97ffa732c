//! Redacting wrapper for the cookie-signing secret.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A secret string that never shows up in logs.
///
/// Holds the key used to sign remember-token cookies. `Debug` and `Display`
/// print `[REDACTED]`; call [`expose_secret`](Self::expose_secret) to reach
/// the bytes.
///
/// # Example
///
/// ```rust
/// use enclave_remember::SecretString;
///
/// let key = SecretString::new("a-cookie-signing-key-of-32-bytes!");
///
/// assert_eq!(format!("{:?}", key), "SecretString([REDACTED])");
/// assert_eq!(key.expose_secret(), "a-cookie-signing-key-of-32-bytes!");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of the secret in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// Serializes as `[REDACTED]`; deserializing keeps the value.
impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString)
    }
}
