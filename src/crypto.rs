//! Remember-token generation and cookie value signing.
//!
//! Signed values use HMAC-SHA256 and have the form `{value}.{hex signature}`.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::SecretString;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Generates a random alphanumeric remember token.
///
/// # Example
///
/// ```rust
/// use enclave_remember::crypto::generate_remember_token;
///
/// let token = generate_remember_token(32);
/// assert_eq!(token.len(), 32);
/// ```
pub fn generate_remember_token(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

/// Signs a cookie value, returning `{value}.{signature}`.
pub fn sign_value(value: &str, secret: &SecretString) -> String {
    let signature = compute_hmac(value.as_bytes(), secret.expose_secret().as_bytes());
    format!("{}.{}", value, hex::encode(signature))
}

/// Verifies a signed cookie value and returns the original value.
///
/// Returns `None` when the value is malformed or the signature does not match.
pub fn verify_signed_value(signed: &str, secret: &SecretString) -> Option<String> {
    let (value, signature_hex) = signed.rsplit_once('.')?;

    let actual_sig = hex::decode(signature_hex).ok()?;
    let expected_sig = compute_hmac(value.as_bytes(), secret.expose_secret().as_bytes());

    if constant_time_eq(&expected_sig, &actual_sig) {
        Some(value.to_owned())
    } else {
        log::warn!(
            target: "enclave_remember::cookie",
            "msg=\"signed cookie tampered\", cookie_prefix=\"{}...\"",
            signed.chars().take(8).collect::<String>()
        );
        None
    }
}

fn compute_hmac(message: &[u8], key: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length, so construction cannot fail.
    #[allow(clippy::expect_used)]
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any size");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
