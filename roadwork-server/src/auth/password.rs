use hmac::Hmac;
use sha2::Sha256;

use crate::error::{Result, ServerError};

/// PBKDF2 iterations for newly hashed passwords.
pub const PBKDF2_ITERATIONS: u32 = 100_000;
/// Random salt length in bytes.
pub const SALT_LEN: usize = 16;
/// Derived key length in bytes.
pub const HASH_LEN: usize = 32;

const SCHEME: &str = "pbkdf2-sha256";

/// Hash a password for storage in `users.json`.
///
/// Format: `pbkdf2-sha256$<iterations>$<salt_hex>$<hash_hex>`.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt)
        .map_err(|e| ServerError::Internal(format!("salt generation failed: {e}")))?;
    hash_with_salt(password, &salt, PBKDF2_ITERATIONS)
}

pub(crate) fn hash_with_salt(password: &str, salt: &[u8], iterations: u32) -> Result<String> {
    let hash = derive(password, salt, iterations)?;
    Ok(format!(
        "{SCHEME}${iterations}${}${}",
        hex::encode(salt),
        hex::encode(hash)
    ))
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> Result<[u8; HASH_LEN]> {
    let mut output = [0u8; HASH_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, iterations, &mut output)
        .map_err(|e| ServerError::Internal(format!("PBKDF2 derivation failed: {e}")))?;
    Ok(output)
}

/// Check a password against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(iterations), Some(salt_hex), Some(hash_hex), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };

    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    if iterations == 0 {
        return false;
    }
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(hash_hex)) else {
        return false;
    };
    if expected.len() != HASH_LEN {
        return false;
    }

    match derive(password, &salt, iterations) {
        Ok(actual) => constant_time_eq(&actual, &expected),
        Err(_) => false,
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
