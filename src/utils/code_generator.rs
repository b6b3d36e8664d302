//! Short code generation.
//!
//! A code is derived in four steps:
//!
//! 1. 32 symbols are drawn uniformly from a 62-character alphanumeric alphabet
//!    using OS entropy
//! 2. a timestamp salt (`uniqid` style: seconds and a sub-second component in
//!    hex) is appended
//! 3. the salted string is hashed with SHA-256
//! 4. the digest is encoded as URL-safe base64 and cut to [`CODE_LENGTH`]
//!
//! Codes are not unique by construction; the registry's uniqueness
//! constraint is what guarantees a code maps to at most one URL.

use crate::error::AppError;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::json;
use sha2::{Digest, Sha256};

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 9;

/// Number of random symbols fed into the digest.
const SEED_LENGTH: usize = 32;

const SEED_ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Bytes at or above this value are rejected so that `byte % 62` is uniform.
const REJECTION_LIMIT: u8 = 248;

/// Source of short codes.
///
/// Implementations must be stateless or internally synchronized: one
/// generator is shared by every request.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a candidate short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Entropy`] if the secure random source fails.
    /// Callers must treat this as fatal and never retry.
    fn generate(&self) -> Result<String, AppError>;
}

/// Production generator: random seed + timestamp salt, hashed with SHA-256.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256CodeGenerator;

impl Sha256CodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for Sha256CodeGenerator {
    fn generate(&self) -> Result<String, AppError> {
        let seed = random_seed().map_err(|e| {
            tracing::error!(error = %e, "Secure random source failed");
            AppError::entropy(
                "Secure random source unavailable",
                json!({ "reason": e.to_string() }),
            )
        })?;

        Ok(digest_code(&salt(&seed, Utc::now())))
    }
}

/// Draws [`SEED_LENGTH`] symbols uniformly from [`SEED_ALPHABET`].
fn random_seed() -> Result<String, getrandom::Error> {
    let mut seed = String::with_capacity(SEED_LENGTH);
    let mut buffer = [0u8; SEED_LENGTH * 2];

    while seed.len() < SEED_LENGTH {
        getrandom::fill(&mut buffer)?;

        let missing = SEED_LENGTH - seed.len();
        seed.extend(
            buffer
                .iter()
                .filter(|&&byte| byte < REJECTION_LIMIT)
                .take(missing)
                .map(|&byte| SEED_ALPHABET[usize::from(byte) % SEED_ALPHABET.len()] as char),
        );
    }

    Ok(seed)
}

/// Appends the `uniqid` salt: 8 hex digits of seconds, 5 of sub-second time.
fn salt(prefix: &str, now: DateTime<Utc>) -> String {
    let seconds = now.timestamp();
    let sub_second = now.timestamp_nanos_opt().unwrap_or_default().rem_euclid(0x100000);

    format!("{prefix}{seconds:08x}{sub_second:05x}")
}

fn digest_code(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(CODE_LENGTH);
    encoded
}

/// Returns true if `c` can appear in a generated code.
pub fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
