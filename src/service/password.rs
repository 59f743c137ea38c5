//! bcrypt hashing for stored passwords.
//!
//! The cost is fixed at [`HASH_COST`] for every write. Hashes embed their own cost
//! and salt, so verification keeps working if the constant is raised later.
//! Inputs longer than [`MAX_INPUT_BYTES`] are rejected, never truncated.

use bcrypt::BcryptError;

use crate::error::CredentialError;

/// bcrypt work factor (2^12 rounds).
pub const HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// bcrypt's hard input limit.
pub const MAX_INPUT_BYTES: usize = 72;

fn check_len(plaintext: &str) -> Result<(), BcryptError> {
    if plaintext.len() > MAX_INPUT_BYTES {
        return Err(BcryptError::Truncation(plaintext.len()));
    }
    Ok(())
}

/// Hash `plaintext` on the blocking pool and return the modular-crypt string.
pub async fn hash_password(plaintext: String) -> Result<String, CredentialError> {
    check_len(&plaintext)?;
    // within the limit bcrypt::hash only drops its own NUL terminator
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, HASH_COST)).await??;
    Ok(hashed)
}

/// Check `plaintext` against a stored hash. `Ok(false)` is a mismatch; `Err` means
/// the input or the hash could not be used at all.
pub async fn verify_password(plaintext: String, hash: String) -> Result<bool, CredentialError> {
    check_len(&plaintext)?;
    let matched = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await??;
    Ok(matched)
}
