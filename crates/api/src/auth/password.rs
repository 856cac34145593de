//! Administrator passwords, stored as Argon2id PHC strings.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Shortest password accepted for the bootstrap administrator.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Compare a sign-in attempt with the stored hash.
///
/// A wrong password is `Ok(false)`, which feeds the lockout counter. `Err`
/// means the stored hash itself is unreadable.
pub fn verify_password(
    password: &str,
    stored_hash: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(stored_hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Reject an `ADMIN_PASSWORD` too weak to protect the front desk.
pub fn validate_admin_password(password: &str) -> Result<(), String> {
    if password.trim().is_empty() {
        return Err("Administrator password must not be blank".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Administrator password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}
