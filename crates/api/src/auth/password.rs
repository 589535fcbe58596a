//! Argon2id hashing for back-office passwords.
//!
//! Hashes are stored in PHC string form so algorithm parameters and salt
//! travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use scidraft_core::error::CoreError;

/// Minimum length of a back-office password.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Hash a plaintext password with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// `Ok(false)` means the password is wrong; `Err` means the stored hash
/// could not be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Reject passwords that are too short or lack both letters and digits.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err(CoreError::Validation(
            "Password must contain both letters and digits".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("lab-admin-2026").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("lab-admin-2026", &hash).unwrap());
        assert!(!verify_password("lab-admin-2025", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn strength_rules() {
        assert!(validate_password_strength("short1").is_err());
        assert!(validate_password_strength("onlylettershere").is_err());
        assert!(validate_password_strength("123456789012").is_err());
        assert!(validate_password_strength("letters4ndd1gits").is_ok());
    }
}
