//! Password hashing and registration policy checks

use crate::error::{Error, Result};
use regex::Regex;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check that a user id is lowercase-alphanumeric only
pub fn validate_user_id(user_id: &str) -> Result<()> {
    // Compile-time constant pattern; failing to parse it is a bug.
    let re = Regex::new(r"^[a-z0-9]+$").expect("invalid user id pattern");

    if re.is_match(user_id) {
        Ok(())
    } else {
        Err(Error::InvalidUserId)
    }
}

/// Check the registration password policy: minimum length and a matching
/// confirmation field.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(Error::WeakPassword);
    }
    if password != confirmation {
        return Err(Error::PasswordMismatch);
    }
    Ok(())
}

/// Hash a password with bcrypt at the configured work factor
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    let hashed = bcrypt::hash(password, cost)?;
    Ok(hashed)
}

/// Verify a password against a stored bcrypt hash. The comparison is
/// constant-time inside bcrypt.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let matches = bcrypt::verify(password, hash)?;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the hashing tests fast; production cost comes from config.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_valid_user_ids() {
        assert!(validate_user_id("alice1").is_ok());
        assert!(validate_user_id("bob").is_ok());
        assert!(validate_user_id("0x9").is_ok());
    }

    #[test]
    fn test_invalid_user_ids() {
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("Alice").is_err());
        assert!(validate_user_id("user name").is_err());
        assert!(validate_user_id("user_1").is_err());
        assert!(validate_user_id("유저").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_new_password("secret", "secret").is_ok());
        assert!(matches!(
            validate_new_password("short", "short"),
            Err(Error::WeakPassword)
        ));
        assert!(matches!(
            validate_new_password("secret", "secre7"),
            Err(Error::PasswordMismatch)
        ));
    }

    #[test]
    fn test_length_checked_before_confirmation() {
        // A short password reports WeakPassword even when the confirmation
        // also differs.
        assert!(matches!(
            validate_new_password("short", "other"),
            Err(Error::WeakPassword)
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter22", TEST_COST).expect("hashing failed");
        assert_ne!(hash, "hunter22"); // raw password never stored
        assert!(verify_password("hunter22", &hash).expect("verify failed"));
        assert!(!verify_password("hunter23", &hash).expect("verify failed"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("hunter22", TEST_COST).expect("hashing failed");
        let b = hash_password("hunter22", TEST_COST).expect("hashing failed");
        assert_ne!(a, b);
    }
}
