//! Password hashing and verification
//!
//! Argon2id with a random per-password salt.

use std::sync::LazyLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Hash verified when the account does not exist, so unknown and known
/// identifiers take the same time to reject.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("nutribite-dummy-password").ok());

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored PHC string
///
/// # Errors
/// Returns an error if the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash a password after checking its strength
    ///
    /// # Errors
    /// Returns a validation error for weak passwords, or an internal error if hashing fails
    pub fn hash_new(&self, password: &str) -> Result<String, AppError> {
        validate_password_strength(password)?;
        hash_password(password)
    }

    /// Check a login attempt.
    ///
    /// `stored` is `None` when no account matched; a dummy hash is verified
    /// anyway and the attempt fails with `InvalidCredentials`.
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` when the password does not match
    pub fn check_login(&self, password: &str, stored: Option<&str>) -> Result<(), AppError> {
        let Some(hash) = stored else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify_password(password, dummy);
            }
            return Err(AppError::InvalidCredentials);
        };

        if verify_password(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Validate password strength
///
/// At least 8 characters with an uppercase letter, a lowercase letter and a digit.
///
/// # Errors
/// Returns a validation error naming the first unmet rule
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let rules: [(bool, &str); 4] = [
        (
            password.chars().count() >= 8,
            "Password must be at least 8 characters long",
        ),
        (
            password.chars().any(char::is_uppercase),
            "Password must contain at least one uppercase letter",
        ),
        (
            password.chars().any(char::is_lowercase),
            "Password must contain at least one lowercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one digit",
        ),
    ];

    match rules.iter().find(|(ok, _)| !ok) {
        Some((_, msg)) => Err(AppError::Validation((*msg).to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Lettuce2024").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Lettuce2024", &hash).unwrap());
        assert!(!verify_password("lettuce2024", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_check_login() {
        let service = PasswordService::new();
        let hash = service.hash_new("Broccoli42").unwrap();

        assert!(service.check_login("Broccoli42", Some(&hash)).is_ok());
        assert!(matches!(
            service.check_login("Broccoli43", Some(&hash)),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            service.check_login("Broccoli42", None),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hash_new_enforces_strength() {
        let service = PasswordService::new();
        assert!(matches!(service.hash_new("weak"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_password_strength() {
        assert!(validate_password_strength("SecurePass1").is_ok());

        let cases = [
            ("Short1", "8 characters"),
            ("lowercase123", "uppercase"),
            ("UPPERCASE123", "lowercase"),
            ("NoDigitsHere", "digit"),
        ];
        for (password, expected) in cases {
            match validate_password_strength(password) {
                Err(AppError::Validation(msg)) => assert!(msg.contains(expected), "{password}"),
                other => panic!("{password}: unexpected {other:?}"),
            }
        }
    }
}
