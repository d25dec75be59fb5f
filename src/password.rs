//! Defines types for handling raw and hashed passwords securely.

use std::fmt::Display;

use zxcvbn::{Score, feedback::Feedback, zxcvbn};

use crate::Error;

/// A password that has been validated for strength.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Create a validated password.
    ///
    /// # Errors
    /// Returns [Error::TooWeak] if the password is considered too weak
    /// (a score of less than three out of four).
    pub fn new(raw_password: &str) -> Result<Self, Error> {
        let entropy = zxcvbn(raw_password, &[]);

        match entropy.score() {
            Score::Three | Score::Four => Ok(Self(raw_password.to_owned())),
            _ => Err(Error::TooWeak(
                entropy
                    .feedback()
                    .unwrap_or(&Feedback::default())
                    .to_string(),
            )),
        }
    }

    /// Create a password without validation.
    ///
    /// This should only be used for passwords that have already been validated,
    /// or in tests.
    pub fn new_unchecked(raw_password: &str) -> Self {
        Self(raw_password.to_owned())
    }
}

impl Display for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the password itself, it could end up in the logs.
        write!(f, "********")
    }
}

/// Hashed and salted password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

/// The default cost for hashing passwords.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

impl PasswordHash {
    /// Hash and salt a validated password.
    ///
    /// `cost` controls how expensive the hash is to compute, see
    /// [DEFAULT_COST].
    ///
    /// # Errors
    /// Returns [Error::HashingError] if an error occurs in the underlying
    /// hashing library.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        bcrypt::hash(password.0, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Create a password hash from a string that is assumed to be a valid
    /// bcrypt hash, e.g. one retrieved from the application database.
    pub fn new_unchecked(password_hash: &str) -> Self {
        Self(password_hash.to_owned())
    }

    /// Hash and salt a raw password, validating it first.
    ///
    /// # Errors
    /// Returns [Error::TooWeak] if the password is too weak, or
    /// [Error::HashingError] if hashing fails.
    pub fn from_raw_password(raw_password: &str, cost: u32) -> Result<Self, Error> {
        let validated_password = ValidatedPassword::new(raw_password)?;
        Self::new(validated_password, cost)
    }

    /// Check whether `raw_password` matches this password hash.
    pub fn verify(&self, raw_password: &str) -> Result<bool, bcrypt::BcryptError> {
        bcrypt::verify(raw_password, &self.0)
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
