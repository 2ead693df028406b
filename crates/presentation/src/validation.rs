//! Client-side form validation.
//!
//! These errors never leave a view-model: they are rendered inline in the
//! state or turned into an error effect.

use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Please select a photo")]
    MissingPhoto,
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("First name is required")]
    FirstNameRequired,
    #[error("Last name is required")]
    LastNameRequired,
    #[error("Please confirm your password")]
    ConfirmPasswordRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please set when you fished")]
    FishedAtRequired,
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        Err(ValidationError::EmailRequired)
    } else if !email.contains('@') || !email.contains('.') {
        Err(ValidationError::InvalidEmail)
    } else {
        Ok(())
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        Err(ValidationError::PasswordRequired)
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Err(ValidationError::PasswordTooShort)
    } else {
        Ok(())
    }
}

pub fn validate_required(value: &str, missing: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(missing)
    } else {
        Ok(())
    }
}

/// Parses a weight or length typed by the user; only positive finite
/// decimals are accepted.
pub fn parse_measurement(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Error text for an inline field, `None` when the field is valid.
pub fn field_error(result: Result<(), ValidationError>) -> Option<String> {
    result.err().map(|err| err.to_string())
}
