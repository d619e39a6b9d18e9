//! Validation rules gating submission.
//!
//! Both checks are pure. Failures are returned as values so the caller can
//! attach one message per offending field.

use std::fmt;

use crate::otp::OTP_LENGTH;

/// Form field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Identifier,
    Secret,
    Otp,
}

impl Field {
    /// User-facing label for the field.
    pub fn label(self) -> &'static str {
        match self {
            Field::Identifier => "Email",
            Field::Secret => "Password",
            Field::Otp => "OTP",
        }
    }
}

/// A field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Required value was empty.
    MissingField(Field),
    /// Value present but not in the expected shape.
    InvalidFormat(Field),
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField(field) | ValidationError::InvalidFormat(field) => *field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "{} is required", field.label()),
            ValidationError::InvalidFormat(Field::Otp) => {
                write!(f, "OTP must be exactly {OTP_LENGTH} digits")
            }
            ValidationError::InvalidFormat(field) => write!(f, "{} is invalid", field.label()),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks that both credential fields are present.
///
/// Only presence is checked; the identifier's format is left to the server.
///
/// # Errors
/// Returns one `MissingField` per empty field, identifier first.
pub fn validate_credentials(identifier: &str, secret: &str) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    if identifier.is_empty() {
        errors.push(ValidationError::MissingField(Field::Identifier));
    }
    if secret.is_empty() {
        errors.push(ValidationError::MissingField(Field::Secret));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that `code` is exactly six decimal digits.
///
/// # Errors
/// Returns `InvalidFormat(Field::Otp)` for anything else, including the empty string.
pub fn validate_otp(code: &str) -> Result<(), ValidationError> {
    if code.len() == OTP_LENGTH && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat(Field::Otp))
    }
}
