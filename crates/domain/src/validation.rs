// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length, in characters, of any stored text column.
pub const MAX_FIELD_LENGTH: usize = 999;

/// Maximum length, in characters, of a text column carrying a unique index.
pub const MAX_KEY_LENGTH: usize = 768;

/// Validates a required text field.
///
/// The value must contain at least one non-whitespace character and must
/// fit in a storage column.
///
/// # Arguments
///
/// * `field` - The field name reported on failure
/// * `value` - The value to check
///
/// # Errors
///
/// Returns an error if:
/// - The value is empty after trimming
/// - The value exceeds `MAX_FIELD_LENGTH` characters
pub fn validate_required_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }

    check_length(field, value, MAX_FIELD_LENGTH)
}

/// Validates a required text field that is also a natural key.
///
/// # Errors
///
/// Returns an error if the value is empty after trimming or exceeds
/// `MAX_KEY_LENGTH` characters.
pub fn validate_key_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    validate_required_text(field, value)?;
    check_length(field, value, MAX_KEY_LENGTH)
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::FieldTooLong { field, max });
    }
    Ok(())
}

/// Validates an email address.
///
/// Only the coarse shape is checked: a non-empty local part, an `@`, and a
/// non-empty domain part.
///
/// # Errors
///
/// Returns an error if the address is empty, too long, or malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    validate_required_text("email", email)?;

    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(DomainError::InvalidEmail(email.to_string())),
    }
}

/// Validates a foreign key reference.
///
/// # Errors
///
/// Returns an error if the id is not positive.
pub const fn validate_reference(field: &'static str, id: i64) -> Result<(), DomainError> {
    if id <= 0 {
        return Err(DomainError::InvalidReference { field, id });
    }
    Ok(())
}
