// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field is empty or whitespace.
    EmptyField {
        /// The offending field.
        field: &'static str,
    },
    /// A text field exceeds the storage column width.
    FieldTooLong {
        /// The offending field.
        field: &'static str,
        /// The maximum permitted length in characters.
        max: usize,
    },
    /// Email address is not in a usable form.
    InvalidEmail(String),
    /// A referenced id is not a valid surrogate key.
    InvalidReference {
        /// The offending field.
        field: &'static str,
        /// The rejected id.
        id: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "Field '{field}' cannot be empty"),
            Self::FieldTooLong { field, max } => {
                write!(f, "Field '{field}' exceeds {max} characters")
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{email}'"),
            Self::InvalidReference { field, id } => {
                write!(f, "Field '{field}' must be a positive id, got {id}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
