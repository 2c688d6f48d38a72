// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use phonedesk_domain::DomainError;
use phonedesk_persistence::PersistenceError;
use thiserror::Error;
use tracing::error;

use crate::password_policy::PasswordPolicyError;

/// Authentication errors raised by the credential and token service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No user has the given `user_name`.
    #[error("User '{user_name}' not found")]
    UserNotFound {
        /// The requested user name.
        user_name: String,
    },

    /// The password did not match the stored hash.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The token signature is valid but its expiry has passed.
    #[error("Token has expired")]
    TokenExpired,

    /// The token is malformed, has a bad signature, or lacks required claims.
    #[error("Token is invalid: {reason}")]
    TokenInvalid {
        /// Why the token was rejected.
        reason: String,
    },

    /// Signing a new token failed.
    #[error("Failed to issue token: {reason}")]
    TokenIssueFailed {
        /// Why signing failed.
        reason: String,
    },

    /// The user lookup itself failed.
    #[error("Storage error: {0}")]
    Storage(#[from] PersistenceError),
}

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A natural key is already taken.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A delete was refused because other rows still point at the target.
    Referenced {
        /// A human-readable description listing the dependents.
        message: String,
    },
    /// An uploaded file is not valid CSV or lacks required columns.
    InvalidCsvFormat {
        /// The reason the CSV was rejected.
        reason: String,
    },
    /// An uploaded file does not have a `.csv` name.
    UnsupportedFileType {
        /// The rejected file name.
        filename: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Referenced { message } => write!(f, "{message}"),
            Self::InvalidCsvFormat { reason } => write!(f, "Invalid CSV format: {reason}"),
            Self::UnsupportedFileType { filename } => {
                write!(f, "Unsupported file type '{filename}': only .csv files are accepted")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Storage(inner) => translate_persistence_error(inner),
            AuthError::TokenIssueFailed { reason } => Self::Internal {
                message: format!("Failed to issue token: {reason}"),
            },
            other => Self::AuthenticationFailed {
                reason: other.to_string(),
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: String = match &err {
        DomainError::EmptyField { field }
        | DomainError::FieldTooLong { field, .. }
        | DomainError::InvalidReference { field, .. } => (*field).to_string(),
        DomainError::InvalidEmail(_) => String::from("email"),
    };
    ApiError::InvalidInput {
        field,
        message: err.to_string(),
    }
}

/// Translates a persistence error into an API error.
///
/// Storage failures with no client-facing meaning become `Internal` and are
/// logged here, so callers only see a generic message.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EntityNotFound { entity, .. } => ApiError::ResourceNotFound {
            resource_type: entity.to_string(),
            message: err.to_string(),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("record"),
            message,
        },
        PersistenceError::Duplicate { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        PersistenceError::MissingReference { entity, .. } => ApiError::InvalidInput {
            field: format!("{}_id", entity.replace(' ', "_")),
            message: err.to_string(),
        },
        PersistenceError::Referenced { .. } => ApiError::Referenced {
            message: err.to_string(),
        },
        PersistenceError::ForeignKeyViolation(_) => ApiError::Conflict {
            message: err.to_string(),
        },
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::PasswordHashFailed(_) => {
            error!(error = %err, "Storage failure");
            ApiError::Internal {
                message: String::from("A storage error occurred"),
            }
        }
    }
}
