// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested row does not exist.
    EntityNotFound {
        /// The entity kind, e.g. `"phone number"`.
        entity: &'static str,
        /// The requested id.
        id: i64,
    },
    /// A natural key is already taken by another row.
    Duplicate {
        /// The entity kind.
        entity: String,
        /// The natural key column.
        field: String,
        /// The conflicting value.
        value: String,
    },
    /// A referenced row does not exist.
    MissingReference {
        /// The referenced entity kind.
        entity: &'static str,
        /// The referenced id.
        id: i64,
    },
    /// The row cannot be deleted while other rows point at it.
    Referenced {
        /// The entity kind being deleted.
        entity: &'static str,
        /// The id of the row being deleted.
        id: i64,
        /// The dependent entity kind.
        dependent: &'static str,
        /// Ids of the dependent rows, ascending.
        dependent_ids: Vec<i64>,
    },
    /// A storage-level foreign key check rejected the write.
    ForeignKeyViolation(String),
    /// Password hashing or verification failed.
    PasswordHashFailed(String),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::EntityNotFound { entity, id } => write!(f, "No {entity} with id {id}"),
            Self::Duplicate {
                entity,
                field,
                value,
            } => write!(f, "A {entity} with {field} '{value}' already exists"),
            Self::MissingReference { entity, id } => {
                write!(f, "Referenced {entity} with id {id} does not exist")
            }
            Self::Referenced {
                entity,
                id,
                dependent,
                dependent_ids,
            } => {
                let ids: Vec<String> = dependent_ids.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "Cannot delete {entity} {id}: still referenced by {dependent} [{}]",
                    ids.join(", ")
                )
            }
            Self::ForeignKeyViolation(msg) => write!(f, "Foreign key violation: {msg}"),
            Self::PasswordHashFailed(msg) => write!(f, "Password hashing failed: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Duplicate {
                    entity: info.table_name().unwrap_or("record").to_string(),
                    field: info.column_name().unwrap_or("key").to_string(),
                    value: info.message().to_string(),
                }
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
