// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Input records for every directory entity.
//!
//! These carry caller-supplied values only. Surrogate ids of the entity
//! itself are assigned by storage and never appear here.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::validation::{
    validate_email, validate_key_text, validate_reference, validate_required_text,
};

/// A user type (role label) to be created or overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserType {
    pub name: String,
}

impl NewUserType {
    /// Creates a new user type record.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Checks field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or too long.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_required_text("name", &self.name)
    }
}

/// The mutable profile fields of a user.
///
/// Used for updates, which never touch the stored password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_name: String,
    pub name: String,
    pub email: String,
    pub user_type_id: i64,
}

impl UserProfile {
    /// Checks field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if any text field is empty or too long, the email
    /// is malformed, or the user type id is not positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_key_text("user_name", &self.user_name)?;
        validate_required_text("name", &self.name)?;
        validate_email(&self.email)?;
        validate_reference("user_type_id", self.user_type_id)
    }
}

/// A user to be created, including the plaintext password.
///
/// The password is hashed by the persistence layer and never stored as given.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub profile: UserProfile,
    pub password: String,
}

impl NewUser {
    /// Checks field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid or the password is empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.profile.validate()?;
        validate_required_text("password", &self.password)
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("profile", &self.profile)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A phone number owner to be created or overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPhoneNumberOwner {
    pub name: String,
}

impl NewPhoneNumberOwner {
    /// Creates a new owner record.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Checks field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or too long.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_key_text("name", &self.name)
    }
}

/// A phone number bound to an existing owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPhoneNumber {
    pub number: String,
    pub phone_number_owner_id: i64,
}

impl NewPhoneNumber {
    /// Checks field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is empty or too long, or the owner id
    /// is not positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_required_text("number", &self.number)?;
        validate_reference("phone_number_owner_id", self.phone_number_owner_id)
    }
}

/// An internal extension bound to an existing phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInternalNumber {
    pub number: String,
    pub path: String,
    pub phone_number_id: i64,
}

impl NewInternalNumber {
    /// Checks field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the number or path is empty or too long, or the
    /// phone number id is not positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_required_text("number", &self.number)?;
        validate_required_text("path", &self.path)?;
        validate_reference("phone_number_id", self.phone_number_id)
    }
}

/// A support ticket raised by an existing user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    pub description: String,
    pub user_id: i64,
}

impl NewTicket {
    /// Checks field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is empty or too long, or the
    /// user id is not positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_key_text("description", &self.description)?;
        validate_reference("user_id", self.user_id)
    }
}

/// One row of a phone number bulk import.
///
/// The owner is identified by exact name and created on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumberImportRow {
    pub number: String,
    pub owner_name: String,
}

impl PhoneNumberImportRow {
    /// Checks field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if either field is empty or too long.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_required_text("number", &self.number)?;
        validate_key_text("phone_number_owner_name", &self.owner_name)
    }
}

/// One row of an internal number bulk import.
///
/// Each row creates a phone number and the internal extension pointing at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalNumberImportRow {
    pub internal: String,
    pub path: String,
    pub number: String,
    pub owner_name: String,
}

impl InternalNumberImportRow {
    /// Checks field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is empty or too long.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_required_text("internal", &self.internal)?;
        validate_required_text("path", &self.path)?;
        validate_required_text("number", &self.number)?;
        validate_key_text("phone_number_owner_name", &self.owner_name)
    }
}
