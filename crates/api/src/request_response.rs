// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use phonedesk_persistence::{
    ImportedRow, InternalNumberData, PhoneNumberData, PhoneNumberOwnerData, TicketData, UserData,
    UserTypeData,
};

// ============================================================================
// Authentication
// ============================================================================

/// API request to log in.
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The signed bearer token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// The user's type id.
    pub user_type: i64,
    pub email: String,
    /// The user's display name.
    pub name: String,
}

// ============================================================================
// User Types
// ============================================================================

/// API request to create a user type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateUserTypeRequest {
    pub name: String,
}

/// API request to overwrite a user type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateUserTypeRequest {
    pub id: i64,
    pub name: String,
}

/// A user type as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserTypeInfo {
    pub id: i64,
    pub name: String,
}

impl From<UserTypeData> for UserTypeInfo {
    fn from(row: UserTypeData) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// API request to create a user.
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateUserRequest {
    pub user_name: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub user_type_id: i64,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("user_name", &self.user_name)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("user_type_id", &self.user_type_id)
            .finish_non_exhaustive()
    }
}

/// API request to overwrite a user's profile fields.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateUserRequest {
    pub id: i64,
    pub user_name: String,
    pub name: String,
    pub email: String,
    pub user_type_id: i64,
}

/// API request to replace a user's password.
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdatePasswordRequest {
    pub id: i64,
    pub password: String,
}

impl std::fmt::Debug for UpdatePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdatePasswordRequest")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// A user as returned by the API. The password hash is never included.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub user_name: String,
    pub name: String,
    pub email: String,
    pub user_type_id: i64,
}

impl From<UserData> for UserInfo {
    fn from(row: UserData) -> Self {
        Self {
            id: row.id,
            user_name: row.user_name,
            name: row.name,
            email: row.email,
            user_type_id: row.user_type_id,
        }
    }
}

// ============================================================================
// Phone Number Owners
// ============================================================================

/// API request to create a phone number owner.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateOwnerRequest {
    pub name: String,
}

/// API request to rename a phone number owner.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateOwnerRequest {
    pub id: i64,
    pub name: String,
}

/// A phone number owner as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OwnerInfo {
    pub id: i64,
    pub name: String,
}

impl From<PhoneNumberOwnerData> for OwnerInfo {
    fn from(row: PhoneNumberOwnerData) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

// ============================================================================
// Phone Numbers
// ============================================================================

/// API request to create a phone number.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreatePhoneNumberRequest {
    pub number: String,
    pub phone_number_owner_id: i64,
}

/// API request to overwrite a phone number.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdatePhoneNumberRequest {
    pub id: i64,
    pub number: String,
    pub phone_number_owner_id: i64,
}

/// A phone number as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PhoneNumberInfo {
    pub id: i64,
    pub number: String,
    pub phone_number_owner_id: i64,
}

impl From<PhoneNumberData> for PhoneNumberInfo {
    fn from(row: PhoneNumberData) -> Self {
        Self {
            id: row.id,
            number: row.number,
            phone_number_owner_id: row.phone_number_owner_id,
        }
    }
}

// ============================================================================
// Internal Numbers
// ============================================================================

/// API request to create an internal number.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateInternalNumberRequest {
    pub number: String,
    pub path: String,
    pub phone_number_id: i64,
}

/// API request to overwrite an internal number.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateInternalNumberRequest {
    pub id: i64,
    pub number: String,
    pub path: String,
    pub phone_number_id: i64,
}

/// An internal number as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InternalNumberInfo {
    pub id: i64,
    pub number: String,
    pub path: String,
    pub phone_number_id: i64,
}

impl From<InternalNumberData> for InternalNumberInfo {
    fn from(row: InternalNumberData) -> Self {
        Self {
            id: row.id,
            number: row.number,
            path: row.path,
            phone_number_id: row.phone_number_id,
        }
    }
}

// ============================================================================
// Tickets
// ============================================================================

/// API request to open a ticket.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateTicketRequest {
    pub description: String,
    pub user_id: i64,
}

/// API request to overwrite a ticket.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateTicketRequest {
    pub id: i64,
    pub description: String,
    pub user_id: i64,
}

/// A ticket as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TicketInfo {
    pub id: i64,
    pub description: String,
    pub user_id: i64,
}

impl From<TicketData> for TicketInfo {
    fn from(row: TicketData) -> Self {
        Self {
            id: row.id,
            description: row.description,
            user_id: row.user_id,
        }
    }
}

// ============================================================================
// Shared
// ============================================================================

/// API response for a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteResponse {
    pub detail: String,
}

impl Default for DeleteResponse {
    fn default() -> Self {
        Self {
            detail: String::from("Item deleted successfully"),
        }
    }
}

// ============================================================================
// CSV Transfer
// ============================================================================

/// Outcome of one imported CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportRowStatus {
    /// Every write for the row committed.
    Success,
    /// Nothing from the row was written.
    Failed,
}

/// Per-row result of a CSV import.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportRowResult {
    /// 1-based data row number (the header row is not counted).
    pub row_number: usize,
    pub status: ImportRowStatus,
    pub owner_id: Option<i64>,
    pub phone_number_id: Option<i64>,
    pub internal_number_id: Option<i64>,
    /// Whether the owner was created by this row rather than reused.
    pub owner_created: bool,
    /// Why the row failed, if it did.
    pub error: Option<String>,
}

impl ImportRowResult {
    /// Builds a successful row result from the stored ids.
    #[must_use]
    pub const fn success(row_number: usize, imported: &ImportedRow) -> Self {
        Self {
            row_number,
            status: ImportRowStatus::Success,
            owner_id: Some(imported.owner_id),
            phone_number_id: Some(imported.phone_number_id),
            internal_number_id: imported.internal_number_id,
            owner_created: imported.owner_created,
            error: None,
        }
    }

    /// Builds a failed row result.
    #[must_use]
    pub const fn failed(row_number: usize, error: String) -> Self {
        Self {
            row_number,
            status: ImportRowStatus::Failed,
            owner_id: None,
            phone_number_id: None,
            internal_number_id: None,
            owner_created: false,
            error: Some(error),
        }
    }
}

/// API response for a CSV import.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportSummary {
    /// A human-readable summary line.
    pub detail: String,
    pub total_rows: usize,
    pub successful_count: usize,
    pub failed_count: usize,
    pub results: Vec<ImportRowResult>,
}

impl ImportSummary {
    /// Tallies per-row results into a summary.
    #[must_use]
    pub fn from_results(results: Vec<ImportRowResult>) -> Self {
        let total_rows: usize = results.len();
        let successful_count: usize = results
            .iter()
            .filter(|r| r.status == ImportRowStatus::Success)
            .count();
        let failed_count: usize = total_rows - successful_count;
        Self {
            detail: format!("Imported {successful_count} of {total_rows} rows"),
            total_rows,
            successful_count,
            failed_count,
            results,
        }
    }
}

/// A CSV document produced by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested download name, e.g. `phone_numbers.csv`.
    pub filename: String,
    /// The serialized CSV, header row included.
    pub body: String,
}
