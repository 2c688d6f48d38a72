// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{
    internal_numbers, phone_number_owners, phone_numbers, tickets, user_types, users,
};

/// A stored user type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = user_types)]
pub struct UserTypeData {
    pub id: i64,
    pub name: String,
}

/// A stored user, including the bcrypt password hash.
///
/// The hash must never leave the service boundary.
#[derive(Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserData {
    pub id: i64,
    pub user_name: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub user_type_id: i64,
}

impl std::fmt::Debug for UserData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserData")
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("user_type_id", &self.user_type_id)
            .finish_non_exhaustive()
    }
}

/// A stored phone number owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = phone_number_owners)]
pub struct PhoneNumberOwnerData {
    pub id: i64,
    pub name: String,
}

/// A stored phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = phone_numbers)]
pub struct PhoneNumberData {
    pub id: i64,
    pub number: String,
    pub phone_number_owner_id: i64,
}

/// A stored internal extension number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = internal_numbers)]
pub struct InternalNumberData {
    pub id: i64,
    pub number: String,
    pub path: String,
    pub phone_number_id: i64,
}

/// A stored support ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = tickets)]
pub struct TicketData {
    pub id: i64,
    pub description: String,
    pub user_id: i64,
}

/// A phone number joined with its owner's name, as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable)]
pub struct PhoneNumberExportRow {
    pub number: String,
    pub owner_name: String,
}

/// An internal number joined with its phone number and owner, as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable)]
pub struct InternalNumberExportRow {
    pub internal: String,
    pub path: String,
    pub number: String,
    pub owner_name: String,
}

/// Ids written by one committed import row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedRow {
    /// The owner the phone number was bound to.
    pub owner_id: i64,
    /// Whether the owner was created by this row.
    pub owner_created: bool,
    /// The created phone number.
    pub phone_number_id: i64,
    /// The created internal number, for internal number imports.
    pub internal_number_id: Option<i64>,
}
