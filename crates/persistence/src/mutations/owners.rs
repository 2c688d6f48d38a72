// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Phone number owner mutations.

use diesel::dsl::exists;
use diesel::prelude::*;
use phonedesk_domain::NewPhoneNumberOwner;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::PhoneNumberOwnerData;
use crate::diesel_schema::{phone_number_owners, phone_numbers};
use crate::error::PersistenceError;

backend_fn! {
/// Creates an owner and returns the stored row.
///
/// # Errors
///
/// Returns an error if another owner already has this name or the insert fails.
pub fn create_owner(
    conn: &mut _,
    owner: &NewPhoneNumberOwner,
) -> Result<PhoneNumberOwnerData, PersistenceError> {
    info!(name = %owner.name, "Creating phone number owner");

    conn.transaction(|conn| {
        let name_taken: bool = diesel::select(exists(
            phone_number_owners::table.filter(phone_number_owners::name.eq(&owner.name)),
        ))
        .get_result(conn)?;
        if name_taken {
            return Err(PersistenceError::Duplicate {
                entity: String::from("phone number owner"),
                field: String::from("name"),
                value: owner.name.clone(),
            });
        }

        diesel::insert_into(phone_number_owners::table)
            .values(phone_number_owners::name.eq(&owner.name))
            .execute(conn)?;

        let id: i64 = conn.get_last_insert_rowid()?;
        let row: PhoneNumberOwnerData = phone_number_owners::table
            .find(id)
            .select(PhoneNumberOwnerData::as_select())
            .first(conn)?;

        info!(id, "Phone number owner created");
        Ok(row)
    })
}
}

backend_fn! {
/// Renames an existing owner.
///
/// # Errors
///
/// Returns an error if:
/// - No owner has this id (nothing is written)
/// - Another owner already has the new name
/// - The database operation fails
pub fn update_owner(
    conn: &mut _,
    id: i64,
    owner: &NewPhoneNumberOwner,
) -> Result<PhoneNumberOwnerData, PersistenceError> {
    info!(id, name = %owner.name, "Updating phone number owner");

    conn.transaction(|conn| {
        let found: bool =
            diesel::select(exists(phone_number_owners::table.find(id))).get_result(conn)?;
        if !found {
            return Err(PersistenceError::EntityNotFound {
                entity: "phone number owner",
                id,
            });
        }

        let name_taken: bool = diesel::select(exists(
            phone_number_owners::table
                .filter(phone_number_owners::name.eq(&owner.name))
                .filter(phone_number_owners::id.ne(id)),
        ))
        .get_result(conn)?;
        if name_taken {
            return Err(PersistenceError::Duplicate {
                entity: String::from("phone number owner"),
                field: String::from("name"),
                value: owner.name.clone(),
            });
        }

        diesel::update(phone_number_owners::table.find(id))
            .set(phone_number_owners::name.eq(&owner.name))
            .execute(conn)?;

        Ok(phone_number_owners::table
            .find(id)
            .select(PhoneNumberOwnerData::as_select())
            .first(conn)?)
    })
}
}

backend_fn! {
/// Deletes an owner that has no phone numbers.
///
/// # Errors
///
/// Returns an error if:
/// - No owner has this id
/// - Phone numbers are still registered to the owner
/// - The database operation fails
pub fn delete_owner(conn: &mut _, id: i64) -> Result<(), PersistenceError> {
    info!(id, "Attempting to delete phone number owner");

    conn.transaction(|conn| {
        let found: bool =
            diesel::select(exists(phone_number_owners::table.find(id))).get_result(conn)?;
        if !found {
            return Err(PersistenceError::EntityNotFound {
                entity: "phone number owner",
                id,
            });
        }

        let dependent_ids: Vec<i64> = phone_numbers::table
            .filter(phone_numbers::phone_number_owner_id.eq(id))
            .select(phone_numbers::id)
            .order(phone_numbers::id.asc())
            .load(conn)?;
        if !dependent_ids.is_empty() {
            return Err(PersistenceError::Referenced {
                entity: "phone number owner",
                id,
                dependent: "phone numbers",
                dependent_ids,
            });
        }

        diesel::delete(phone_number_owners::table.find(id)).execute(conn)?;
        info!(id, "Deleted phone number owner");
        Ok(())
    })
}
}
