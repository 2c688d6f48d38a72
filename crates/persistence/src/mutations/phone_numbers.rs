// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Phone number mutations.

use diesel::dsl::exists;
use diesel::prelude::*;
use phonedesk_domain::NewPhoneNumber;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::PhoneNumberData;
use crate::diesel_schema::{internal_numbers, phone_number_owners, phone_numbers};
use crate::error::PersistenceError;

backend_fn! {
/// Creates a phone number bound to an existing owner.
///
/// # Errors
///
/// Returns an error if the owner does not exist or the insert fails.
pub fn create_phone_number(
    conn: &mut _,
    phone_number: &NewPhoneNumber,
) -> Result<PhoneNumberData, PersistenceError> {
    info!(
        number = %phone_number.number,
        owner_id = phone_number.phone_number_owner_id,
        "Creating phone number"
    );

    conn.transaction(|conn| {
        let owner_found: bool = diesel::select(exists(
            phone_number_owners::table.find(phone_number.phone_number_owner_id),
        ))
        .get_result(conn)?;
        if !owner_found {
            return Err(PersistenceError::MissingReference {
                entity: "phone number owner",
                id: phone_number.phone_number_owner_id,
            });
        }

        diesel::insert_into(phone_numbers::table)
            .values((
                phone_numbers::number.eq(&phone_number.number),
                phone_numbers::phone_number_owner_id.eq(phone_number.phone_number_owner_id),
            ))
            .execute(conn)?;

        let id: i64 = conn.get_last_insert_rowid()?;
        let row: PhoneNumberData = phone_numbers::table
            .find(id)
            .select(PhoneNumberData::as_select())
            .first(conn)?;

        info!(id, "Phone number created");
        Ok(row)
    })
}
}

backend_fn! {
/// Overwrites the number and owner of an existing phone number.
///
/// # Errors
///
/// Returns an error if:
/// - No phone number has this id (nothing is written)
/// - The new owner does not exist
/// - The database operation fails
pub fn update_phone_number(
    conn: &mut _,
    id: i64,
    phone_number: &NewPhoneNumber,
) -> Result<PhoneNumberData, PersistenceError> {
    info!(id, number = %phone_number.number, "Updating phone number");

    conn.transaction(|conn| {
        let found: bool = diesel::select(exists(phone_numbers::table.find(id))).get_result(conn)?;
        if !found {
            return Err(PersistenceError::EntityNotFound {
                entity: "phone number",
                id,
            });
        }

        let owner_found: bool = diesel::select(exists(
            phone_number_owners::table.find(phone_number.phone_number_owner_id),
        ))
        .get_result(conn)?;
        if !owner_found {
            return Err(PersistenceError::MissingReference {
                entity: "phone number owner",
                id: phone_number.phone_number_owner_id,
            });
        }

        diesel::update(phone_numbers::table.find(id))
            .set((
                phone_numbers::number.eq(&phone_number.number),
                phone_numbers::phone_number_owner_id.eq(phone_number.phone_number_owner_id),
            ))
            .execute(conn)?;

        Ok(phone_numbers::table
            .find(id)
            .select(PhoneNumberData::as_select())
            .first(conn)?)
    })
}
}

backend_fn! {
/// Deletes a phone number that no internal number routes to.
///
/// # Errors
///
/// Returns an error if:
/// - No phone number has this id
/// - Internal numbers still point at it
/// - The database operation fails
pub fn delete_phone_number(conn: &mut _, id: i64) -> Result<(), PersistenceError> {
    info!(id, "Attempting to delete phone number");

    conn.transaction(|conn| {
        let found: bool = diesel::select(exists(phone_numbers::table.find(id))).get_result(conn)?;
        if !found {
            return Err(PersistenceError::EntityNotFound {
                entity: "phone number",
                id,
            });
        }

        let dependent_ids: Vec<i64> = internal_numbers::table
            .filter(internal_numbers::phone_number_id.eq(id))
            .select(internal_numbers::id)
            .order(internal_numbers::id.asc())
            .load(conn)?;
        if !dependent_ids.is_empty() {
            return Err(PersistenceError::Referenced {
                entity: "phone number",
                id,
                dependent: "internal numbers",
                dependent_ids,
            });
        }

        diesel::delete(phone_numbers::table.find(id)).execute(conn)?;
        info!(id, "Deleted phone number");
        Ok(())
    })
}
}
