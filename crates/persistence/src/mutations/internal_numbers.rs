// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Internal number mutations.

use diesel::dsl::exists;
use diesel::prelude::*;
use phonedesk_domain::NewInternalNumber;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::InternalNumberData;
use crate::diesel_schema::{internal_numbers, phone_numbers};
use crate::error::PersistenceError;

backend_fn! {
/// Creates an internal number routed to an existing phone number.
///
/// # Errors
///
/// Returns an error if the phone number does not exist or the insert fails.
pub fn create_internal_number(
    conn: &mut _,
    internal_number: &NewInternalNumber,
) -> Result<InternalNumberData, PersistenceError> {
    info!(
        number = %internal_number.number,
        phone_number_id = internal_number.phone_number_id,
        "Creating internal number"
    );

    conn.transaction(|conn| {
        let phone_found: bool = diesel::select(exists(
            phone_numbers::table.find(internal_number.phone_number_id),
        ))
        .get_result(conn)?;
        if !phone_found {
            return Err(PersistenceError::MissingReference {
                entity: "phone number",
                id: internal_number.phone_number_id,
            });
        }

        diesel::insert_into(internal_numbers::table)
            .values((
                internal_numbers::number.eq(&internal_number.number),
                internal_numbers::path.eq(&internal_number.path),
                internal_numbers::phone_number_id.eq(internal_number.phone_number_id),
            ))
            .execute(conn)?;

        let id: i64 = conn.get_last_insert_rowid()?;
        let row: InternalNumberData = internal_numbers::table
            .find(id)
            .select(InternalNumberData::as_select())
            .first(conn)?;

        info!(id, "Internal number created");
        Ok(row)
    })
}
}

backend_fn! {
/// Overwrites an existing internal number.
///
/// # Errors
///
/// Returns an error if:
/// - No internal number has this id (nothing is written)
/// - The new phone number does not exist
/// - The database operation fails
pub fn update_internal_number(
    conn: &mut _,
    id: i64,
    internal_number: &NewInternalNumber,
) -> Result<InternalNumberData, PersistenceError> {
    info!(id, number = %internal_number.number, "Updating internal number");

    conn.transaction(|conn| {
        let found: bool =
            diesel::select(exists(internal_numbers::table.find(id))).get_result(conn)?;
        if !found {
            return Err(PersistenceError::EntityNotFound {
                entity: "internal number",
                id,
            });
        }

        let phone_found: bool = diesel::select(exists(
            phone_numbers::table.find(internal_number.phone_number_id),
        ))
        .get_result(conn)?;
        if !phone_found {
            return Err(PersistenceError::MissingReference {
                entity: "phone number",
                id: internal_number.phone_number_id,
            });
        }

        diesel::update(internal_numbers::table.find(id))
            .set((
                internal_numbers::number.eq(&internal_number.number),
                internal_numbers::path.eq(&internal_number.path),
                internal_numbers::phone_number_id.eq(internal_number.phone_number_id),
            ))
            .execute(conn)?;

        Ok(internal_numbers::table
            .find(id)
            .select(InternalNumberData::as_select())
            .first(conn)?)
    })
}
}

backend_fn! {
/// Deletes an internal number.
///
/// # Errors
///
/// Returns `EntityNotFound` if no internal number has this id.
pub fn delete_internal_number(conn: &mut _, id: i64) -> Result<(), PersistenceError> {
    info!(id, "Attempting to delete internal number");

    let rows_affected: usize = diesel::delete(internal_numbers::table.find(id)).execute(conn)?;
    if rows_affected == 0 {
        return Err(PersistenceError::EntityNotFound {
            entity: "internal number",
            id,
        });
    }

    info!(id, "Deleted internal number");
    Ok(())
}
}
