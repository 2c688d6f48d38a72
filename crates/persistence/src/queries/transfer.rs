// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Joined queries feeding CSV export.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{InternalNumberExportRow, PhoneNumberExportRow};
use crate::diesel_schema::{internal_numbers, phone_number_owners, phone_numbers};
use crate::error::PersistenceError;

backend_fn! {
/// Loads every phone number with its owner's name, in phone number id order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn export_phone_numbers(conn: &mut _) -> Result<Vec<PhoneNumberExportRow>, PersistenceError> {
    let rows: Vec<PhoneNumberExportRow> = phone_numbers::table
        .inner_join(phone_number_owners::table)
        .select((phone_numbers::number, phone_number_owners::name))
        .order(phone_numbers::id.asc())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded phone numbers for export");
    Ok(rows)
}
}

backend_fn! {
/// Loads every internal number with its phone number and owner name, in
/// internal number id order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn export_internal_numbers(
    conn: &mut _,
) -> Result<Vec<InternalNumberExportRow>, PersistenceError> {
    let rows: Vec<InternalNumberExportRow> = internal_numbers::table
        .inner_join(phone_numbers::table.inner_join(phone_number_owners::table))
        .select((
            internal_numbers::number,
            internal_numbers::path,
            phone_numbers::number,
            phone_number_owners::name,
        ))
        .order(internal_numbers::id.asc())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded internal numbers for export");
    Ok(rows)
}
}
