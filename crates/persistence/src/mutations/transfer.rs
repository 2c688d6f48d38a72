// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-row writes for CSV bulk import.
//!
//! Each row is its own transaction: the owner lookup or create, the phone
//! number insert, and the optional internal number insert either all commit
//! or none do. A failed row never leaves an orphaned phone number behind.

use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::ImportedRow;
use crate::diesel_schema::{internal_numbers, phone_number_owners, phone_numbers};
use crate::error::PersistenceError;

backend_fn! {
/// Writes one import row.
///
/// The owner is resolved by exact name and created when absent. A phone
/// number is always created; an internal number is created too when
/// `internal` carries its `(number, path)`.
///
/// # Errors
///
/// Returns an error if any insert fails; the row is rolled back.
pub fn import_directory_row(
    conn: &mut _,
    number: &str,
    owner_name: &str,
    internal: Option<(&str, &str)>,
) -> Result<ImportedRow, PersistenceError> {
    conn.transaction(|conn| {
        let existing_owner: Option<i64> = phone_number_owners::table
            .filter(phone_number_owners::name.eq(owner_name))
            .select(phone_number_owners::id)
            .first(conn)
            .optional()?;

        let (owner_id, owner_created): (i64, bool) = if let Some(id) = existing_owner {
            debug!(owner_id = id, owner_name, "Reusing existing owner");
            (id, false)
        } else {
            diesel::insert_into(phone_number_owners::table)
                .values(phone_number_owners::name.eq(owner_name))
                .execute(conn)?;
            let id: i64 = conn.get_last_insert_rowid()?;
            info!(owner_id = id, owner_name, "Created owner during import");
            (id, true)
        };

        diesel::insert_into(phone_numbers::table)
            .values((
                phone_numbers::number.eq(number),
                phone_numbers::phone_number_owner_id.eq(owner_id),
            ))
            .execute(conn)?;
        let phone_number_id: i64 = conn.get_last_insert_rowid()?;

        let internal_number_id: Option<i64> = match internal {
            Some((internal_number, path)) => {
                diesel::insert_into(internal_numbers::table)
                    .values((
                        internal_numbers::number.eq(internal_number),
                        internal_numbers::path.eq(path),
                        internal_numbers::phone_number_id.eq(phone_number_id),
                    ))
                    .execute(conn)?;
                Some(conn.get_last_insert_rowid()?)
            }
            None => None,
        };

        Ok(ImportedRow {
            owner_id,
            owner_created,
            phone_number_id,
            internal_number_id,
        })
    })
}
}
