// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Phone number owner queries.

use diesel::prelude::*;
use tracing::debug;

use super::LIKE_ESCAPE;
use crate::data_models::PhoneNumberOwnerData;
use crate::diesel_schema::phone_number_owners;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves an owner by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the owner is not found.
pub fn get_owner(conn: &mut _, id: i64) -> Result<Option<PhoneNumberOwnerData>, PersistenceError> {
    debug!(id, "Looking up phone number owner");

    let result: Result<PhoneNumberOwnerData, diesel::result::Error> = phone_number_owners::table
        .find(id)
        .select(PhoneNumberOwnerData::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists owners in id order, optionally capped at `limit` rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_owners(
    conn: &mut _,
    limit: Option<i64>,
) -> Result<Vec<PhoneNumberOwnerData>, PersistenceError> {
    let mut query = phone_number_owners::table
        .select(PhoneNumberOwnerData::as_select())
        .order(phone_number_owners::id.asc())
        .into_boxed();
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    Ok(query.load(conn)?)
}
}

backend_fn! {
/// Finds owners whose name matches a `LIKE` pattern, in storage order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_owners_by_name(
    conn: &mut _,
    pattern: &str,
    limit: i64,
) -> Result<Vec<PhoneNumberOwnerData>, PersistenceError> {
    debug!(pattern, "Searching phone number owners by name");

    Ok(phone_number_owners::table
        .filter(phone_number_owners::name.like(pattern).escape(LIKE_ESCAPE))
        .select(PhoneNumberOwnerData::as_select())
        .limit(limit)
        .load(conn)?)
}
}
