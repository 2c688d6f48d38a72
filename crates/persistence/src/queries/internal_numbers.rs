// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Internal number queries.

use diesel::prelude::*;
use tracing::debug;

use super::LIKE_ESCAPE;
use crate::data_models::InternalNumberData;
use crate::diesel_schema::{internal_numbers, phone_number_owners, phone_numbers};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves an internal number by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the internal number is not found.
pub fn get_internal_number(
    conn: &mut _,
    id: i64,
) -> Result<Option<InternalNumberData>, PersistenceError> {
    debug!(id, "Looking up internal number");

    let result: Result<InternalNumberData, diesel::result::Error> = internal_numbers::table
        .find(id)
        .select(InternalNumberData::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists internal numbers in id order, optionally capped at `limit` rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_internal_numbers(
    conn: &mut _,
    limit: Option<i64>,
) -> Result<Vec<InternalNumberData>, PersistenceError> {
    let mut query = internal_numbers::table
        .select(InternalNumberData::as_select())
        .order(internal_numbers::id.asc())
        .into_boxed();
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    Ok(query.load(conn)?)
}
}

backend_fn! {
/// Finds internal numbers whose phone number's owner name matches a `LIKE` pattern.
///
/// Joins through `phone_numbers` to `phone_number_owners`. Rows come back
/// in storage order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_internal_numbers_by_owner_name(
    conn: &mut _,
    pattern: &str,
    limit: i64,
) -> Result<Vec<InternalNumberData>, PersistenceError> {
    debug!(pattern, "Searching internal numbers by owner name");

    Ok(internal_numbers::table
        .inner_join(phone_numbers::table.inner_join(phone_number_owners::table))
        .filter(phone_number_owners::name.like(pattern).escape(LIKE_ESCAPE))
        .select(InternalNumberData::as_select())
        .limit(limit)
        .load(conn)?)
}
}
