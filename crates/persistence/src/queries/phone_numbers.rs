// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Phone number queries.

use diesel::prelude::*;
use tracing::debug;

use super::LIKE_ESCAPE;
use crate::data_models::PhoneNumberData;
use crate::diesel_schema::phone_numbers;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a phone number by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the phone number is not found.
pub fn get_phone_number(
    conn: &mut _,
    id: i64,
) -> Result<Option<PhoneNumberData>, PersistenceError> {
    debug!(id, "Looking up phone number");

    let result: Result<PhoneNumberData, diesel::result::Error> = phone_numbers::table
        .find(id)
        .select(PhoneNumberData::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists phone numbers in id order, optionally capped at `limit` rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_phone_numbers(
    conn: &mut _,
    limit: Option<i64>,
) -> Result<Vec<PhoneNumberData>, PersistenceError> {
    let mut query = phone_numbers::table
        .select(PhoneNumberData::as_select())
        .order(phone_numbers::id.asc())
        .into_boxed();
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    Ok(query.load(conn)?)
}
}

backend_fn! {
/// Finds phone numbers whose number matches a `LIKE` pattern, in storage order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_phone_numbers_by_number(
    conn: &mut _,
    pattern: &str,
    limit: i64,
) -> Result<Vec<PhoneNumberData>, PersistenceError> {
    debug!(pattern, "Searching phone numbers by number");

    Ok(phone_numbers::table
        .filter(phone_numbers::number.like(pattern).escape(LIKE_ESCAPE))
        .select(PhoneNumberData::as_select())
        .limit(limit)
        .load(conn)?)
}
}
