// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User type queries.

use diesel::prelude::*;
use tracing::debug;

use super::LIKE_ESCAPE;
use crate::data_models::UserTypeData;
use crate::diesel_schema::user_types;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a user type by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user type is not found.
pub fn get_user_type(conn: &mut _, id: i64) -> Result<Option<UserTypeData>, PersistenceError> {
    debug!(id, "Looking up user type");

    let result: Result<UserTypeData, diesel::result::Error> = user_types::table
        .find(id)
        .select(UserTypeData::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists user types in id order, optionally capped at `limit` rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_user_types(
    conn: &mut _,
    limit: Option<i64>,
) -> Result<Vec<UserTypeData>, PersistenceError> {
    let mut query = user_types::table
        .select(UserTypeData::as_select())
        .order(user_types::id.asc())
        .into_boxed();
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    Ok(query.load(conn)?)
}
}

backend_fn! {
/// Finds user types whose name matches a `LIKE` pattern.
///
/// No ordering is applied; rows come back in storage order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_user_types_by_name(
    conn: &mut _,
    pattern: &str,
    limit: i64,
) -> Result<Vec<UserTypeData>, PersistenceError> {
    debug!(pattern, "Searching user types by name");

    Ok(user_types::table
        .filter(user_types::name.like(pattern).escape(LIKE_ESCAPE))
        .select(UserTypeData::as_select())
        .limit(limit)
        .load(conn)?)
}
}
