// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User queries.

use diesel::dsl::count_star;
use diesel::prelude::*;
use tracing::debug;

use super::LIKE_ESCAPE;
use crate::data_models::UserData;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a user by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user(conn: &mut _, id: i64) -> Result<Option<UserData>, PersistenceError> {
    debug!(id, "Looking up user");

    let result: Result<UserData, diesel::result::Error> = users::table
        .find(id)
        .select(UserData::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves a user by exact `user_name`.
///
/// The comparison is case-sensitive.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no user has that name.
pub fn get_user_by_user_name(
    conn: &mut _,
    user_name: &str,
) -> Result<Option<UserData>, PersistenceError> {
    debug!(user_name, "Looking up user by user_name");

    let result: Result<UserData, diesel::result::Error> = users::table
        .filter(users::user_name.eq(user_name))
        .select(UserData::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists users in id order, optionally capped at `limit` rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users(conn: &mut _, limit: Option<i64>) -> Result<Vec<UserData>, PersistenceError> {
    let mut query = users::table
        .select(UserData::as_select())
        .order(users::id.asc())
        .into_boxed();
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    Ok(query.load(conn)?)
}
}

backend_fn! {
/// Lists the users of one user type in id order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users_by_type(
    conn: &mut _,
    user_type_id: i64,
) -> Result<Vec<UserData>, PersistenceError> {
    Ok(users::table
        .filter(users::user_type_id.eq(user_type_id))
        .select(UserData::as_select())
        .order(users::id.asc())
        .load(conn)?)
}
}

backend_fn! {
/// Finds users whose display name matches a `LIKE` pattern.
///
/// No ordering is applied; rows come back in storage order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_users_by_name(
    conn: &mut _,
    pattern: &str,
    limit: i64,
) -> Result<Vec<UserData>, PersistenceError> {
    debug!(pattern, "Searching users by name");

    Ok(users::table
        .filter(users::name.like(pattern).escape(LIKE_ESCAPE))
        .select(UserData::as_select())
        .limit(limit)
        .load(conn)?)
}
}

backend_fn! {
/// Counts all users.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(users::table.select(count_star()).first(conn)?)
}
}
