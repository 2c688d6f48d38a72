// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User type mutations.

use diesel::dsl::exists;
use diesel::prelude::*;
use phonedesk_domain::NewUserType;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::UserTypeData;
use crate::diesel_schema::{user_types, users};
use crate::error::PersistenceError;

backend_fn! {
/// Creates a user type and returns the stored row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_user_type(
    conn: &mut _,
    user_type: &NewUserType,
) -> Result<UserTypeData, PersistenceError> {
    info!(name = %user_type.name, "Creating user type");

    conn.transaction(|conn| {
        diesel::insert_into(user_types::table)
            .values(user_types::name.eq(&user_type.name))
            .execute(conn)?;

        let id: i64 = conn.get_last_insert_rowid()?;
        let row: UserTypeData = user_types::table
            .find(id)
            .select(UserTypeData::as_select())
            .first(conn)?;

        info!(id, "User type created");
        Ok(row)
    })
}
}

backend_fn! {
/// Overwrites the name of an existing user type.
///
/// # Errors
///
/// Returns `EntityNotFound` if no user type has this id; nothing is written.
pub fn update_user_type(
    conn: &mut _,
    id: i64,
    user_type: &NewUserType,
) -> Result<UserTypeData, PersistenceError> {
    info!(id, name = %user_type.name, "Updating user type");

    conn.transaction(|conn| {
        let found: bool = diesel::select(exists(user_types::table.find(id))).get_result(conn)?;
        if !found {
            return Err(PersistenceError::EntityNotFound {
                entity: "user type",
                id,
            });
        }

        diesel::update(user_types::table.find(id))
            .set(user_types::name.eq(&user_type.name))
            .execute(conn)?;

        Ok(user_types::table
            .find(id)
            .select(UserTypeData::as_select())
            .first(conn)?)
    })
}
}

backend_fn! {
/// Deletes a user type that no user refers to.
///
/// # Errors
///
/// Returns an error if:
/// - No user type has this id
/// - Users still carry this type
/// - The database operation fails
pub fn delete_user_type(conn: &mut _, id: i64) -> Result<(), PersistenceError> {
    info!(id, "Attempting to delete user type");

    conn.transaction(|conn| {
        let found: bool = diesel::select(exists(user_types::table.find(id))).get_result(conn)?;
        if !found {
            return Err(PersistenceError::EntityNotFound {
                entity: "user type",
                id,
            });
        }

        let dependent_ids: Vec<i64> = users::table
            .filter(users::user_type_id.eq(id))
            .select(users::id)
            .order(users::id.asc())
            .load(conn)?;
        if !dependent_ids.is_empty() {
            return Err(PersistenceError::Referenced {
                entity: "user type",
                id,
                dependent: "users",
                dependent_ids,
            });
        }

        diesel::delete(user_types::table.find(id)).execute(conn)?;
        info!(id, "Deleted user type");
        Ok(())
    })
}
}
