// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutations.
//!
//! Passwords arrive here already hashed; see `credentials`.

use diesel::dsl::exists;
use diesel::prelude::*;
use phonedesk_domain::UserProfile;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::UserData;
use crate::diesel_schema::{tickets, user_types, users};
use crate::error::PersistenceError;

backend_fn! {
/// Creates a user and returns the stored row.
///
/// `user_name` uniqueness is exact and case-sensitive.
///
/// # Errors
///
/// Returns an error if:
/// - The user type does not exist
/// - Another user already has this `user_name`
/// - The database operation fails
pub fn create_user(
    conn: &mut _,
    profile: &UserProfile,
    password_hash: &str,
) -> Result<UserData, PersistenceError> {
    info!(user_name = %profile.user_name, "Creating user");

    conn.transaction(|conn| {
        let type_found: bool =
            diesel::select(exists(user_types::table.find(profile.user_type_id))).get_result(conn)?;
        if !type_found {
            return Err(PersistenceError::MissingReference {
                entity: "user type",
                id: profile.user_type_id,
            });
        }

        let name_taken: bool = diesel::select(exists(
            users::table.filter(users::user_name.eq(&profile.user_name)),
        ))
        .get_result(conn)?;
        if name_taken {
            return Err(PersistenceError::Duplicate {
                entity: String::from("user"),
                field: String::from("user_name"),
                value: profile.user_name.clone(),
            });
        }

        diesel::insert_into(users::table)
            .values((
                users::user_name.eq(&profile.user_name),
                users::password_hash.eq(password_hash),
                users::name.eq(&profile.name),
                users::email.eq(&profile.email),
                users::user_type_id.eq(profile.user_type_id),
            ))
            .execute(conn)?;

        let id: i64 = conn.get_last_insert_rowid()?;
        let row: UserData = users::table
            .find(id)
            .select(UserData::as_select())
            .first(conn)?;

        info!(id, "User created");
        Ok(row)
    })
}
}

backend_fn! {
/// Overwrites the profile fields of an existing user.
///
/// The password hash is left untouched.
///
/// # Errors
///
/// Returns an error if:
/// - No user has this id (nothing is written)
/// - The user type does not exist
/// - Another user already has the new `user_name`
/// - The database operation fails
pub fn update_user(
    conn: &mut _,
    id: i64,
    profile: &UserProfile,
) -> Result<UserData, PersistenceError> {
    info!(id, user_name = %profile.user_name, "Updating user");

    conn.transaction(|conn| {
        let found: bool = diesel::select(exists(users::table.find(id))).get_result(conn)?;
        if !found {
            return Err(PersistenceError::EntityNotFound { entity: "user", id });
        }

        let type_found: bool =
            diesel::select(exists(user_types::table.find(profile.user_type_id))).get_result(conn)?;
        if !type_found {
            return Err(PersistenceError::MissingReference {
                entity: "user type",
                id: profile.user_type_id,
            });
        }

        let name_taken: bool = diesel::select(exists(
            users::table
                .filter(users::user_name.eq(&profile.user_name))
                .filter(users::id.ne(id)),
        ))
        .get_result(conn)?;
        if name_taken {
            return Err(PersistenceError::Duplicate {
                entity: String::from("user"),
                field: String::from("user_name"),
                value: profile.user_name.clone(),
            });
        }

        diesel::update(users::table.find(id))
            .set((
                users::user_name.eq(&profile.user_name),
                users::name.eq(&profile.name),
                users::email.eq(&profile.email),
                users::user_type_id.eq(profile.user_type_id),
            ))
            .execute(conn)?;

        Ok(users::table
            .find(id)
            .select(UserData::as_select())
            .first(conn)?)
    })
}
}

backend_fn! {
/// Replaces a user's password hash.
///
/// # Errors
///
/// Returns `EntityNotFound` if no user has this id.
pub fn update_password_hash(
    conn: &mut _,
    id: i64,
    password_hash: &str,
) -> Result<(), PersistenceError> {
    debug!(id, "Updating password hash");

    conn.transaction(|conn| {
        let found: bool = diesel::select(exists(users::table.find(id))).get_result(conn)?;
        if !found {
            return Err(PersistenceError::EntityNotFound { entity: "user", id });
        }

        diesel::update(users::table.find(id))
            .set(users::password_hash.eq(password_hash))
            .execute(conn)?;

        info!(id, "Password updated");
        Ok(())
    })
}
}

backend_fn! {
/// Deletes a user that has no tickets.
///
/// # Errors
///
/// Returns an error if:
/// - No user has this id
/// - The user still has tickets
/// - The database operation fails
pub fn delete_user(conn: &mut _, id: i64) -> Result<(), PersistenceError> {
    info!(id, "Attempting to delete user");

    conn.transaction(|conn| {
        let found: bool = diesel::select(exists(users::table.find(id))).get_result(conn)?;
        if !found {
            return Err(PersistenceError::EntityNotFound { entity: "user", id });
        }

        let dependent_ids: Vec<i64> = tickets::table
            .filter(tickets::user_id.eq(id))
            .select(tickets::id)
            .order(tickets::id.asc())
            .load(conn)?;
        if !dependent_ids.is_empty() {
            return Err(PersistenceError::Referenced {
                entity: "user",
                id,
                dependent: "tickets",
                dependent_ids,
            });
        }

        diesel::delete(users::table.find(id)).execute(conn)?;
        info!(id, "Deleted user");
        Ok(())
    })
}
}
