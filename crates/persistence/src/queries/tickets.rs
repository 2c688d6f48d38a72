// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket queries.

use diesel::prelude::*;
use tracing::debug;

use super::LIKE_ESCAPE;
use crate::data_models::TicketData;
use crate::diesel_schema::tickets;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a ticket by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the ticket is not found.
pub fn get_ticket(conn: &mut _, id: i64) -> Result<Option<TicketData>, PersistenceError> {
    debug!(id, "Looking up ticket");

    let result: Result<TicketData, diesel::result::Error> = tickets::table
        .find(id)
        .select(TicketData::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists tickets in id order, optionally capped at `limit` rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_tickets(conn: &mut _, limit: Option<i64>) -> Result<Vec<TicketData>, PersistenceError> {
    let mut query = tickets::table
        .select(TicketData::as_select())
        .order(tickets::id.asc())
        .into_boxed();
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    Ok(query.load(conn)?)
}
}

backend_fn! {
/// Lists the tickets raised by one user, in id order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_tickets_for_user(
    conn: &mut _,
    user_id: i64,
    limit: Option<i64>,
) -> Result<Vec<TicketData>, PersistenceError> {
    let mut query = tickets::table
        .filter(tickets::user_id.eq(user_id))
        .select(TicketData::as_select())
        .order(tickets::id.asc())
        .into_boxed();
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    Ok(query.load(conn)?)
}
}

backend_fn! {
/// Finds tickets whose description matches a `LIKE` pattern, in storage order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_tickets_by_description(
    conn: &mut _,
    pattern: &str,
    limit: i64,
) -> Result<Vec<TicketData>, PersistenceError> {
    debug!(pattern, "Searching tickets by description");

    Ok(tickets::table
        .filter(tickets::description.like(pattern).escape(LIKE_ESCAPE))
        .select(TicketData::as_select())
        .limit(limit)
        .load(conn)?)
}
}
