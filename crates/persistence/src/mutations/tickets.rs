// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket mutations.

use diesel::dsl::exists;
use diesel::prelude::*;
use phonedesk_domain::NewTicket;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::TicketData;
use crate::diesel_schema::{tickets, users};
use crate::error::PersistenceError;

backend_fn! {
/// Opens a ticket for an existing user.
///
/// # Errors
///
/// Returns an error if:
/// - The user does not exist
/// - A ticket with the same description already exists
/// - The database operation fails
pub fn create_ticket(conn: &mut _, ticket: &NewTicket) -> Result<TicketData, PersistenceError> {
    info!(user_id = ticket.user_id, "Creating ticket");

    conn.transaction(|conn| {
        let user_found: bool =
            diesel::select(exists(users::table.find(ticket.user_id))).get_result(conn)?;
        if !user_found {
            return Err(PersistenceError::MissingReference {
                entity: "user",
                id: ticket.user_id,
            });
        }

        let description_taken: bool = diesel::select(exists(
            tickets::table.filter(tickets::description.eq(&ticket.description)),
        ))
        .get_result(conn)?;
        if description_taken {
            return Err(PersistenceError::Duplicate {
                entity: String::from("ticket"),
                field: String::from("description"),
                value: ticket.description.clone(),
            });
        }

        diesel::insert_into(tickets::table)
            .values((
                tickets::description.eq(&ticket.description),
                tickets::user_id.eq(ticket.user_id),
            ))
            .execute(conn)?;

        let id: i64 = conn.get_last_insert_rowid()?;
        let row: TicketData = tickets::table
            .find(id)
            .select(TicketData::as_select())
            .first(conn)?;

        info!(id, "Ticket created");
        Ok(row)
    })
}
}

backend_fn! {
/// Overwrites an existing ticket.
///
/// # Errors
///
/// Returns an error if:
/// - No ticket has this id (nothing is written)
/// - The user does not exist
/// - Another ticket already has the new description
/// - The database operation fails
pub fn update_ticket(
    conn: &mut _,
    id: i64,
    ticket: &NewTicket,
) -> Result<TicketData, PersistenceError> {
    info!(id, user_id = ticket.user_id, "Updating ticket");

    conn.transaction(|conn| {
        let found: bool = diesel::select(exists(tickets::table.find(id))).get_result(conn)?;
        if !found {
            return Err(PersistenceError::EntityNotFound {
                entity: "ticket",
                id,
            });
        }

        let user_found: bool =
            diesel::select(exists(users::table.find(ticket.user_id))).get_result(conn)?;
        if !user_found {
            return Err(PersistenceError::MissingReference {
                entity: "user",
                id: ticket.user_id,
            });
        }

        let description_taken: bool = diesel::select(exists(
            tickets::table
                .filter(tickets::description.eq(&ticket.description))
                .filter(tickets::id.ne(id)),
        ))
        .get_result(conn)?;
        if description_taken {
            return Err(PersistenceError::Duplicate {
                entity: String::from("ticket"),
                field: String::from("description"),
                value: ticket.description.clone(),
            });
        }

        diesel::update(tickets::table.find(id))
            .set((
                tickets::description.eq(&ticket.description),
                tickets::user_id.eq(ticket.user_id),
            ))
            .execute(conn)?;

        Ok(tickets::table
            .find(id)
            .select(TicketData::as_select())
            .first(conn)?)
    })
}
}

backend_fn! {
/// Deletes a ticket.
///
/// # Errors
///
/// Returns `EntityNotFound` if no ticket has this id.
pub fn delete_ticket(conn: &mut _, id: i64) -> Result<(), PersistenceError> {
    info!(id, "Attempting to delete ticket");

    let rows_affected: usize = diesel::delete(tickets::table.find(id)).execute(conn)?;
    if rows_affected == 0 {
        return Err(PersistenceError::EntityNotFound {
            entity: "ticket",
            id,
        });
    }

    info!(id, "Deleted ticket");
    Ok(())
}
}
