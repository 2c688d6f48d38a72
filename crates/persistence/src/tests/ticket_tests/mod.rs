// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket persistence tests.

use phonedesk_domain::NewTicket;

use crate::error::PersistenceError;
use crate::tests::{create_test_persistence, create_test_user, create_test_user_type};
use crate::{SqlitePersistence, TicketData};

fn open_ticket(persistence: &mut SqlitePersistence, description: &str, user_id: i64) -> TicketData {
    persistence
        .create_ticket(&NewTicket {
            description: description.to_string(),
            user_id,
        })
        .unwrap()
}

#[test]
fn test_create_ticket_with_missing_user_fails() {
    let mut persistence = create_test_persistence();

    let result = persistence.create_ticket(&NewTicket {
        description: String::from("Phone is dead"),
        user_id: 77,
    });

    assert_eq!(
        result,
        Err(PersistenceError::MissingReference {
            entity: "user",
            id: 77
        })
    );
}

#[test]
fn test_duplicate_description_rejected() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "staff");
    let user = create_test_user(&mut persistence, "alice", user_type.id);
    open_ticket(&mut persistence, "Phone is dead", user.id);

    let result = persistence.create_ticket(&NewTicket {
        description: String::from("Phone is dead"),
        user_id: user.id,
    });

    assert!(matches!(
        result,
        Err(PersistenceError::Duplicate { ref field, .. }) if field == "description"
    ));
}

#[test]
fn test_first_ticket_for_user_is_oldest() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "staff");
    let alice = create_test_user(&mut persistence, "alice", user_type.id);
    let bob = create_test_user(&mut persistence, "bob", user_type.id);
    open_ticket(&mut persistence, "Bob's headset", bob.id);
    let first = open_ticket(&mut persistence, "Alice's voicemail", alice.id);
    open_ticket(&mut persistence, "Alice's extension", alice.id);

    assert_eq!(
        persistence.first_ticket_for_user(alice.id).unwrap(),
        Some(first)
    );
}

#[test]
fn test_first_ticket_for_user_without_tickets() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "staff");
    let alice = create_test_user(&mut persistence, "alice", user_type.id);

    assert_eq!(persistence.first_ticket_for_user(alice.id).unwrap(), None);
}

#[test]
fn test_list_tickets_for_user_only_returns_theirs() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "staff");
    let alice = create_test_user(&mut persistence, "alice", user_type.id);
    let bob = create_test_user(&mut persistence, "bob", user_type.id);
    open_ticket(&mut persistence, "one", alice.id);
    open_ticket(&mut persistence, "two", bob.id);
    open_ticket(&mut persistence, "three", alice.id);

    let tickets = persistence.list_tickets_for_user(alice.id).unwrap();
    let descriptions: Vec<&str> = tickets.iter().map(|t| t.description.as_str()).collect();

    assert_eq!(descriptions, vec!["one", "three"]);
}

#[test]
fn test_update_ticket_reassigns_user() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "staff");
    let alice = create_test_user(&mut persistence, "alice", user_type.id);
    let bob = create_test_user(&mut persistence, "bob", user_type.id);
    let ticket = open_ticket(&mut persistence, "Desk phone", alice.id);

    let updated = persistence
        .update_ticket(
            ticket.id,
            &NewTicket {
                description: String::from("Desk phone"),
                user_id: bob.id,
            },
        )
        .unwrap();

    assert_eq!(updated.user_id, bob.id);
    assert_eq!(updated.description, "Desk phone");
}

#[test]
fn test_delete_ticket_then_user() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "staff");
    let alice = create_test_user(&mut persistence, "alice", user_type.id);
    let ticket = open_ticket(&mut persistence, "Desk phone", alice.id);

    persistence.delete_ticket(ticket.id).unwrap();
    persistence.delete_user(alice.id).unwrap();

    assert_eq!(persistence.get_ticket(ticket.id).unwrap(), None);
    assert_eq!(persistence.get_user(alice.id).unwrap(), None);
}

#[test]
fn test_delete_missing_ticket_fails() {
    let mut persistence = create_test_persistence();

    assert_eq!(
        persistence.delete_ticket(9),
        Err(PersistenceError::EntityNotFound {
            entity: "ticket",
            id: 9
        })
    );
}
