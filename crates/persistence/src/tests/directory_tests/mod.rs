// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Owner, phone number and internal number persistence tests.

use phonedesk_domain::{NewInternalNumber, NewPhoneNumber, NewPhoneNumberOwner};

use crate::error::PersistenceError;
use crate::tests::{create_test_owner, create_test_persistence, create_test_phone_number};

#[test]
fn test_create_owner_and_lookup_by_name() {
    let mut persistence = create_test_persistence();

    let owner = create_test_owner(&mut persistence, "Reception");

    assert_eq!(
        persistence.search_owners("Reception").unwrap(),
        vec![owner.clone()]
    );
    assert_eq!(persistence.get_owner(owner.id).unwrap(), Some(owner));
}

#[test]
fn test_duplicate_owner_name_rejected() {
    let mut persistence = create_test_persistence();
    create_test_owner(&mut persistence, "Reception");

    let result = persistence.create_owner(&NewPhoneNumberOwner::new("Reception"));

    assert!(matches!(result, Err(PersistenceError::Duplicate { .. })));
    assert_eq!(persistence.list_owners(None).unwrap().len(), 1);
}

#[test]
fn test_rename_owner_to_own_name_is_allowed() {
    let mut persistence = create_test_persistence();
    let owner = create_test_owner(&mut persistence, "Reception");

    let updated = persistence
        .update_owner(owner.id, &NewPhoneNumberOwner::new("Reception"))
        .unwrap();

    assert_eq!(updated, owner);
}

#[test]
fn test_delete_owner_with_phone_numbers_is_refused() {
    let mut persistence = create_test_persistence();
    let owner = create_test_owner(&mut persistence, "Reception");
    let first = create_test_phone_number(&mut persistence, "555-0100", owner.id);
    let second = create_test_phone_number(&mut persistence, "555-0101", owner.id);

    let result = persistence.delete_owner(owner.id);

    assert_eq!(
        result,
        Err(PersistenceError::Referenced {
            entity: "phone number owner",
            id: owner.id,
            dependent: "phone numbers",
            dependent_ids: vec![first.id, second.id],
        })
    );
    assert_eq!(persistence.list_phone_numbers(None).unwrap().len(), 2);
}

#[test]
fn test_delete_owner_after_numbers_removed() {
    let mut persistence = create_test_persistence();
    let owner = create_test_owner(&mut persistence, "Reception");
    let number = create_test_phone_number(&mut persistence, "555-0100", owner.id);

    persistence.delete_phone_number(number.id).unwrap();
    persistence.delete_owner(owner.id).unwrap();

    assert_eq!(persistence.get_owner(owner.id).unwrap(), None);
}

#[test]
fn test_create_phone_number_with_missing_owner_fails() {
    let mut persistence = create_test_persistence();

    let result = persistence.create_phone_number(&NewPhoneNumber {
        number: String::from("555-0100"),
        phone_number_owner_id: 12,
    });

    assert_eq!(
        result,
        Err(PersistenceError::MissingReference {
            entity: "phone number owner",
            id: 12
        })
    );
    assert!(persistence.list_phone_numbers(None).unwrap().is_empty());
}

#[test]
fn test_phone_numbers_allow_duplicate_values() {
    let mut persistence = create_test_persistence();
    let owner = create_test_owner(&mut persistence, "Reception");

    create_test_phone_number(&mut persistence, "555-0100", owner.id);
    create_test_phone_number(&mut persistence, "555-0100", owner.id);

    assert_eq!(persistence.list_phone_numbers(None).unwrap().len(), 2);
}

#[test]
fn test_update_phone_number_moves_owner() {
    let mut persistence = create_test_persistence();
    let reception = create_test_owner(&mut persistence, "Reception");
    let sales = create_test_owner(&mut persistence, "Sales");
    let number = create_test_phone_number(&mut persistence, "555-0100", reception.id);

    let updated = persistence
        .update_phone_number(
            number.id,
            &NewPhoneNumber {
                number: String::from("555-0199"),
                phone_number_owner_id: sales.id,
            },
        )
        .unwrap();

    assert_eq!(updated.number, "555-0199");
    assert_eq!(updated.phone_number_owner_id, sales.id);
}

#[test]
fn test_update_missing_phone_number_fails() {
    let mut persistence = create_test_persistence();
    let owner = create_test_owner(&mut persistence, "Reception");

    let result = persistence.update_phone_number(
        404,
        &NewPhoneNumber {
            number: String::from("555-0100"),
            phone_number_owner_id: owner.id,
        },
    );

    assert_eq!(
        result,
        Err(PersistenceError::EntityNotFound {
            entity: "phone number",
            id: 404
        })
    );
}

#[test]
fn test_internal_number_lifecycle() {
    let mut persistence = create_test_persistence();
    let owner = create_test_owner(&mut persistence, "Reception");
    let number = create_test_phone_number(&mut persistence, "555-0100", owner.id);

    let internal = persistence
        .create_internal_number(&NewInternalNumber {
            number: String::from("100"),
            path: String::from("1/0/0"),
            phone_number_id: number.id,
        })
        .unwrap();
    assert_eq!(
        persistence.get_internal_number(internal.id).unwrap(),
        Some(internal.clone())
    );

    let updated = persistence
        .update_internal_number(
            internal.id,
            &NewInternalNumber {
                number: String::from("101"),
                path: String::from("1/0/1"),
                phone_number_id: number.id,
            },
        )
        .unwrap();
    assert_eq!(updated.number, "101");
    assert_eq!(updated.path, "1/0/1");

    persistence.delete_internal_number(internal.id).unwrap();
    assert_eq!(persistence.get_internal_number(internal.id).unwrap(), None);
}

#[test]
fn test_delete_phone_number_with_internal_numbers_is_refused() {
    let mut persistence = create_test_persistence();
    let owner = create_test_owner(&mut persistence, "Reception");
    let number = create_test_phone_number(&mut persistence, "555-0100", owner.id);
    let internal = persistence
        .create_internal_number(&NewInternalNumber {
            number: String::from("100"),
            path: String::from("1/0/0"),
            phone_number_id: number.id,
        })
        .unwrap();

    let result = persistence.delete_phone_number(number.id);

    assert_eq!(
        result,
        Err(PersistenceError::Referenced {
            entity: "phone number",
            id: number.id,
            dependent: "internal numbers",
            dependent_ids: vec![internal.id],
        })
    );
}

#[test]
fn test_create_internal_number_with_missing_phone_number_fails() {
    let mut persistence = create_test_persistence();

    let result = persistence.create_internal_number(&NewInternalNumber {
        number: String::from("100"),
        path: String::from("1/0/0"),
        phone_number_id: 8,
    });

    assert_eq!(
        result,
        Err(PersistenceError::MissingReference {
            entity: "phone number",
            id: 8
        })
    );
}

#[test]
fn test_delete_missing_internal_number_fails() {
    let mut persistence = create_test_persistence();

    assert_eq!(
        persistence.delete_internal_number(1),
        Err(PersistenceError::EntityNotFound {
            entity: "internal number",
            id: 1
        })
    );
}
