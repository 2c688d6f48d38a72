// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and user type persistence tests.

use phonedesk_domain::{NewTicket, NewUser, NewUserType};

use crate::error::PersistenceError;
use crate::tests::{
    create_test_persistence, create_test_profile, create_test_user, create_test_user_type,
};

#[test]
fn test_create_and_get_user_type() {
    let mut persistence = create_test_persistence();

    let created = create_test_user_type(&mut persistence, "admin");
    let fetched = persistence.get_user_type(created.id).unwrap();

    assert_eq!(fetched, Some(created));
}

#[test]
fn test_get_missing_user_type_returns_none() {
    let mut persistence = create_test_persistence();
    assert_eq!(persistence.get_user_type(42).unwrap(), None);
}

#[test]
fn test_list_user_types_respects_limit_and_order() {
    let mut persistence = create_test_persistence();
    for name in ["a", "b", "c"] {
        create_test_user_type(&mut persistence, name);
    }

    let all = persistence.list_user_types(None).unwrap();
    let names: Vec<&str> = all.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    let head = persistence.list_user_types(Some(2)).unwrap();
    assert_eq!(head.len(), 2);
    assert_eq!(head[0].name, "a");
}

#[test]
fn test_update_user_type() {
    let mut persistence = create_test_persistence();
    let created = create_test_user_type(&mut persistence, "admin");

    let updated = persistence
        .update_user_type(created.id, &NewUserType::new("administrator"))
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "administrator");
}

#[test]
fn test_update_missing_user_type_fails() {
    let mut persistence = create_test_persistence();

    let result = persistence.update_user_type(7, &NewUserType::new("x"));

    assert_eq!(
        result,
        Err(PersistenceError::EntityNotFound {
            entity: "user type",
            id: 7
        })
    );
}

#[test]
fn test_delete_user_type_with_users_is_refused() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "admin");
    let user = create_test_user(&mut persistence, "alice", user_type.id);

    let result = persistence.delete_user_type(user_type.id);

    assert_eq!(
        result,
        Err(PersistenceError::Referenced {
            entity: "user type",
            id: user_type.id,
            dependent: "users",
            dependent_ids: vec![user.id],
        })
    );
    assert!(persistence.get_user_type(user_type.id).unwrap().is_some());
}

#[test]
fn test_delete_unused_user_type() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "guest");

    persistence.delete_user_type(user_type.id).unwrap();

    assert_eq!(persistence.get_user_type(user_type.id).unwrap(), None);
}

#[test]
fn test_create_user_stores_hash_not_plaintext() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "admin");

    let user = create_test_user(&mut persistence, "alice", user_type.id);

    assert_ne!(user.password_hash, "Password123");
    assert!(
        persistence
            .verify_password("Password123", &user.password_hash)
            .unwrap()
    );
    assert!(
        !persistence
            .verify_password("password123", &user.password_hash)
            .unwrap()
    );
}

#[test]
fn test_debug_output_omits_password_hash() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "admin");
    let user = create_test_user(&mut persistence, "alice", user_type.id);

    let rendered: String = format!("{user:?}");

    assert!(!rendered.contains(&user.password_hash));
    assert!(rendered.contains("alice"));
}

#[test]
fn test_create_user_with_missing_type_fails() {
    let mut persistence = create_test_persistence();
    let user = NewUser {
        profile: create_test_profile("alice", 99),
        password: String::from("Password123"),
    };

    let result = persistence.create_user(&user);

    assert_eq!(
        result.unwrap_err(),
        PersistenceError::MissingReference {
            entity: "user type",
            id: 99
        }
    );
    assert_eq!(persistence.count_users().unwrap(), 0);
}

#[test]
fn test_duplicate_user_name_rejected() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "admin");
    create_test_user(&mut persistence, "alice", user_type.id);

    let duplicate = NewUser {
        profile: create_test_profile("alice", user_type.id),
        password: String::from("Another123"),
    };
    let result = persistence.create_user(&duplicate);

    assert!(matches!(
        result,
        Err(PersistenceError::Duplicate { ref field, .. }) if field == "user_name"
    ));
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_user_name_lookup_is_case_sensitive() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "admin");
    create_test_user(&mut persistence, "alice", user_type.id);

    assert!(persistence.get_user_by_user_name("alice").unwrap().is_some());
    assert!(persistence.get_user_by_user_name("Alice").unwrap().is_none());
}

#[test]
fn test_update_user_keeps_password_hash() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "admin");
    let user = create_test_user(&mut persistence, "alice", user_type.id);

    let mut profile = create_test_profile("alice", user_type.id);
    profile.name = String::from("Alice Liddell");
    let updated = persistence.update_user(user.id, &profile).unwrap();

    assert_eq!(updated.name, "Alice Liddell");
    assert_eq!(updated.password_hash, user.password_hash);
}

#[test]
fn test_update_user_to_taken_user_name_fails() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "admin");
    create_test_user(&mut persistence, "alice", user_type.id);
    let bob = create_test_user(&mut persistence, "bob", user_type.id);

    let result = persistence.update_user(bob.id, &create_test_profile("alice", user_type.id));

    assert!(matches!(result, Err(PersistenceError::Duplicate { .. })));
    let reloaded = persistence.get_user(bob.id).unwrap().unwrap();
    assert_eq!(reloaded.user_name, "bob");
}

#[test]
fn test_update_password_changes_verification() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "admin");
    let user = create_test_user(&mut persistence, "alice", user_type.id);

    persistence.update_password(user.id, "NewSecret456").unwrap();

    let reloaded = persistence.get_user(user.id).unwrap().unwrap();
    assert!(
        persistence
            .verify_password("NewSecret456", &reloaded.password_hash)
            .unwrap()
    );
    assert!(
        !persistence
            .verify_password("Password123", &reloaded.password_hash)
            .unwrap()
    );
}

#[test]
fn test_update_password_for_missing_user_fails() {
    let mut persistence = create_test_persistence();

    let result = persistence.update_password(5, "NewSecret456");

    assert_eq!(
        result,
        Err(PersistenceError::EntityNotFound {
            entity: "user",
            id: 5
        })
    );
}

#[test]
fn test_list_users_by_type() {
    let mut persistence = create_test_persistence();
    let admin = create_test_user_type(&mut persistence, "admin");
    let guest = create_test_user_type(&mut persistence, "guest");
    create_test_user(&mut persistence, "alice", admin.id);
    create_test_user(&mut persistence, "bob", guest.id);
    create_test_user(&mut persistence, "carol", admin.id);

    let admins = persistence.list_users_by_type(admin.id).unwrap();
    let names: Vec<&str> = admins.iter().map(|u| u.user_name.as_str()).collect();

    assert_eq!(names, vec!["alice", "carol"]);
}

#[test]
fn test_delete_user_with_tickets_is_refused() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "admin");
    let user = create_test_user(&mut persistence, "alice", user_type.id);
    let ticket = persistence
        .create_ticket(&NewTicket {
            description: String::from("Printer jammed"),
            user_id: user.id,
        })
        .unwrap();

    let result = persistence.delete_user(user.id);

    assert_eq!(
        result,
        Err(PersistenceError::Referenced {
            entity: "user",
            id: user.id,
            dependent: "tickets",
            dependent_ids: vec![ticket.id],
        })
    );
}

#[test]
fn test_delete_missing_user_fails() {
    let mut persistence = create_test_persistence();

    assert_eq!(
        persistence.delete_user(3),
        Err(PersistenceError::EntityNotFound {
            entity: "user",
            id: 3
        })
    );
}
