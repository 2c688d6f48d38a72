// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test opens an in-memory database, so connection
//! setup and migrations are exercised implicitly. These tests pin down the
//! isolation and file-backed behavior directly.

use std::path::PathBuf;

use crate::SqlitePersistence;
use crate::tests::{create_test_persistence, create_test_user, create_test_user_type};

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, crate::error::PersistenceError> =
        SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = create_test_persistence();
    let mut db2 = create_test_persistence();

    let user_type = create_test_user_type(&mut db1, "admin");
    create_test_user(&mut db1, "alice", user_type.id);

    assert_eq!(db1.count_users().unwrap(), 1, "db1 should have 1 user");
    assert_eq!(db2.count_users().unwrap(), 0, "db2 should have 0 users");
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence = create_test_persistence();

    assert!(persistence.list_user_types(None).is_ok());
    assert!(persistence.list_users(None).is_ok());
    assert!(persistence.list_owners(None).is_ok());
    assert!(persistence.list_phone_numbers(None).is_ok());
    assert!(persistence.list_internal_numbers(None).is_ok());
    assert!(persistence.list_tickets(None).is_ok());
}

#[test]
fn test_foreign_key_enforcement_enabled() {
    let mut persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_file_database_survives_reopen() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "phonedesk_init_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence = SqlitePersistence::new_with_file(&path).unwrap();
        create_test_user_type(&mut persistence, "operator");
    }

    {
        let mut persistence = SqlitePersistence::new_with_file(&path).unwrap();
        let types = persistence.list_user_types(None).unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "operator");
    }

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
