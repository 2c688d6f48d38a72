// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Substring search tests.

use crate::SEARCH_LIMIT;
use crate::queries::contains_pattern;
use crate::tests::{
    create_test_owner, create_test_persistence, create_test_phone_number, create_test_user,
    create_test_user_type,
};

#[test]
fn test_contains_pattern_escapes_wildcards() {
    assert_eq!(contains_pattern("abc"), "%abc%");
    assert_eq!(contains_pattern("50%"), "%50\\%%");
    assert_eq!(contains_pattern("a_b"), "%a\\_b%");
    assert_eq!(contains_pattern("c:\\x"), "%c:\\\\x%");
    assert_eq!(contains_pattern(""), "%%");
}

#[test]
fn test_search_owners_matches_substring() {
    let mut persistence = create_test_persistence();
    create_test_owner(&mut persistence, "Front Desk");
    create_test_owner(&mut persistence, "Back Office");
    create_test_owner(&mut persistence, "Desk Two");

    let found = persistence.search_owners("Desk").unwrap();
    let mut names: Vec<String> = found.into_iter().map(|o| o.name).collect();
    names.sort();

    assert_eq!(names, vec!["Desk Two", "Front Desk"]);
}

#[test]
fn test_search_wildcards_match_literally() {
    let mut persistence = create_test_persistence();
    create_test_owner(&mut persistence, "100% Sales");
    create_test_owner(&mut persistence, "1000 Sales");

    let found = persistence.search_owners("0%").unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "100% Sales");
}

#[test]
fn test_search_is_capped() {
    let mut persistence = create_test_persistence();
    let owner = create_test_owner(&mut persistence, "Switchboard");
    for i in 0..15 {
        create_test_phone_number(&mut persistence, &format!("555-01{i:02}"), owner.id);
    }

    let found = persistence.search_phone_numbers("555").unwrap();

    assert_eq!(i64::try_from(found.len()).unwrap(), SEARCH_LIMIT);
}

#[test]
fn test_search_without_match_is_empty() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "staff");
    create_test_user(&mut persistence, "alice", user_type.id);

    assert!(persistence.search_users("zzz").unwrap().is_empty());
    assert!(persistence.search_user_types("zzz").unwrap().is_empty());
    assert!(persistence.search_tickets("zzz").unwrap().is_empty());
}

#[test]
fn test_search_users_by_display_name() {
    let mut persistence = create_test_persistence();
    let user_type = create_test_user_type(&mut persistence, "staff");
    let alice = create_test_user(&mut persistence, "alice", user_type.id);
    create_test_user(&mut persistence, "bob", user_type.id);

    let found = persistence.search_users("alice Disp").unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, alice.id);
}

#[test]
fn test_search_internal_numbers_by_owner_name() {
    let mut persistence = create_test_persistence();
    let reception = create_test_owner(&mut persistence, "Reception");
    let sales = create_test_owner(&mut persistence, "Sales");
    let reception_number = create_test_phone_number(&mut persistence, "555-0100", reception.id);
    let sales_number = create_test_phone_number(&mut persistence, "555-0200", sales.id);
    let wanted = persistence
        .create_internal_number(&phonedesk_domain::NewInternalNumber {
            number: String::from("100"),
            path: String::from("1/0/0"),
            phone_number_id: reception_number.id,
        })
        .unwrap();
    persistence
        .create_internal_number(&phonedesk_domain::NewInternalNumber {
            number: String::from("200"),
            path: String::from("2/0/0"),
            phone_number_id: sales_number.id,
        })
        .unwrap();

    let found = persistence
        .search_internal_numbers_by_owner_name("cept")
        .unwrap();

    assert_eq!(found, vec![wanted]);
}
