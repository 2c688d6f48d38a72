// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk import row and export tests.

use phonedesk_domain::{InternalNumberImportRow, PhoneNumberImportRow};

use crate::tests::{create_test_owner, create_test_persistence, create_test_phone_number};
use crate::{ImportedRow, InternalNumberExportRow, PhoneNumberExportRow};

fn phone_row(number: &str, owner_name: &str) -> PhoneNumberImportRow {
    PhoneNumberImportRow {
        number: number.to_string(),
        owner_name: owner_name.to_string(),
    }
}

#[test]
fn test_import_creates_missing_owner_once() {
    let mut persistence = create_test_persistence();

    let first: ImportedRow = persistence
        .import_phone_number_row(&phone_row("555-0100", "Reception"))
        .unwrap();
    let second: ImportedRow = persistence
        .import_phone_number_row(&phone_row("555-0101", "Reception"))
        .unwrap();

    assert!(first.owner_created);
    assert!(!second.owner_created);
    assert_eq!(first.owner_id, second.owner_id);
    assert_eq!(first.internal_number_id, None);
    assert_eq!(persistence.list_owners(None).unwrap().len(), 1);
    assert_eq!(persistence.list_phone_numbers(None).unwrap().len(), 2);
}

#[test]
fn test_import_reuses_existing_owner() {
    let mut persistence = create_test_persistence();
    let owner = create_test_owner(&mut persistence, "Sales");

    let imported = persistence
        .import_phone_number_row(&phone_row("555-0200", "Sales"))
        .unwrap();

    assert_eq!(imported.owner_id, owner.id);
    assert!(!imported.owner_created);
}

#[test]
fn test_import_internal_number_row_links_all_three() {
    let mut persistence = create_test_persistence();

    let imported = persistence
        .import_internal_number_row(&InternalNumberImportRow {
            internal: String::from("100"),
            path: String::from("1/0/0"),
            number: String::from("555-0100"),
            owner_name: String::from("Reception"),
        })
        .unwrap();

    let internal_id: i64 = imported.internal_number_id.unwrap();
    let internal = persistence.get_internal_number(internal_id).unwrap().unwrap();
    assert_eq!(internal.phone_number_id, imported.phone_number_id);

    let phone = persistence
        .get_phone_number(imported.phone_number_id)
        .unwrap()
        .unwrap();
    assert_eq!(phone.phone_number_owner_id, imported.owner_id);
}

#[test]
fn test_export_phone_numbers_joins_owner_names() {
    let mut persistence = create_test_persistence();
    let reception = create_test_owner(&mut persistence, "Reception");
    let sales = create_test_owner(&mut persistence, "Sales");
    create_test_phone_number(&mut persistence, "555-0100", reception.id);
    create_test_phone_number(&mut persistence, "555-0200", sales.id);

    let rows: Vec<PhoneNumberExportRow> = persistence.export_phone_numbers().unwrap();

    assert_eq!(
        rows,
        vec![
            PhoneNumberExportRow {
                number: String::from("555-0100"),
                owner_name: String::from("Reception"),
            },
            PhoneNumberExportRow {
                number: String::from("555-0200"),
                owner_name: String::from("Sales"),
            },
        ]
    );
}

#[test]
fn test_export_internal_numbers_after_import() {
    let mut persistence = create_test_persistence();
    persistence
        .import_internal_number_row(&InternalNumberImportRow {
            internal: String::from("100"),
            path: String::from("1/0/0"),
            number: String::from("555-0100"),
            owner_name: String::from("Reception"),
        })
        .unwrap();

    let rows: Vec<InternalNumberExportRow> = persistence.export_internal_numbers().unwrap();

    assert_eq!(
        rows,
        vec![InternalNumberExportRow {
            internal: String::from("100"),
            path: String::from("1/0/0"),
            number: String::from("555-0100"),
            owner_name: String::from("Reception"),
        }]
    );
}

#[test]
fn test_export_empty_directory() {
    let mut persistence = create_test_persistence();

    assert!(persistence.export_phone_numbers().unwrap().is_empty());
    assert!(persistence.export_internal_numbers().unwrap().is_empty());
}
