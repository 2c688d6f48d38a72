// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV bulk export and import for phone numbers and internal numbers.
//!
//! Import validates the whole document shape (file name, encoding, CSV
//! syntax, required headers) before touching storage. After that each data
//! row is parsed, validated and written in its own transaction, and the
//! outcome of every row is reported back.

use csv::StringRecord;
use phonedesk_domain::{InternalNumberImportRow, PhoneNumberImportRow};
use phonedesk_persistence::{
    ImportedRow, InternalNumberExportRow, Persistence, PersistenceError, PhoneNumberExportRow,
};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{CsvExport, ImportRowResult, ImportSummary};

/// Column headers for phone number transfer, in export order.
pub const PHONE_NUMBER_HEADERS: &[&str] = &["number", "phone_number_owner_name"];

/// Column headers for internal number transfer, in export order.
pub const INTERNAL_NUMBER_HEADERS: &[&str] =
    &["internal", "path", "number", "phone_number_owner_name"];

/// Normalizes a CSV header string for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Validates that all required headers are present in the CSV.
fn validate_headers(
    headers: &StringRecord,
    required: &[&str],
) -> Result<HashMap<String, usize>, ApiError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();

    for (idx, header) in headers.iter().enumerate() {
        header_map.entry(normalize_header(header)).or_insert(idx);
    }

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !header_map.contains_key(*name))
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::InvalidCsvFormat {
            reason: format!("Missing required headers: {}", missing.join(", ")),
        });
    }

    Ok(header_map)
}

/// Rejects uploads whose file name does not end in `.csv` (any case).
///
/// # Errors
///
/// Returns `UnsupportedFileType` for any other name.
pub fn check_csv_filename(filename: &str) -> Result<(), ApiError> {
    if filename.to_ascii_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(ApiError::UnsupportedFileType {
            filename: filename.to_string(),
        })
    }
}

/// Parses a CSV upload into its header map and data records.
///
/// Nothing is returned unless the whole document is readable.
fn read_document(
    content: &[u8],
    required: &[&str],
) -> Result<(HashMap<String, usize>, Vec<StringRecord>), ApiError> {
    let text: &str = std::str::from_utf8(content).map_err(|e| ApiError::InvalidCsvFormat {
        reason: format!("File is not valid UTF-8: {e}"),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to read CSV headers: {e}"),
        })?
        .clone();

    let header_map: HashMap<String, usize> = validate_headers(&headers, required)?;

    let records: Vec<StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to parse CSV: {e}"),
        })?;

    Ok((header_map, records))
}

/// Returns the value of a named column as written, or an empty string.
fn field(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> String {
    header_map
        .get(name)
        .and_then(|&idx| record.get(idx))
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Runs every record through `parse` then `write`, one row at a time.
fn import_records<R>(
    records: &[StringRecord],
    parse: impl Fn(&StringRecord) -> Result<R, String>,
    mut write: impl FnMut(&R) -> Result<ImportedRow, PersistenceError>,
) -> ImportSummary {
    let mut results: Vec<ImportRowResult> = Vec::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        let row_number: usize = idx + 1;

        let outcome: Result<ImportedRow, String> = parse(record)
            .and_then(|row| write(&row).map_err(|e| translate_persistence_error(e).to_string()));

        match outcome {
            Ok(imported) => results.push(ImportRowResult::success(row_number, &imported)),
            Err(reason) => {
                debug!(row_number, reason = %reason, "CSV row rejected");
                results.push(ImportRowResult::failed(row_number, reason));
            }
        }
    }

    let summary: ImportSummary = ImportSummary::from_results(results);
    info!(
        total_rows = summary.total_rows,
        successful_count = summary.successful_count,
        failed_count = summary.failed_count,
        "CSV import finished"
    );
    summary
}

/// Imports phone numbers from an uploaded CSV file.
///
/// Required columns: `number`, `phone_number_owner_name`. Owners are matched
/// by exact name and created when missing.
///
/// # Errors
///
/// Returns an error, with nothing written, if the file name, encoding, CSV
/// syntax or headers are invalid. Individual row failures are reported in
/// the summary instead.
pub fn import_phone_numbers_csv(
    persistence: &mut Persistence,
    filename: &str,
    content: &[u8],
) -> Result<ImportSummary, ApiError> {
    check_csv_filename(filename)?;
    let (header_map, records) = read_document(content, PHONE_NUMBER_HEADERS)?;
    info!(filename, rows = records.len(), "Importing phone numbers");

    Ok(import_records(
        &records,
        |record| {
            let row: PhoneNumberImportRow = PhoneNumberImportRow {
                number: field(record, &header_map, "number"),
                owner_name: field(record, &header_map, "phone_number_owner_name"),
            };
            row.validate().map(|()| row).map_err(|e| e.to_string())
        },
        |row| persistence.import_phone_number_row(row),
    ))
}

/// Imports internal numbers from an uploaded CSV file.
///
/// Required columns: `internal`, `path`, `number`, `phone_number_owner_name`.
/// Each row creates a phone number and the internal number bound to it.
///
/// # Errors
///
/// Returns an error, with nothing written, if the file name, encoding, CSV
/// syntax or headers are invalid.
pub fn import_internal_numbers_csv(
    persistence: &mut Persistence,
    filename: &str,
    content: &[u8],
) -> Result<ImportSummary, ApiError> {
    check_csv_filename(filename)?;
    let (header_map, records) = read_document(content, INTERNAL_NUMBER_HEADERS)?;
    info!(filename, rows = records.len(), "Importing internal numbers");

    Ok(import_records(
        &records,
        |record| {
            let row: InternalNumberImportRow = InternalNumberImportRow {
                internal: field(record, &header_map, "internal"),
                path: field(record, &header_map, "path"),
                number: field(record, &header_map, "number"),
                owner_name: field(record, &header_map, "phone_number_owner_name"),
            };
            row.validate().map(|()| row).map_err(|e| e.to_string())
        },
        |row| persistence.import_internal_number_row(row),
    ))
}

/// Serializes a header row and data rows into a CSV string.
fn write_document<'a, I, R>(headers: &[&str], rows: I) -> Result<String, ApiError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = &'a str>,
{
    let to_internal = |e: &dyn std::fmt::Display| ApiError::Internal {
        message: format!("Failed to write CSV: {e}"),
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers).map_err(|e| to_internal(&e))?;
    for row in rows {
        writer.write_record(row).map_err(|e| to_internal(&e))?;
    }
    let bytes: Vec<u8> = writer.into_inner().map_err(|e| to_internal(&e))?;
    String::from_utf8(bytes).map_err(|e| to_internal(&e))
}

/// Exports every phone number with its owner's name.
///
/// # Errors
///
/// Returns an error if the query or serialization fails.
pub fn export_phone_numbers_csv(persistence: &mut Persistence) -> Result<CsvExport, ApiError> {
    let rows: Vec<PhoneNumberExportRow> = persistence
        .export_phone_numbers()
        .map_err(translate_persistence_error)?;
    info!(rows = rows.len(), "Exporting phone numbers");

    let body: String = write_document(
        PHONE_NUMBER_HEADERS,
        rows.iter()
            .map(|row| [row.number.as_str(), row.owner_name.as_str()]),
    )?;

    Ok(CsvExport {
        filename: String::from("phone_numbers.csv"),
        body,
    })
}

/// Exports every internal number with its phone number and owner name.
///
/// # Errors
///
/// Returns an error if the query or serialization fails.
pub fn export_internal_numbers_csv(persistence: &mut Persistence) -> Result<CsvExport, ApiError> {
    let rows: Vec<InternalNumberExportRow> = persistence
        .export_internal_numbers()
        .map_err(translate_persistence_error)?;
    info!(rows = rows.len(), "Exporting internal numbers");

    let body: String = write_document(
        INTERNAL_NUMBER_HEADERS,
        rows.iter().map(|row| {
            [
                row.internal.as_str(),
                row.path.as_str(),
                row.number.as_str(),
                row.owner_name.as_str(),
            ]
        }),
    )?;

    Ok(CsvExport {
        filename: String::from("internal_numbers.csv"),
        body,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" Phone Number Owner Name "), "phone_number_owner_name");
        assert_eq!(normalize_header("NUMBER"), "number");
    }

    #[test]
    fn test_check_csv_filename() {
        assert!(check_csv_filename("numbers.csv").is_ok());
        assert!(check_csv_filename("NUMBERS.CSV").is_ok());
        assert_eq!(
            check_csv_filename("numbers.xlsx"),
            Err(ApiError::UnsupportedFileType {
                filename: String::from("numbers.xlsx")
            })
        );
        assert!(check_csv_filename("csv").is_err());
    }

    #[test]
    fn test_validate_headers_reports_all_missing() {
        let headers: StringRecord = StringRecord::from(vec!["path"]);

        let result = validate_headers(&headers, INTERNAL_NUMBER_HEADERS);

        assert_eq!(
            result,
            Err(ApiError::InvalidCsvFormat {
                reason: String::from(
                    "Missing required headers: internal, number, phone_number_owner_name"
                )
            })
        );
    }

    #[test]
    fn test_read_document_rejects_invalid_utf8() {
        let result = read_document(&[0xff, 0xfe, b'a'], PHONE_NUMBER_HEADERS);

        assert!(matches!(result, Err(ApiError::InvalidCsvFormat { .. })));
    }

    #[test]
    fn test_write_document_quotes_fields() {
        let body: String =
            write_document(PHONE_NUMBER_HEADERS, vec![["555-0100", "Smith, Jane"]]).unwrap();

        assert_eq!(
            body,
            "number,phone_number_owner_name\n555-0100,\"Smith, Jane\"\n"
        );
    }
}
