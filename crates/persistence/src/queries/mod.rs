// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries, one module per entity.
//!
//! Every function is generated by `backend_fn!` in a `_sqlite` and (with the
//! `mysql` feature) a `_mysql` variant. The `Persistence` adapter in
//! `lib.rs` picks the variant for the active connection.
//!
//! Absence is never an error here: lookups return `Ok(None)` and list
//! queries return an empty `Vec`.

pub mod internal_numbers;
pub mod owners;
pub mod phone_numbers;
pub mod tickets;
pub mod transfer;
pub mod user_types;
pub mod users;

/// Escape character used for every `LIKE` pattern.
pub const LIKE_ESCAPE: char = '\\';

/// Builds a `%fragment%` pattern with `LIKE` wildcards in `fragment` escaped.
///
/// The result must be paired with `.escape(LIKE_ESCAPE)`.
#[must_use]
pub fn contains_pattern(fragment: &str) -> String {
    let mut pattern: String = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
