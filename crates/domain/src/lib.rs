// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for the PhoneDesk directory service.
//!
//! Every entity has a plain input record here with a `validate` method.
//! Cross-row rules (natural key uniqueness, referenced rows existing) need
//! storage and are enforced by the persistence layer.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{
    InternalNumberImportRow, NewInternalNumber, NewPhoneNumber, NewPhoneNumberOwner, NewTicket,
    NewUser, NewUserType, PhoneNumberImportRow, UserProfile,
};
pub use validation::{
    MAX_FIELD_LENGTH, MAX_KEY_LENGTH, validate_email, validate_key_text, validate_reference,
    validate_required_text,
};
