// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations, one module per entity.
//!
//! Every mutation runs in a single transaction: existence and uniqueness
//! checks and the write itself commit or roll back together. Storage-level
//! `UNIQUE` and foreign key constraints back the checks up, and their
//! violations are translated in `PersistenceError::from`.
//!
//! Backend-specific helpers (`get_last_insert_rowid()`) come from the
//! `PersistenceBackend` trait. Everything else is Diesel DSL.

pub mod internal_numbers;
pub mod owners;
pub mod phone_numbers;
pub mod tickets;
pub mod transfer;
pub mod user_types;
pub mod users;
