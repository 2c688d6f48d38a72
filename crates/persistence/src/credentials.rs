// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One-way password hashing.
//!
//! Digests are salted bcrypt strings. Plaintext passwords are never stored
//! and never logged.

use crate::error::PersistenceError;

/// Default bcrypt work factor for stored passwords.
pub const DEFAULT_HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Smallest work factor bcrypt accepts. Used by tests to keep hashing fast.
pub const MIN_HASH_COST: u32 = 4;

/// Largest work factor bcrypt accepts.
pub const MAX_HASH_COST: u32 = 31;

/// Hashes a plaintext password.
///
/// # Errors
///
/// Returns an error if `cost` is outside bcrypt's accepted range or hashing fails.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PersistenceError> {
    bcrypt::hash(password, cost)
        .map_err(|e| PersistenceError::PasswordHashFailed(format!("Failed to hash password: {e}")))
}

/// Checks a plaintext password against a stored digest.
///
/// # Errors
///
/// Returns an error if the digest is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash).map_err(|e| {
        PersistenceError::PasswordHashFailed(format!("Failed to verify password: {e}"))
    })
}
