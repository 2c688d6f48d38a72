// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use phonedesk_persistence::{MIN_HASH_COST, SqlitePersistence};

use crate::auth::TokenConfig;
use crate::handlers::{create_owner, create_phone_number, create_user, create_user_type};
use crate::request_response::{
    CreateOwnerRequest, CreatePhoneNumberRequest, CreateUserRequest, CreateUserTypeRequest,
    OwnerInfo, PhoneNumberInfo, UserInfo, UserTypeInfo,
};

pub const TEST_PASSWORD: &str = "Password123";

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory()
        .unwrap()
        .with_hash_cost(MIN_HASH_COST)
}

pub fn create_test_tokens() -> TokenConfig {
    TokenConfig::with_default_ttl("test-signing-secret")
}

pub fn create_test_user_type(persistence: &mut SqlitePersistence, name: &str) -> UserTypeInfo {
    create_user_type(
        persistence,
        &CreateUserTypeRequest {
            name: name.to_string(),
        },
    )
    .unwrap()
}

pub fn create_valid_user_request(user_name: &str, user_type_id: i64) -> CreateUserRequest {
    CreateUserRequest {
        user_name: user_name.to_string(),
        password: String::from(TEST_PASSWORD),
        name: format!("{user_name} Display"),
        email: format!("{user_name}@example.com"),
        user_type_id,
    }
}

/// Creates a user type named `staff` and one user of that type.
pub fn create_test_user(persistence: &mut SqlitePersistence, user_name: &str) -> UserInfo {
    let user_type: UserTypeInfo = create_test_user_type(persistence, "staff");
    create_user(
        persistence,
        &create_valid_user_request(user_name, user_type.id),
    )
    .unwrap()
}

pub fn create_test_owner(persistence: &mut SqlitePersistence, name: &str) -> OwnerInfo {
    create_owner(
        persistence,
        &CreateOwnerRequest {
            name: name.to_string(),
        },
    )
    .unwrap()
}

pub fn create_test_phone_number(
    persistence: &mut SqlitePersistence,
    number: &str,
    owner_id: i64,
) -> PhoneNumberInfo {
    create_phone_number(
        persistence,
        &CreatePhoneNumberRequest {
            number: number.to_string(),
            phone_number_owner_id: owner_id,
        },
    )
    .unwrap()
}
