// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod directory_tests;
mod initialization_tests;
mod search_tests;
mod ticket_tests;
mod transfer_tests;
mod user_tests;

use phonedesk_domain::{NewPhoneNumber, NewPhoneNumberOwner, NewUser, NewUserType, UserProfile};

use crate::{
    MIN_HASH_COST, PhoneNumberData, PhoneNumberOwnerData, SqlitePersistence, UserData,
    UserTypeData,
};

/// Opens an isolated in-memory database with the cheapest hash cost.
pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory()
        .unwrap()
        .with_hash_cost(MIN_HASH_COST)
}

pub fn create_test_user_type(persistence: &mut SqlitePersistence, name: &str) -> UserTypeData {
    persistence
        .create_user_type(&NewUserType::new(name))
        .unwrap()
}

pub fn create_test_profile(user_name: &str, user_type_id: i64) -> UserProfile {
    UserProfile {
        user_name: user_name.to_string(),
        name: format!("{user_name} Display"),
        email: format!("{user_name}@example.com"),
        user_type_id,
    }
}

pub fn create_test_user(
    persistence: &mut SqlitePersistence,
    user_name: &str,
    user_type_id: i64,
) -> UserData {
    let user: NewUser = NewUser {
        profile: create_test_profile(user_name, user_type_id),
        password: String::from("Password123"),
    };
    persistence.create_user(&user).unwrap()
}

pub fn create_test_owner(persistence: &mut SqlitePersistence, name: &str) -> PhoneNumberOwnerData {
    persistence
        .create_owner(&NewPhoneNumberOwner::new(name))
        .unwrap()
}

pub fn create_test_phone_number(
    persistence: &mut SqlitePersistence,
    number: &str,
    owner_id: i64,
) -> PhoneNumberData {
    persistence
        .create_phone_number(&NewPhoneNumber {
            number: number.to_string(),
            phone_number_owner_id: owner_id,
        })
        .unwrap()
}
