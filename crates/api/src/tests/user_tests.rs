// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for user type and user handlers.

use crate::ApiError;
use crate::auth::{AuthenticatedUser, AuthenticationService};
use crate::handlers::{
    create_ticket, create_user, create_user_type, delete_user, delete_user_type, get_user,
    get_user_type, list_user_types_head, list_users, list_users_by_type, list_users_head,
    search_user_types, search_users, update_user, update_user_password, update_user_type,
};
use crate::request_response::{
    CreateTicketRequest, CreateUserRequest, CreateUserTypeRequest, UpdatePasswordRequest,
    UpdateUserRequest, UpdateUserTypeRequest, UserInfo, UserTypeInfo,
};
use crate::tests::helpers::{
    create_test_persistence, create_test_tokens, create_test_user, create_test_user_type,
    create_valid_user_request,
};

fn actor_for(user: &UserInfo) -> AuthenticatedUser {
    AuthenticatedUser {
        id: user.id,
        user_name: user.user_name.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        user_type_id: user.user_type_id,
    }
}

#[test]
fn test_create_user_type_rejects_blank_name() {
    let mut persistence = create_test_persistence();

    let result = create_user_type(
        &mut persistence,
        &CreateUserTypeRequest {
            name: String::from("   "),
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[test]
fn test_get_missing_user_type_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = get_user_type(&mut persistence, 42);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_update_user_type_renames() {
    let mut persistence = create_test_persistence();
    let user_type: UserTypeInfo = create_test_user_type(&mut persistence, "staff");

    let updated: UserTypeInfo = update_user_type(
        &mut persistence,
        &UpdateUserTypeRequest {
            id: user_type.id,
            name: String::from("support"),
        },
    )
    .unwrap();

    assert_eq!(updated.id, user_type.id);
    assert_eq!(get_user_type(&mut persistence, user_type.id).unwrap().name, "support");
}

#[test]
fn test_update_missing_user_type_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = update_user_type(
        &mut persistence,
        &UpdateUserTypeRequest {
            id: 9,
            name: String::from("support"),
        },
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_user_type_head_and_search_are_capped() {
    let mut persistence = create_test_persistence();
    for i in 0..12 {
        create_test_user_type(&mut persistence, &format!("type-{i}"));
    }

    assert_eq!(list_user_types_head(&mut persistence).unwrap().len(), 10);
    assert_eq!(search_user_types(&mut persistence, "TYPE").unwrap().len(), 10);
    assert_eq!(search_user_types(&mut persistence, "type-11").unwrap().len(), 1);
}

#[test]
fn test_delete_user_type_with_users_is_referenced() {
    let mut persistence = create_test_persistence();
    let user: UserInfo = create_test_user(&mut persistence, "jdoe");

    let result = delete_user_type(&mut persistence, user.user_type_id);

    assert!(matches!(result, Err(ApiError::Referenced { .. })));
    assert!(get_user_type(&mut persistence, user.user_type_id).is_ok());
}

#[test]
fn test_delete_unused_user_type() {
    let mut persistence = create_test_persistence();
    let user_type: UserTypeInfo = create_test_user_type(&mut persistence, "staff");

    let response = delete_user_type(&mut persistence, user_type.id).unwrap();

    assert_eq!(response.detail, "Item deleted successfully");
    assert!(matches!(
        get_user_type(&mut persistence, user_type.id),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_create_user_returns_profile_without_hash() {
    let mut persistence = create_test_persistence();

    let user: UserInfo = create_test_user(&mut persistence, "jdoe");

    assert_eq!(user.user_name, "jdoe");
    assert_eq!(get_user(&mut persistence, user.id).unwrap(), user);
}

#[test]
fn test_create_user_with_duplicate_user_name_conflicts() {
    let mut persistence = create_test_persistence();
    let user: UserInfo = create_test_user(&mut persistence, "jdoe");

    let result = create_user(
        &mut persistence,
        &create_valid_user_request("jdoe", user.user_type_id),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
    assert_eq!(list_users(&mut persistence).unwrap().len(), 1);
}

#[test]
fn test_create_user_with_unknown_type_is_invalid_input() {
    let mut persistence = create_test_persistence();

    let result = create_user(&mut persistence, &create_valid_user_request("jdoe", 77));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "user_type_id"
    ));
}

#[test]
fn test_create_user_rejects_invalid_email() {
    let mut persistence = create_test_persistence();
    let user_type: UserTypeInfo = create_test_user_type(&mut persistence, "staff");
    let mut request: CreateUserRequest = create_valid_user_request("jdoe", user_type.id);
    request.email = String::from("not-an-email");

    let result = create_user(&mut persistence, &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "email"
    ));
}

#[test]
fn test_create_user_enforces_password_policy() {
    let mut persistence = create_test_persistence();
    let user_type: UserTypeInfo = create_test_user_type(&mut persistence, "staff");
    let mut request: CreateUserRequest = create_valid_user_request("jdoe", user_type.id);
    request.password = String::from("alllowercase");

    let result = create_user(&mut persistence, &request);

    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
    assert!(list_users(&mut persistence).is_ok_and(|users| users.is_empty()));
}

#[test]
fn test_get_missing_user_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = get_user(&mut persistence, 5);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_list_users_by_type_filters() {
    let mut persistence = create_test_persistence();
    let staff: UserInfo = create_test_user(&mut persistence, "jdoe");
    let admin_type: UserTypeInfo = create_test_user_type(&mut persistence, "admin");
    create_user(
        &mut persistence,
        &create_valid_user_request("root", admin_type.id),
    )
    .unwrap();

    let staff_users: Vec<UserInfo> =
        list_users_by_type(&mut persistence, staff.user_type_id).unwrap();

    assert_eq!(staff_users, vec![staff]);
    assert_eq!(list_users_head(&mut persistence).unwrap().len(), 2);
}

#[test]
fn test_search_users_matches_display_name() {
    let mut persistence = create_test_persistence();
    create_test_user(&mut persistence, "jdoe");

    let found: Vec<UserInfo> = search_users(&mut persistence, "doe disp").unwrap();

    assert_eq!(found.len(), 1);
    assert!(search_users(&mut persistence, "nobody").unwrap().is_empty());
}

#[test]
fn test_update_user_keeps_password() {
    let mut persistence = create_test_persistence();
    let tokens = create_test_tokens();
    let user: UserInfo = create_test_user(&mut persistence, "jdoe");

    let updated: UserInfo = update_user(
        &mut persistence,
        &UpdateUserRequest {
            id: user.id,
            user_name: String::from("jdoe2"),
            name: String::from("Jane Doe"),
            email: String::from("jane@example.com"),
            user_type_id: user.user_type_id,
        },
    )
    .unwrap();

    assert_eq!(updated.user_name, "jdoe2");
    assert!(
        AuthenticationService::authenticate(&mut persistence, &tokens, "jdoe2", "Password123")
            .is_ok()
    );
}

#[test]
fn test_update_user_to_taken_user_name_conflicts() {
    let mut persistence = create_test_persistence();
    let first: UserInfo = create_test_user(&mut persistence, "jdoe");
    let second: UserInfo = create_user(
        &mut persistence,
        &create_valid_user_request("asmith", first.user_type_id),
    )
    .unwrap();

    let result = update_user(
        &mut persistence,
        &UpdateUserRequest {
            id: second.id,
            user_name: String::from("jdoe"),
            name: second.name.clone(),
            email: second.email.clone(),
            user_type_id: second.user_type_id,
        },
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
    assert_eq!(get_user(&mut persistence, second.id).unwrap(), second);
}

#[test]
fn test_update_password_allows_new_login() {
    let mut persistence = create_test_persistence();
    let tokens = create_test_tokens();
    let user: UserInfo = create_test_user(&mut persistence, "jdoe");

    update_user_password(
        &mut persistence,
        &UpdatePasswordRequest {
            id: user.id,
            password: String::from("NewSecret42"),
        },
        &actor_for(&user),
    )
    .unwrap();

    assert!(
        AuthenticationService::authenticate(&mut persistence, &tokens, "jdoe", "Password123")
            .is_err()
    );
    assert!(
        AuthenticationService::authenticate(&mut persistence, &tokens, "jdoe", "NewSecret42")
            .is_ok()
    );
}

#[test]
fn test_update_password_rejects_user_name_as_password() {
    let mut persistence = create_test_persistence();
    let user: UserInfo = create_test_user(&mut persistence, "operator01");

    let result = update_user_password(
        &mut persistence,
        &UpdatePasswordRequest {
            id: user.id,
            password: String::from("OPERATOR01"),
        },
        &actor_for(&user),
    );

    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
}

#[test]
fn test_update_password_for_missing_user_is_not_found() {
    let mut persistence = create_test_persistence();
    let user: UserInfo = create_test_user(&mut persistence, "jdoe");

    let result = update_user_password(
        &mut persistence,
        &UpdatePasswordRequest {
            id: user.id + 100,
            password: String::from("NewSecret42"),
        },
        &actor_for(&user),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_delete_user_with_tickets_is_referenced() {
    let mut persistence = create_test_persistence();
    let user: UserInfo = create_test_user(&mut persistence, "jdoe");
    create_ticket(
        &mut persistence,
        &CreateTicketRequest {
            description: String::from("Printer jammed"),
            user_id: user.id,
        },
    )
    .unwrap();

    let result = delete_user(&mut persistence, user.id);

    assert!(matches!(result, Err(ApiError::Referenced { .. })));
    assert!(get_user(&mut persistence, user.id).is_ok());
}

#[test]
fn test_delete_missing_user_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = delete_user(&mut persistence, 3);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
