// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions, one per operation.
//!
//! Handlers validate input with the domain rules, call the persistence
//! layer, and translate every lower-layer error explicitly. They know
//! nothing about HTTP.

use phonedesk_domain::{
    NewInternalNumber, NewPhoneNumber, NewPhoneNumberOwner, NewTicket, NewUser, NewUserType,
    UserProfile,
};
use phonedesk_persistence::{Persistence, PersistenceError, UserData, UserTypeData};
use tracing::{info, warn};

use crate::auth::{AuthenticatedUser, AuthenticationService, TOKEN_TYPE, TokenConfig};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    CreateInternalNumberRequest, CreateOwnerRequest, CreatePhoneNumberRequest,
    CreateTicketRequest, CreateUserRequest, CreateUserTypeRequest, DeleteResponse,
    InternalNumberInfo, LoginRequest, LoginResponse, OwnerInfo, PhoneNumberInfo, TicketInfo,
    UpdateInternalNumberRequest, UpdateOwnerRequest, UpdatePasswordRequest,
    UpdatePhoneNumberRequest, UpdateTicketRequest, UpdateUserRequest, UpdateUserTypeRequest,
    UserInfo, UserTypeInfo,
};

/// Row cap for `/all/head` listings.
pub const HEAD_LIMIT: i64 = 10;

/// Row cap for the internal number head listing.
pub const INTERNAL_NUMBER_HEAD_LIMIT: i64 = 15;

/// Name of the user type created for the seeded administrator.
pub const ADMIN_USER_TYPE: &str = "admin";

fn not_found(resource_type: &str, id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message: format!("No {resource_type} with id {id}"),
    }
}

fn collect<T, U: From<T>>(rows: Result<Vec<T>, PersistenceError>) -> Result<Vec<U>, ApiError> {
    rows.map(|rows| rows.into_iter().map(U::from).collect())
        .map_err(translate_persistence_error)
}

// ========================================================================
// Authentication
// ========================================================================

/// Logs a user in with username and password.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the user does not exist or the
/// password is wrong.
pub fn login(
    persistence: &mut Persistence,
    tokens: &TokenConfig,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (access_token, user): (String, AuthenticatedUser) = AuthenticationService::authenticate(
        persistence,
        tokens,
        &request.username,
        &request.password,
    )?;

    Ok(LoginResponse {
        access_token,
        token_type: String::from(TOKEN_TYPE),
        user_type: user.user_type_id,
        email: user.email,
        name: user.name,
    })
}

/// Creates the first administrator when no users exist yet.
///
/// Reuses an existing `admin` user type or creates one. Does nothing once
/// any user exists.
///
/// # Returns
///
/// The created user, or `None` if users already existed.
///
/// # Errors
///
/// Returns an error if the password violates the policy or storage fails.
pub fn bootstrap_admin(
    persistence: &mut Persistence,
    user_name: &str,
    password: &str,
) -> Result<Option<UserInfo>, ApiError> {
    let user_count: i64 = persistence
        .count_users()
        .map_err(translate_persistence_error)?;
    if user_count > 0 {
        info!(user_count, "Users already exist, skipping admin bootstrap");
        return Ok(None);
    }

    PasswordPolicy::default().validate(password, user_name)?;

    let existing_type: Option<UserTypeData> = persistence
        .list_user_types(None)
        .map_err(translate_persistence_error)?
        .into_iter()
        .find(|t| t.name == ADMIN_USER_TYPE);
    let user_type: UserTypeData = match existing_type {
        Some(t) => t,
        None => persistence
            .create_user_type(&NewUserType::new(ADMIN_USER_TYPE))
            .map_err(translate_persistence_error)?,
    };

    let user: NewUser = NewUser {
        profile: UserProfile {
            user_name: user_name.to_string(),
            name: String::from("Administrator"),
            email: format!("{user_name}@localhost"),
            user_type_id: user_type.id,
        },
        password: password.to_string(),
    };
    user.validate().map_err(translate_domain_error)?;

    let created: UserData = persistence
        .create_user(&user)
        .map_err(translate_persistence_error)?;
    info!(user_id = created.id, user_name, "Seeded administrator");
    Ok(Some(UserInfo::from(created)))
}

// ========================================================================
// User Types
// ========================================================================

/// Creates a user type.
///
/// # Errors
///
/// Returns an error if validation or storage fails.
pub fn create_user_type(
    persistence: &mut Persistence,
    request: &CreateUserTypeRequest,
) -> Result<UserTypeInfo, ApiError> {
    let user_type: NewUserType = NewUserType::new(&request.name);
    user_type.validate().map_err(translate_domain_error)?;

    persistence
        .create_user_type(&user_type)
        .map(UserTypeInfo::from)
        .map_err(translate_persistence_error)
}

/// Retrieves a user type.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the id does not exist.
pub fn get_user_type(persistence: &mut Persistence, id: i64) -> Result<UserTypeInfo, ApiError> {
    persistence
        .get_user_type(id)
        .map_err(translate_persistence_error)?
        .map(UserTypeInfo::from)
        .ok_or_else(|| not_found("user type", id))
}

/// Lists every user type.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_user_types(persistence: &mut Persistence) -> Result<Vec<UserTypeInfo>, ApiError> {
    collect(persistence.list_user_types(None))
}

/// Lists the first `HEAD_LIMIT` user types.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_user_types_head(
    persistence: &mut Persistence,
) -> Result<Vec<UserTypeInfo>, ApiError> {
    collect(persistence.list_user_types(Some(HEAD_LIMIT)))
}

/// Searches user types by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn search_user_types(
    persistence: &mut Persistence,
    query: &str,
) -> Result<Vec<UserTypeInfo>, ApiError> {
    collect(persistence.search_user_types(query))
}

/// Overwrites a user type.
///
/// # Errors
///
/// Returns an error if validation fails or the id does not exist.
pub fn update_user_type(
    persistence: &mut Persistence,
    request: &UpdateUserTypeRequest,
) -> Result<UserTypeInfo, ApiError> {
    let user_type: NewUserType = NewUserType::new(&request.name);
    user_type.validate().map_err(translate_domain_error)?;

    persistence
        .update_user_type(request.id, &user_type)
        .map(UserTypeInfo::from)
        .map_err(translate_persistence_error)
}

/// Deletes a user type that no user refers to.
///
/// # Errors
///
/// Returns an error if the id does not exist or users still have this type.
pub fn delete_user_type(
    persistence: &mut Persistence,
    id: i64,
) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_user_type(id)
        .map_err(translate_persistence_error)?;
    Ok(DeleteResponse::default())
}

// ========================================================================
// Users
// ========================================================================

/// Creates a user.
///
/// The password must satisfy the password policy.
///
/// # Errors
///
/// Returns an error if:
/// - Any field is invalid
/// - The password violates the policy
/// - The user type does not exist
/// - The `user_name` is taken
pub fn create_user(
    persistence: &mut Persistence,
    request: &CreateUserRequest,
) -> Result<UserInfo, ApiError> {
    let user: NewUser = NewUser {
        profile: UserProfile {
            user_name: request.user_name.clone(),
            name: request.name.clone(),
            email: request.email.clone(),
            user_type_id: request.user_type_id,
        },
        password: request.password.clone(),
    };
    user.validate().map_err(translate_domain_error)?;
    PasswordPolicy::default().validate(&request.password, &request.user_name)?;

    persistence
        .create_user(&user)
        .map(UserInfo::from)
        .map_err(translate_persistence_error)
}

/// Retrieves a user.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the id does not exist.
pub fn get_user(persistence: &mut Persistence, id: i64) -> Result<UserInfo, ApiError> {
    persistence
        .get_user(id)
        .map_err(translate_persistence_error)?
        .map(UserInfo::from)
        .ok_or_else(|| not_found("user", id))
}

/// Lists every user.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_users(persistence: &mut Persistence) -> Result<Vec<UserInfo>, ApiError> {
    collect(persistence.list_users(None))
}

/// Lists the first `HEAD_LIMIT` users.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_users_head(persistence: &mut Persistence) -> Result<Vec<UserInfo>, ApiError> {
    collect(persistence.list_users(Some(HEAD_LIMIT)))
}

/// Lists users of one type.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_users_by_type(
    persistence: &mut Persistence,
    user_type_id: i64,
) -> Result<Vec<UserInfo>, ApiError> {
    collect(persistence.list_users_by_type(user_type_id))
}

/// Searches users by display name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn search_users(persistence: &mut Persistence, query: &str) -> Result<Vec<UserInfo>, ApiError> {
    collect(persistence.search_users(query))
}

/// Overwrites a user's profile. The password is not changed.
///
/// # Errors
///
/// Returns an error if validation fails, the id or user type does not
/// exist, or the new `user_name` is taken.
pub fn update_user(
    persistence: &mut Persistence,
    request: &UpdateUserRequest,
) -> Result<UserInfo, ApiError> {
    let profile: UserProfile = UserProfile {
        user_name: request.user_name.clone(),
        name: request.name.clone(),
        email: request.email.clone(),
        user_type_id: request.user_type_id,
    };
    profile.validate().map_err(translate_domain_error)?;

    persistence
        .update_user(request.id, &profile)
        .map(UserInfo::from)
        .map_err(translate_persistence_error)
}

/// Replaces a user's password.
///
/// # Errors
///
/// Returns an error if the user does not exist or the password violates the policy.
pub fn update_user_password(
    persistence: &mut Persistence,
    request: &UpdatePasswordRequest,
    actor: &AuthenticatedUser,
) -> Result<UserInfo, ApiError> {
    let user: UserData = persistence
        .get_user(request.id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("user", request.id))?;

    PasswordPolicy::default().validate(&request.password, &user.user_name)?;

    persistence
        .update_password(user.id, &request.password)
        .map_err(translate_persistence_error)?;

    if actor.id == user.id {
        info!(user_id = user.id, "User changed their own password");
    } else {
        warn!(
            user_id = user.id,
            actor_id = actor.id,
            "Password replaced by another user"
        );
    }

    Ok(UserInfo::from(user))
}

/// Deletes a user with no tickets.
///
/// # Errors
///
/// Returns an error if the id does not exist or tickets still refer to the user.
pub fn delete_user(persistence: &mut Persistence, id: i64) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_user(id)
        .map_err(translate_persistence_error)?;
    Ok(DeleteResponse::default())
}

// ========================================================================
// Phone Number Owners
// ========================================================================

/// Creates a phone number owner.
///
/// # Errors
///
/// Returns an error if the name is invalid or taken.
pub fn create_owner(
    persistence: &mut Persistence,
    request: &CreateOwnerRequest,
) -> Result<OwnerInfo, ApiError> {
    let owner: NewPhoneNumberOwner = NewPhoneNumberOwner::new(&request.name);
    owner.validate().map_err(translate_domain_error)?;

    persistence
        .create_owner(&owner)
        .map(OwnerInfo::from)
        .map_err(translate_persistence_error)
}

/// Retrieves a phone number owner.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the id does not exist.
pub fn get_owner(persistence: &mut Persistence, id: i64) -> Result<OwnerInfo, ApiError> {
    persistence
        .get_owner(id)
        .map_err(translate_persistence_error)?
        .map(OwnerInfo::from)
        .ok_or_else(|| not_found("phone number owner", id))
}

/// Lists every phone number owner.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_owners(persistence: &mut Persistence) -> Result<Vec<OwnerInfo>, ApiError> {
    collect(persistence.list_owners(None))
}

/// Lists the first `HEAD_LIMIT` owners.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_owners_head(persistence: &mut Persistence) -> Result<Vec<OwnerInfo>, ApiError> {
    collect(persistence.list_owners(Some(HEAD_LIMIT)))
}

/// Searches owners by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn search_owners(
    persistence: &mut Persistence,
    query: &str,
) -> Result<Vec<OwnerInfo>, ApiError> {
    collect(persistence.search_owners(query))
}

/// Renames a phone number owner.
///
/// # Errors
///
/// Returns an error if validation fails, the id does not exist, or the name is taken.
pub fn update_owner(
    persistence: &mut Persistence,
    request: &UpdateOwnerRequest,
) -> Result<OwnerInfo, ApiError> {
    let owner: NewPhoneNumberOwner = NewPhoneNumberOwner::new(&request.name);
    owner.validate().map_err(translate_domain_error)?;

    persistence
        .update_owner(request.id, &owner)
        .map(OwnerInfo::from)
        .map_err(translate_persistence_error)
}

/// Deletes an owner with no phone numbers.
///
/// # Errors
///
/// Returns an error if the id does not exist or phone numbers still refer to it.
pub fn delete_owner(persistence: &mut Persistence, id: i64) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_owner(id)
        .map_err(translate_persistence_error)?;
    Ok(DeleteResponse::default())
}

// ========================================================================
// Phone Numbers
// ========================================================================

/// Creates a phone number.
///
/// # Errors
///
/// Returns an error if validation fails or the owner does not exist.
pub fn create_phone_number(
    persistence: &mut Persistence,
    request: &CreatePhoneNumberRequest,
) -> Result<PhoneNumberInfo, ApiError> {
    let phone_number: NewPhoneNumber = NewPhoneNumber {
        number: request.number.clone(),
        phone_number_owner_id: request.phone_number_owner_id,
    };
    phone_number.validate().map_err(translate_domain_error)?;

    persistence
        .create_phone_number(&phone_number)
        .map(PhoneNumberInfo::from)
        .map_err(translate_persistence_error)
}

/// Retrieves a phone number.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the id does not exist.
pub fn get_phone_number(
    persistence: &mut Persistence,
    id: i64,
) -> Result<PhoneNumberInfo, ApiError> {
    persistence
        .get_phone_number(id)
        .map_err(translate_persistence_error)?
        .map(PhoneNumberInfo::from)
        .ok_or_else(|| not_found("phone number", id))
}

/// Lists every phone number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_phone_numbers(persistence: &mut Persistence) -> Result<Vec<PhoneNumberInfo>, ApiError> {
    collect(persistence.list_phone_numbers(None))
}

/// Lists the first `HEAD_LIMIT` phone numbers.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_phone_numbers_head(
    persistence: &mut Persistence,
) -> Result<Vec<PhoneNumberInfo>, ApiError> {
    collect(persistence.list_phone_numbers(Some(HEAD_LIMIT)))
}

/// Searches phone numbers by number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn search_phone_numbers(
    persistence: &mut Persistence,
    query: &str,
) -> Result<Vec<PhoneNumberInfo>, ApiError> {
    collect(persistence.search_phone_numbers(query))
}

/// Overwrites a phone number.
///
/// # Errors
///
/// Returns an error if validation fails or the id or owner does not exist.
pub fn update_phone_number(
    persistence: &mut Persistence,
    request: &UpdatePhoneNumberRequest,
) -> Result<PhoneNumberInfo, ApiError> {
    let phone_number: NewPhoneNumber = NewPhoneNumber {
        number: request.number.clone(),
        phone_number_owner_id: request.phone_number_owner_id,
    };
    phone_number.validate().map_err(translate_domain_error)?;

    persistence
        .update_phone_number(request.id, &phone_number)
        .map(PhoneNumberInfo::from)
        .map_err(translate_persistence_error)
}

/// Deletes a phone number with no internal numbers.
///
/// # Errors
///
/// Returns an error if the id does not exist or internal numbers still refer to it.
pub fn delete_phone_number(
    persistence: &mut Persistence,
    id: i64,
) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_phone_number(id)
        .map_err(translate_persistence_error)?;
    Ok(DeleteResponse::default())
}

// ========================================================================
// Internal Numbers
// ========================================================================

/// Creates an internal number.
///
/// # Errors
///
/// Returns an error if validation fails or the phone number does not exist.
pub fn create_internal_number(
    persistence: &mut Persistence,
    request: &CreateInternalNumberRequest,
) -> Result<InternalNumberInfo, ApiError> {
    let internal_number: NewInternalNumber = NewInternalNumber {
        number: request.number.clone(),
        path: request.path.clone(),
        phone_number_id: request.phone_number_id,
    };
    internal_number.validate().map_err(translate_domain_error)?;

    persistence
        .create_internal_number(&internal_number)
        .map(InternalNumberInfo::from)
        .map_err(translate_persistence_error)
}

/// Retrieves an internal number.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the id does not exist.
pub fn get_internal_number(
    persistence: &mut Persistence,
    id: i64,
) -> Result<InternalNumberInfo, ApiError> {
    persistence
        .get_internal_number(id)
        .map_err(translate_persistence_error)?
        .map(InternalNumberInfo::from)
        .ok_or_else(|| not_found("internal number", id))
}

/// Lists every internal number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_internal_numbers(
    persistence: &mut Persistence,
) -> Result<Vec<InternalNumberInfo>, ApiError> {
    collect(persistence.list_internal_numbers(None))
}

/// Lists the first `INTERNAL_NUMBER_HEAD_LIMIT` internal numbers.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_internal_numbers_head(
    persistence: &mut Persistence,
) -> Result<Vec<InternalNumberInfo>, ApiError> {
    collect(persistence.list_internal_numbers(Some(INTERNAL_NUMBER_HEAD_LIMIT)))
}

/// Searches internal numbers by the name of their phone number's owner.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn search_internal_numbers_by_owner_name(
    persistence: &mut Persistence,
    query: &str,
) -> Result<Vec<InternalNumberInfo>, ApiError> {
    collect(persistence.search_internal_numbers_by_owner_name(query))
}

/// Overwrites an internal number.
///
/// # Errors
///
/// Returns an error if validation fails or the id or phone number does not exist.
pub fn update_internal_number(
    persistence: &mut Persistence,
    request: &UpdateInternalNumberRequest,
) -> Result<InternalNumberInfo, ApiError> {
    let internal_number: NewInternalNumber = NewInternalNumber {
        number: request.number.clone(),
        path: request.path.clone(),
        phone_number_id: request.phone_number_id,
    };
    internal_number.validate().map_err(translate_domain_error)?;

    persistence
        .update_internal_number(request.id, &internal_number)
        .map(InternalNumberInfo::from)
        .map_err(translate_persistence_error)
}

/// Deletes an internal number.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the id does not exist.
pub fn delete_internal_number(
    persistence: &mut Persistence,
    id: i64,
) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_internal_number(id)
        .map_err(translate_persistence_error)?;
    Ok(DeleteResponse::default())
}

// ========================================================================
// Tickets
// ========================================================================

/// Opens a ticket.
///
/// # Errors
///
/// Returns an error if validation fails, the user does not exist, or the
/// description is already used by another ticket.
pub fn create_ticket(
    persistence: &mut Persistence,
    request: &CreateTicketRequest,
) -> Result<TicketInfo, ApiError> {
    let ticket: NewTicket = NewTicket {
        description: request.description.clone(),
        user_id: request.user_id,
    };
    ticket.validate().map_err(translate_domain_error)?;

    persistence
        .create_ticket(&ticket)
        .map(TicketInfo::from)
        .map_err(translate_persistence_error)
}

/// Retrieves a ticket.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the id does not exist.
pub fn get_ticket(persistence: &mut Persistence, id: i64) -> Result<TicketInfo, ApiError> {
    persistence
        .get_ticket(id)
        .map_err(translate_persistence_error)?
        .map(TicketInfo::from)
        .ok_or_else(|| not_found("ticket", id))
}

/// Lists every ticket.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_tickets(persistence: &mut Persistence) -> Result<Vec<TicketInfo>, ApiError> {
    collect(persistence.list_tickets(None))
}

/// Lists the first `HEAD_LIMIT` tickets.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_tickets_head(persistence: &mut Persistence) -> Result<Vec<TicketInfo>, ApiError> {
    collect(persistence.list_tickets(Some(HEAD_LIMIT)))
}

/// Retrieves the oldest ticket of a user.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the user has no tickets.
pub fn get_user_ticket(
    persistence: &mut Persistence,
    user_id: i64,
) -> Result<TicketInfo, ApiError> {
    persistence
        .first_ticket_for_user(user_id)
        .map_err(translate_persistence_error)?
        .map(TicketInfo::from)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("ticket"),
            message: format!("User {user_id} has no tickets"),
        })
}

/// Lists every ticket of a user.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_user_tickets(
    persistence: &mut Persistence,
    user_id: i64,
) -> Result<Vec<TicketInfo>, ApiError> {
    collect(persistence.list_tickets_for_user(user_id))
}

/// Searches tickets by description.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn search_tickets(
    persistence: &mut Persistence,
    query: &str,
) -> Result<Vec<TicketInfo>, ApiError> {
    collect(persistence.search_tickets(query))
}

/// Overwrites a ticket.
///
/// # Errors
///
/// Returns an error if validation fails, the id or user does not exist, or
/// the description is taken.
pub fn update_ticket(
    persistence: &mut Persistence,
    request: &UpdateTicketRequest,
) -> Result<TicketInfo, ApiError> {
    let ticket: NewTicket = NewTicket {
        description: request.description.clone(),
        user_id: request.user_id,
    };
    ticket.validate().map_err(translate_domain_error)?;

    persistence
        .update_ticket(request.id, &ticket)
        .map(TicketInfo::from)
        .map_err(translate_persistence_error)
}

/// Deletes a ticket.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the id does not exist.
pub fn delete_ticket(persistence: &mut Persistence, id: i64) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_ticket(id)
        .map_err(translate_persistence_error)?;
    Ok(DeleteResponse::default())
}
