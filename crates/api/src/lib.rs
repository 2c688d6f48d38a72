// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transport-agnostic API layer for PhoneDesk.
//!
//! Every operation the HTTP server exposes is a plain function here that
//! takes a `Persistence` handle and a request DTO. This crate owns:
//!
//! - Password login and bearer token issue/verification
//! - The password policy
//! - Input validation via the domain crate
//! - Translation of domain and persistence errors into [`ApiError`]
//! - CSV bulk export and per-row import

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod csv_transfer;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedUser, AuthenticationService, Claims, DEFAULT_TOKEN_TTL_MINUTES, TOKEN_TYPE,
    TokenConfig,
};
pub use csv_transfer::{
    INTERNAL_NUMBER_HEADERS, PHONE_NUMBER_HEADERS, check_csv_filename, export_internal_numbers_csv,
    export_phone_numbers_csv, import_internal_numbers_csv, import_phone_numbers_csv,
};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    ADMIN_USER_TYPE, HEAD_LIMIT, INTERNAL_NUMBER_HEAD_LIMIT, bootstrap_admin,
    create_internal_number, create_owner, create_phone_number, create_ticket, create_user,
    create_user_type, delete_internal_number, delete_owner, delete_phone_number, delete_ticket,
    delete_user, delete_user_type, get_internal_number, get_owner, get_phone_number, get_ticket,
    get_user, get_user_ticket, get_user_type, list_internal_numbers, list_internal_numbers_head,
    list_owners, list_owners_head, list_phone_numbers, list_phone_numbers_head, list_tickets,
    list_tickets_head, list_user_tickets, list_user_types, list_user_types_head, list_users,
    list_users_by_type, list_users_head, login, search_internal_numbers_by_owner_name,
    search_owners, search_phone_numbers, search_tickets, search_user_types, search_users,
    update_internal_number, update_owner, update_phone_number, update_ticket, update_user,
    update_user_password, update_user_type,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    CreateInternalNumberRequest, CreateOwnerRequest, CreatePhoneNumberRequest, CreateTicketRequest,
    CreateUserRequest, CreateUserTypeRequest, CsvExport, DeleteResponse, ImportRowResult,
    ImportRowStatus, ImportSummary, InternalNumberInfo, LoginRequest, LoginResponse, OwnerInfo,
    PhoneNumberInfo, TicketInfo, UpdateInternalNumberRequest, UpdateOwnerRequest,
    UpdatePasswordRequest, UpdatePhoneNumberRequest, UpdateTicketRequest, UpdateUserRequest,
    UpdateUserTypeRequest, UserInfo, UserTypeInfo,
};
