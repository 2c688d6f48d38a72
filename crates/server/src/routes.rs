// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route handlers.
//!
//! Each handler locks the shared persistence handle, calls one API function
//! and maps the result onto a status code.

use axum::{
    Json,
    extract::{Multipart, Path, State as AxumState, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use phonedesk_api::{
    CreateInternalNumberRequest, CreateOwnerRequest, CreatePhoneNumberRequest,
    CreateTicketRequest, CreateUserRequest, CreateUserTypeRequest, CsvExport, DeleteResponse,
    ImportSummary, InternalNumberInfo, LoginRequest, LoginResponse, OwnerInfo, PhoneNumberInfo,
    TicketInfo, UpdateInternalNumberRequest, UpdateOwnerRequest, UpdatePasswordRequest,
    UpdatePhoneNumberRequest, UpdateTicketRequest, UpdateUserRequest, UpdateUserTypeRequest,
    UserInfo, UserTypeInfo,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::AppState;
use crate::error::HttpError;
use crate::session::SessionUser;

/// Responds with a list, using 404 as the marker for an empty result.
fn list_response<T: Serialize>(rows: Vec<T>) -> Response {
    let status: StatusCode = if rows.is_empty() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Json(rows)).into_response()
}

fn created<T: Serialize>(row: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(row))
}

// ========================================================================
// Authentication
// ========================================================================

/// Handler for POST `/login`.
pub async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, HttpError> {
    let Json(req) = payload?;
    info!(username = %req.username, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = phonedesk_api::login(&mut persistence, &app_state.tokens, &req)?;
    drop(persistence);

    Ok(Json(response))
}

// ========================================================================
// User Types
// ========================================================================

pub async fn handle_create_user_type(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<CreateUserTypeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserTypeInfo>), HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, name = %req.name, "Handling create_user_type request");

    let mut persistence = app_state.persistence.lock().await;
    let row: UserTypeInfo = phonedesk_api::create_user_type(&mut persistence, &req)?;
    Ok(created(row))
}

pub async fn handle_list_user_types(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_user_types(&mut persistence)?))
}

pub async fn handle_list_user_types_head(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_user_types_head(&mut persistence)?))
}

pub async fn handle_get_user_type(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<UserTypeInfo>, HttpError> {
    debug!(id, "Handling get_user_type request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::get_user_type(&mut persistence, id)?))
}

pub async fn handle_search_user_types(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(query): Path<String>,
) -> Result<Json<Vec<UserTypeInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::search_user_types(&mut persistence, &query)?))
}

pub async fn handle_update_user_type(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<UpdateUserTypeRequest>, JsonRejection>,
) -> Result<Json<UserTypeInfo>, HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, id = req.id, "Handling update_user_type request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::update_user_type(&mut persistence, &req)?))
}

pub async fn handle_delete_user_type(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = actor.id, id, "Handling delete_user_type request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::delete_user_type(&mut persistence, id)?))
}

// ========================================================================
// Users
// ========================================================================

pub async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserInfo>), HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, user_name = %req.user_name, "Handling create_user request");

    let mut persistence = app_state.persistence.lock().await;
    let row: UserInfo = phonedesk_api::create_user(&mut persistence, &req)?;
    Ok(created(row))
}

pub async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_users(&mut persistence)?))
}

pub async fn handle_list_users_head(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_users_head(&mut persistence)?))
}

/// Handler for GET `/users/by-type/{type_id}`.
pub async fn handle_list_users_by_type(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(type_id): Path<i64>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_users_by_type(
        &mut persistence,
        type_id,
    )?))
}

pub async fn handle_get_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<UserInfo>, HttpError> {
    debug!(id, "Handling get_user request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::get_user(&mut persistence, id)?))
}

pub async fn handle_search_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(query): Path<String>,
) -> Result<Json<Vec<UserInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::search_users(&mut persistence, &query)?))
}

pub async fn handle_update_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserInfo>, HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, id = req.id, "Handling update_user request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::update_user(&mut persistence, &req)?))
}

/// Handler for PUT `/users/password`.
pub async fn handle_update_user_password(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<UpdatePasswordRequest>, JsonRejection>,
) -> Result<Json<UserInfo>, HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, id = req.id, "Handling update_user_password request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::update_user_password(
        &mut persistence,
        &req,
        &actor,
    )?))
}

pub async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = actor.id, id, "Handling delete_user request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::delete_user(&mut persistence, id)?))
}

// ========================================================================
// Phone Number Owners
// ========================================================================

pub async fn handle_create_owner(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<CreateOwnerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OwnerInfo>), HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, name = %req.name, "Handling create_owner request");

    let mut persistence = app_state.persistence.lock().await;
    let row: OwnerInfo = phonedesk_api::create_owner(&mut persistence, &req)?;
    Ok(created(row))
}

pub async fn handle_list_owners(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_owners(&mut persistence)?))
}

pub async fn handle_list_owners_head(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_owners_head(&mut persistence)?))
}

pub async fn handle_get_owner(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<OwnerInfo>, HttpError> {
    debug!(id, "Handling get_owner request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::get_owner(&mut persistence, id)?))
}

pub async fn handle_search_owners(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(query): Path<String>,
) -> Result<Json<Vec<OwnerInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::search_owners(&mut persistence, &query)?))
}

pub async fn handle_update_owner(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<UpdateOwnerRequest>, JsonRejection>,
) -> Result<Json<OwnerInfo>, HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, id = req.id, "Handling update_owner request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::update_owner(&mut persistence, &req)?))
}

pub async fn handle_delete_owner(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = actor.id, id, "Handling delete_owner request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::delete_owner(&mut persistence, id)?))
}

// ========================================================================
// Phone Numbers
// ========================================================================

pub async fn handle_create_phone_number(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<CreatePhoneNumberRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PhoneNumberInfo>), HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, number = %req.number, "Handling create_phone_number request");

    let mut persistence = app_state.persistence.lock().await;
    let row: PhoneNumberInfo = phonedesk_api::create_phone_number(&mut persistence, &req)?;
    Ok(created(row))
}

pub async fn handle_list_phone_numbers(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_phone_numbers(&mut persistence)?))
}

pub async fn handle_list_phone_numbers_head(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_phone_numbers_head(&mut persistence)?))
}

pub async fn handle_get_phone_number(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<PhoneNumberInfo>, HttpError> {
    debug!(id, "Handling get_phone_number request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::get_phone_number(&mut persistence, id)?))
}

pub async fn handle_search_phone_numbers(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(query): Path<String>,
) -> Result<Json<Vec<PhoneNumberInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::search_phone_numbers(
        &mut persistence,
        &query,
    )?))
}

pub async fn handle_update_phone_number(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<UpdatePhoneNumberRequest>, JsonRejection>,
) -> Result<Json<PhoneNumberInfo>, HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, id = req.id, "Handling update_phone_number request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::update_phone_number(&mut persistence, &req)?))
}

pub async fn handle_delete_phone_number(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = actor.id, id, "Handling delete_phone_number request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::delete_phone_number(&mut persistence, id)?))
}

// ========================================================================
// Internal Numbers
// ========================================================================

pub async fn handle_create_internal_number(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<CreateInternalNumberRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<InternalNumberInfo>), HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, number = %req.number, "Handling create_internal_number request");

    let mut persistence = app_state.persistence.lock().await;
    let row: InternalNumberInfo = phonedesk_api::create_internal_number(&mut persistence, &req)?;
    Ok(created(row))
}

pub async fn handle_list_internal_numbers(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_internal_numbers(&mut persistence)?))
}

/// Handler for GET `/internal-numbers/head` and `/internal-numbers/all/head`.
pub async fn handle_list_internal_numbers_head(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_internal_numbers_head(&mut persistence)?))
}

pub async fn handle_get_internal_number(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<InternalNumberInfo>, HttpError> {
    debug!(id, "Handling get_internal_number request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::get_internal_number(&mut persistence, id)?))
}

pub async fn handle_search_internal_numbers(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(query): Path<String>,
) -> Result<Json<Vec<InternalNumberInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::search_internal_numbers_by_owner_name(
        &mut persistence,
        &query,
    )?))
}

pub async fn handle_update_internal_number(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<UpdateInternalNumberRequest>, JsonRejection>,
) -> Result<Json<InternalNumberInfo>, HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, id = req.id, "Handling update_internal_number request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::update_internal_number(
        &mut persistence,
        &req,
    )?))
}

pub async fn handle_delete_internal_number(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = actor.id, id, "Handling delete_internal_number request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::delete_internal_number(&mut persistence, id)?))
}

// ========================================================================
// Tickets
// ========================================================================

pub async fn handle_create_ticket(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<CreateTicketRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TicketInfo>), HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, user_id = req.user_id, "Handling create_ticket request");

    let mut persistence = app_state.persistence.lock().await;
    let row: TicketInfo = phonedesk_api::create_ticket(&mut persistence, &req)?;
    Ok(created(row))
}

pub async fn handle_list_tickets(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_tickets(&mut persistence)?))
}

pub async fn handle_list_tickets_head(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_tickets_head(&mut persistence)?))
}

pub async fn handle_get_ticket(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<TicketInfo>, HttpError> {
    debug!(id, "Handling get_ticket request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::get_ticket(&mut persistence, id)?))
}

/// Handler for GET `/tickets/user-ticket/{user_id}`.
pub async fn handle_get_user_ticket(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<TicketInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::get_user_ticket(&mut persistence, user_id)?))
}

/// Handler for GET `/tickets/all-user-tickets/{user_id}`.
pub async fn handle_list_user_tickets(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(list_response(phonedesk_api::list_user_tickets(&mut persistence, user_id)?))
}

pub async fn handle_search_tickets(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Path(query): Path<String>,
) -> Result<Json<Vec<TicketInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::search_tickets(&mut persistence, &query)?))
}

pub async fn handle_update_ticket(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    payload: Result<Json<UpdateTicketRequest>, JsonRejection>,
) -> Result<Json<TicketInfo>, HttpError> {
    let Json(req) = payload?;
    info!(actor_id = actor.id, id = req.id, "Handling update_ticket request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::update_ticket(&mut persistence, &req)?))
}

pub async fn handle_delete_ticket(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = actor.id, id, "Handling delete_ticket request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::delete_ticket(&mut persistence, id)?))
}

// ========================================================================
// CSV Transfer
// ========================================================================

/// An uploaded file taken from the `file` field of a multipart body.
struct Upload {
    filename: String,
    content: Vec<u8>,
}

/// Reads the `file` field of a multipart upload. Other fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, HttpError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename: String = field.file_name().unwrap_or_default().to_string();
        let content: Vec<u8> = field.bytes().await?.to_vec();
        return Ok(Upload { filename, content });
    }
    Err(HttpError::bad_request("Missing multipart field 'file'"))
}

fn csv_attachment(export: CsvExport) -> Response {
    (
        [
            (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", export.filename),
            ),
        ],
        export.body,
    )
        .into_response()
}

/// Handler for GET `/phone-numbers/csv`.
pub async fn handle_export_phone_numbers(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Response, HttpError> {
    info!(actor_id = actor.id, "Handling phone number export");
    let mut persistence = app_state.persistence.lock().await;
    let export: CsvExport = phonedesk_api::export_phone_numbers_csv(&mut persistence)?;
    Ok(csv_attachment(export))
}

/// Handler for POST `/phone-numbers/csv`.
pub async fn handle_import_phone_numbers(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    multipart: Multipart,
) -> Result<Json<ImportSummary>, HttpError> {
    let upload: Upload = read_upload(multipart).await?;
    info!(
        actor_id = actor.id,
        filename = %upload.filename,
        bytes = upload.content.len(),
        "Handling phone number import"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::import_phone_numbers_csv(
        &mut persistence,
        &upload.filename,
        &upload.content,
    )?))
}

/// Handler for GET `/internal-numbers/csv`.
pub async fn handle_export_internal_numbers(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Response, HttpError> {
    info!(actor_id = actor.id, "Handling internal number export");
    let mut persistence = app_state.persistence.lock().await;
    let export: CsvExport = phonedesk_api::export_internal_numbers_csv(&mut persistence)?;
    Ok(csv_attachment(export))
}

/// Handler for POST `/internal-numbers/csv`.
pub async fn handle_import_internal_numbers(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    multipart: Multipart,
) -> Result<Json<ImportSummary>, HttpError> {
    let upload: Upload = read_upload(multipart).await?;
    info!(
        actor_id = actor.id,
        filename = %upload.filename,
        bytes = upload.content.len(),
        "Handling internal number import"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(phonedesk_api::import_internal_numbers_csv(
        &mut persistence,
        &upload.filename,
        &upload.content,
    )?))
}
