// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router tests driven through `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use phonedesk_api::{LoginResponse, TokenConfig, bootstrap_admin};
use phonedesk_persistence::{MIN_HASH_COST, Persistence};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_cors_layer, build_router};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "AdminPass1";

/// Creates app state over an in-memory database holding one administrator.
pub fn create_test_app_state() -> AppState {
    let mut persistence: Persistence = Persistence::new_in_memory()
        .expect("Failed to create in-memory persistence")
        .with_hash_cost(MIN_HASH_COST);
    bootstrap_admin(&mut persistence, ADMIN_USER, ADMIN_PASSWORD)
        .unwrap()
        .unwrap();

    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        tokens: Arc::new(TokenConfig::with_default_ttl("router-test-secret")),
    }
}

pub fn create_test_app() -> Router {
    build_router(
        create_test_app_state(),
        build_cors_layer(&[String::from("*")]),
    )
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body_bytes.to_vec()).unwrap()
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Logs in as the seeded administrator and returns the bearer token.
pub async fn login_admin(app: &Router) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/login",
            None,
            &serde_json::json!({"username": ADMIN_USER, "password": ADMIN_PASSWORD}),
        ),
    )
    .await;
    let login: LoginResponse = body_json(response).await;
    login.access_token
}
