// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod routes;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use clap::Parser;
use phonedesk_api::{DEFAULT_TOKEN_TTL_MINUTES, TokenConfig, UserInfo, bootstrap_admin};
use phonedesk_persistence::{DEFAULT_HASH_COST, MAX_HASH_COST, MIN_HASH_COST, Persistence};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::routes::{
    handle_create_internal_number, handle_create_owner, handle_create_phone_number,
    handle_create_ticket, handle_create_user, handle_create_user_type,
    handle_delete_internal_number, handle_delete_owner, handle_delete_phone_number,
    handle_delete_ticket, handle_delete_user, handle_delete_user_type,
    handle_export_internal_numbers, handle_export_phone_numbers, handle_get_internal_number,
    handle_get_owner, handle_get_phone_number, handle_get_ticket, handle_get_user,
    handle_get_user_ticket, handle_get_user_type, handle_import_internal_numbers,
    handle_import_phone_numbers, handle_list_internal_numbers, handle_list_internal_numbers_head,
    handle_list_owners, handle_list_owners_head, handle_list_phone_numbers,
    handle_list_phone_numbers_head, handle_list_tickets, handle_list_tickets_head,
    handle_list_user_tickets, handle_list_user_types, handle_list_user_types_head,
    handle_list_users, handle_list_users_by_type, handle_list_users_head, handle_login,
    handle_search_internal_numbers, handle_search_owners, handle_search_phone_numbers,
    handle_search_tickets, handle_search_user_types, handle_search_users,
    handle_update_internal_number, handle_update_owner, handle_update_phone_number,
    handle_update_ticket, handle_update_user, handle_update_user_password,
    handle_update_user_type,
};

/// Largest accepted request body, CSV uploads included.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Longest accepted bearer token lifetime: one year.
const MAX_TOKEN_TTL_MINUTES: i64 = 525_600;

/// `PhoneDesk` Server - HTTP server for the phone directory and help desk
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    /// With the `mysql` feature, a `mysql://` URL selects `MySQL`/`MariaDB`.
    #[arg(short, long, env = "PHONEDESK_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "PHONEDESK_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "PHONEDESK_PORT", default_value_t = 3000)]
    port: u16,

    /// Secret used to sign bearer tokens
    #[arg(long, env = "PHONEDESK_TOKEN_SECRET", hide_env_values = true)]
    token_secret: String,

    /// Bearer token lifetime in minutes, at most one year
    #[arg(
        long,
        env = "PHONEDESK_TOKEN_TTL_MINUTES",
        default_value_t = DEFAULT_TOKEN_TTL_MINUTES,
        value_parser = clap::value_parser!(i64).range(1..=MAX_TOKEN_TTL_MINUTES)
    )]
    token_ttl_minutes: i64,

    /// bcrypt cost for new password hashes
    #[arg(
        long,
        env = "PHONEDESK_HASH_COST",
        default_value_t = DEFAULT_HASH_COST,
        value_parser = clap::value_parser!(u32)
            .range(i64::from(MIN_HASH_COST)..=i64::from(MAX_HASH_COST))
    )]
    hash_cost: u32,

    /// Allowed CORS origin; repeat for several. `*` allows any origin.
    #[arg(
        long = "cors-origin",
        env = "PHONEDESK_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    cors_origins: Vec<String>,

    /// User name for the administrator seeded into an empty database
    #[arg(long, env = "PHONEDESK_ADMIN_USER", default_value = "admin")]
    admin_user: String,

    /// Password for the seeded administrator. No user is seeded without it.
    #[arg(long, env = "PHONEDESK_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,
}

/// Application state shared across handlers.
///
/// All database work is serialized through the one persistence handle.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Bearer token signing configuration.
    pub tokens: Arc<TokenConfig>,
}

/// Builds the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| {
                o.parse::<HeaderValue>()
                    .inspect_err(|_| warn!(origin = %o, "Ignoring unparseable CORS origin"))
                    .ok()
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        // User types
        .route("/user-types/add", post(handle_create_user_type))
        .route("/user-types/all", get(handle_list_user_types))
        .route("/user-types/all/head", get(handle_list_user_types_head))
        .route("/user-types/by-name/{query}", get(handle_search_user_types))
        .route("/user-types/update", put(handle_update_user_type))
        .route("/user-types/delete/{id}", delete(handle_delete_user_type))
        .route("/user-types/{id}", get(handle_get_user_type))
        // Users
        .route("/users/add", post(handle_create_user))
        .route("/users/all", get(handle_list_users))
        .route("/users/all/head", get(handle_list_users_head))
        .route("/users/by-type/{type_id}", get(handle_list_users_by_type))
        .route("/users/by-name/{query}", get(handle_search_users))
        .route("/users/update", put(handle_update_user))
        .route("/users/password", put(handle_update_user_password))
        .route("/users/delete/{id}", delete(handle_delete_user))
        .route("/users/{id}", get(handle_get_user))
        // Phone number owners
        .route("/phone-number-owners/add", post(handle_create_owner))
        .route("/phone-number-owners/all", get(handle_list_owners))
        .route("/phone-number-owners/all/head", get(handle_list_owners_head))
        .route("/phone-number-owners/by-name/{query}", get(handle_search_owners))
        .route("/phone-number-owners/update", put(handle_update_owner))
        .route("/phone-number-owners/delete/{id}", delete(handle_delete_owner))
        .route("/phone-number-owners/{id}", get(handle_get_owner))
        // Phone numbers
        .route("/phone-numbers/add", post(handle_create_phone_number))
        .route("/phone-numbers/all", get(handle_list_phone_numbers))
        .route("/phone-numbers/all/head", get(handle_list_phone_numbers_head))
        .route("/phone-numbers/by-number/{query}", get(handle_search_phone_numbers))
        .route("/phone-numbers/update", put(handle_update_phone_number))
        .route("/phone-numbers/delete/{id}", delete(handle_delete_phone_number))
        .route(
            "/phone-numbers/csv",
            get(handle_export_phone_numbers).post(handle_import_phone_numbers),
        )
        .route("/phone-numbers/{id}", get(handle_get_phone_number))
        // Internal numbers
        .route("/internal-numbers/add", post(handle_create_internal_number))
        .route("/internal-numbers/all", get(handle_list_internal_numbers))
        .route("/internal-numbers/all/head", get(handle_list_internal_numbers_head))
        .route("/internal-numbers/head", get(handle_list_internal_numbers_head))
        .route(
            "/internal-numbers/by-owner-name/{query}",
            get(handle_search_internal_numbers),
        )
        .route("/internal-numbers/update", put(handle_update_internal_number))
        .route("/internal-numbers/delete/{id}", delete(handle_delete_internal_number))
        .route(
            "/internal-numbers/csv",
            get(handle_export_internal_numbers).post(handle_import_internal_numbers),
        )
        .route("/internal-numbers/{id}", get(handle_get_internal_number))
        // Tickets
        .route("/tickets/add", post(handle_create_ticket))
        .route("/tickets/all", get(handle_list_tickets))
        .route("/tickets/all/head", get(handle_list_tickets_head))
        .route("/tickets/by-description/{query}", get(handle_search_tickets))
        .route("/tickets/user-ticket/{user_id}", get(handle_get_user_ticket))
        .route("/tickets/all-user-tickets/{user_id}", get(handle_list_user_tickets))
        .route("/tickets/update", put(handle_update_ticket))
        .route("/tickets/delete/{id}", delete(handle_delete_ticket))
        .route("/tickets/{id}", get(handle_get_ticket))
        // Middleware
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Opens the database named on the command line.
fn open_persistence(database: Option<&str>) -> Result<Persistence, Box<dyn std::error::Error>> {
    match database {
        #[cfg(feature = "mysql")]
        Some(url) if url.starts_with("mysql://") => {
            info!("Using MySQL database");
            Ok(Persistence::new_with_mysql(url)?)
        }
        Some(path) => {
            info!("Using file-based database at: {}", path);
            Ok(Persistence::new_with_file(path)?)
        }
        None => {
            info!("Using in-memory database");
            Ok(Persistence::new_in_memory()?)
        }
    }
}

/// Waits for Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing PhoneDesk Server");

    let mut persistence: Persistence =
        open_persistence(args.database.as_deref())?.with_hash_cost(args.hash_cost);

    if let Some(password) = &args.admin_password {
        let seeded: Option<UserInfo> =
            bootstrap_admin(&mut persistence, &args.admin_user, password)?;
        if let Some(admin) = seeded {
            info!(user_id = admin.id, user_name = %admin.user_name, "Administrator created");
        }
    }

    let tokens: TokenConfig = TokenConfig::new(
        args.token_secret,
        time::Duration::minutes(args.token_ttl_minutes),
    );
    info!(ttl_minutes = args.token_ttl_minutes, "Bearer tokens configured");

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        tokens: Arc::new(tokens),
    };

    let app: Router = build_router(app_state, build_cors_layer(&args.cors_origins));

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
