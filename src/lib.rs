//! Front-desk HTTP server library.
//!
//! Exposes [`app`] so the integration tests can drive the full router
//! in-process; the `frontdesk-run` binary wraps it with process bootstrap.

pub mod handlers;
pub mod views;

use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::Router;
use frontdesk_core::PatientRegistry;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

/// Application state shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
    registry: PatientRegistry,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for PatientRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.registry.clone()
    }
}

/// Build the front-desk router over an already-migrated pool.
///
/// Sessions are tracked server-side in a SQLite-backed store sharing the
/// pool; the browser only ever holds a random session id. Cookies carry no
/// explicit expiry, so a session lasts until the browser discards it or
/// logout flushes the server-side record.
pub async fn app(pool: SqlitePool) -> anyhow::Result<Router> {
    let session_store = SqliteStore::new(pool.clone());
    session_store.migrate().await?;
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnSessionEnd);

    let state = AppState {
        registry: PatientRegistry::new(pool.clone()),
        pool,
    };

    Ok(Router::new()
        .route("/", get(handlers::welcome))
        .route("/index", get(handlers::welcome))
        .route("/healthz", get(handlers::healthz))
        .route(
            "/login",
            get(handlers::login_form).post(handlers::login_submit),
        )
        .route("/logout", post(handlers::logout))
        .route("/user", get(handlers::user_home))
        .route("/patients", get(handlers::patients))
        .route(
            "/updateDetails",
            get(handlers::update_details_form).post(handlers::update_details_submit),
        )
        .route(
            "/addnewpatient",
            get(handlers::add_patient_form).post(handlers::add_patient_submit),
        )
        .route("/pat/:id", get(handlers::patient_address))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(session_layer)
        .with_state(state))
}
