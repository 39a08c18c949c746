//! Request handlers.
//!
//! Every non-public route re-checks the session at the top of its handler
//! and redirects to `/login` when the check fails, before touching the
//! store. Authentication is the server-tracked session; the legacy
//! `loggedInUser*` cookies are written for the browser's benefit but no
//! handler reads them.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::Form;
use frontdesk_core::{
    staff, FrontDeskError, NewPatient, PatientRegistry, PatientUpdate, StaffSession, StaffUser,
    SESSION_STAFF_KEY,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::views;

/// Resolve the caller's identity from the server-tracked session.
///
/// A session-store failure is logged and treated as "not logged in"; the
/// caller lands on the login page rather than an error page.
async fn current_staff(session: &Session) -> Option<StaffSession> {
    match session.get::<StaffSession>(SESSION_STAFF_KEY).await {
        Ok(staff) => staff,
        Err(error) => {
            tracing::warn!(%error, "failed to load session");
            None
        }
    }
}

async fn require_staff(session: &Session) -> Result<StaffSession, Redirect> {
    current_staff(session).await.ok_or_else(|| Redirect::to("/login"))
}

fn store_failure(error: FrontDeskError) -> Response {
    tracing::error!(%error, "store operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(views::server_error_page()),
    )
        .into_response()
}

fn session_failure(error: tower_sessions::session::Error) -> Response {
    tracing::error!(%error, "session store operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(views::server_error_page()),
    )
        .into_response()
}

/// The client-readable identity cookies, set on login.
fn display_cookies(staff: &StaffUser) -> AppendHeaders<[(HeaderName, String); 3]> {
    AppendHeaders([
        (
            header::SET_COOKIE,
            format!("loggedInUserId={}; Path=/", staff.id),
        ),
        (
            header::SET_COOKIE,
            format!("loggedInUserName={}; Path=/", staff.name),
        ),
        (
            header::SET_COOKIE,
            format!("loggedInUserType={}; Path=/", staff.role),
        ),
    ])
}

/// Expire the identity cookies, set on logout.
fn expired_display_cookies() -> AppendHeaders<[(HeaderName, String); 3]> {
    AppendHeaders(
        ["loggedInUserId", "loggedInUserName", "loggedInUserType"].map(|name| {
            (
                header::SET_COOKIE,
                format!("{name}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT"),
            )
        }),
    )
}

pub(crate) async fn welcome() -> Html<String> {
    Html(views::welcome_page())
}

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

/// GET `/login`: the form, unless the caller is already logged in.
pub(crate) async fn login_form(session: Session) -> Response {
    if current_staff(&session).await.is_some() {
        return Redirect::to("/user").into_response();
    }
    Html(views::login_page()).into_response()
}

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    username: String,
    password: String,
}

/// POST `/login`: credential check against the store.
pub(crate) async fn login_submit(
    State(pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let staff = match staff::authenticate(&pool, &form.username, &form.password).await {
        Ok(staff) => staff,
        Err(error) => return store_failure(error),
    };
    let Some(staff) = staff else {
        return Html(views::no_such_user_page()).into_response();
    };

    if let Err(error) = session
        .insert(SESSION_STAFF_KEY, StaffSession::from(&staff))
        .await
    {
        return session_failure(error);
    }

    tracing::info!(user_id = %staff.id, role = %staff.role, "staff logged in");
    (display_cookies(&staff), Redirect::to("/user")).into_response()
}

/// POST `/logout`: unconditionally drop the session and expire the identity
/// cookies. No authentication required.
pub(crate) async fn logout(session: Session) -> Response {
    if let Err(error) = session.flush().await {
        tracing::warn!(%error, "failed to flush session on logout");
    }
    (expired_display_cookies(), Redirect::to("/login")).into_response()
}

pub(crate) async fn user_home(session: Session) -> Response {
    let staff = match require_staff(&session).await {
        Ok(staff) => staff,
        Err(redirect) => return redirect.into_response(),
    };
    Html(views::user_home_page(&staff)).into_response()
}

pub(crate) async fn patients(
    State(registry): State<PatientRegistry>,
    session: Session,
) -> Response {
    if let Err(redirect) = require_staff(&session).await {
        return redirect.into_response();
    }
    match registry.list().await {
        Ok(rows) => Html(views::patients_page(&rows)).into_response(),
        Err(error) => store_failure(error),
    }
}

#[derive(Deserialize)]
pub(crate) struct UpdateDetailsQuery {
    id: Option<i64>,
}

/// GET `/updateDetails`: with `?id=` the edit form is prefilled from the
/// store; without it the clerk gets a blank form.
pub(crate) async fn update_details_form(
    State(registry): State<PatientRegistry>,
    session: Session,
    Query(query): Query<UpdateDetailsQuery>,
) -> Response {
    if let Err(redirect) = require_staff(&session).await {
        return redirect.into_response();
    }

    let Some(id) = query.id else {
        return Html(views::update_form_page(None)).into_response();
    };
    match registry.get(id).await {
        Ok(Some(patient)) => Html(views::update_form_page(Some(&patient))).into_response(),
        Ok(None) => Html(views::no_such_record_page()).into_response(),
        Err(error) => store_failure(error),
    }
}

#[derive(Deserialize)]
pub(crate) struct UpdatePatientForm {
    patient_id: i64,
    ssn: i64,
    name: String,
    age: i64,
    address: String,
    registration_type: String,
}

/// POST `/updateDetails`: overwrite the mutable fields of one patient.
pub(crate) async fn update_details_submit(
    State(registry): State<PatientRegistry>,
    session: Session,
    Form(form): Form<UpdatePatientForm>,
) -> Response {
    if let Err(redirect) = require_staff(&session).await {
        return redirect.into_response();
    }

    let update = PatientUpdate {
        patient_id: form.patient_id,
        ssn: form.ssn,
        name: form.name,
        age: form.age,
        address: form.address,
        registration_type: form.registration_type,
    };
    match registry.update(update).await {
        Ok(()) => views::updated_ack().into_response(),
        Err(error) => store_failure(error),
    }
}

#[derive(Deserialize)]
pub(crate) struct NewPatientForm {
    ssn: i64,
    name: String,
    address: String,
    age: i64,
    registration_type: String,
}

pub(crate) async fn add_patient_form(session: Session) -> Response {
    if let Err(redirect) = require_staff(&session).await {
        return redirect.into_response();
    }
    Html(views::add_patient_page()).into_response()
}

/// POST `/addnewpatient`: register the patient, then back to the roster.
pub(crate) async fn add_patient_submit(
    State(registry): State<PatientRegistry>,
    session: Session,
    Form(form): Form<NewPatientForm>,
) -> Response {
    if let Err(redirect) = require_staff(&session).await {
        return redirect.into_response();
    }

    let new = NewPatient {
        ssn: form.ssn,
        name: form.name,
        address: form.address,
        age: form.age,
        registration_type: form.registration_type,
    };
    match registry.create(new).await {
        Ok(patient_id) => {
            tracing::info!(patient_id, "patient registered");
            Redirect::to("/patients").into_response()
        }
        Err(error) => store_failure(error),
    }
}

/// GET `/pat/:id`: the patient's bare address as plain text. Gated like
/// every other data route.
pub(crate) async fn patient_address(
    State(registry): State<PatientRegistry>,
    session: Session,
    Path(id): Path<i64>,
) -> Response {
    if let Err(redirect) = require_staff(&session).await {
        return redirect.into_response();
    }
    match registry.get(id).await {
        Ok(Some(patient)) => patient.address.into_response(),
        Ok(None) => Html(views::no_such_record_page()).into_response(),
        Err(error) => store_failure(error),
    }
}

pub(crate) async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response()
}
