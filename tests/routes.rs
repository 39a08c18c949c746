//! End-to-end tests over the full router: auth gate, session lifecycle,
//! roster CRUD and the rendered pages.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use frontdesk_core::{store, NewPatient, PatientRegistry};
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

async fn test_app() -> (Router, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory SQLite should connect");
    store::run_migrations(&pool).await.expect("schema");
    store::seed_users(&pool).await.expect("seed users");
    let app = frontdesk_run::app(pool.clone()).await.expect("router");
    (app, pool)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_cookies(uri: &str, cookies: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookies)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str, cookies: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collapse every `Set-Cookie` header into a `Cookie` header value.
fn cookies_from(response: &Response<Body>) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| {
            value
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
}

/// Log in as the seeded registration clerk and return the cookie header to
/// replay on subsequent requests.
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            "username=RE0001&password=tcs_user1",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/user");
    cookies_from(&response)
}

#[tokio::test]
async fn welcome_page_is_public() {
    let (app, _pool) = test_app().await;

    for uri in ["/", "/index"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Welcome to XYZ Hospital"));
    }
}

#[tokio::test]
async fn healthz_is_public() {
    let (app, _pool) = test_app().await;

    let response = app.oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn login_sets_identity_cookies_and_session() {
    let (app, _pool) = test_app().await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            "username=RE0001&password=tcs_user1",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/user");

    let cookies = cookies_from(&response);
    assert!(cookies.contains("loggedInUserId=RE0001"));
    assert!(cookies.contains("loggedInUserName=reuser1"));
    assert!(cookies.contains("loggedInUserType=Registration"));
    // Plus the server-tracked session id.
    assert_eq!(response.headers().get_all(header::SET_COOKIE).iter().count(), 4);

    let home = app.oneshot(get_with_cookies("/user", &cookies)).await.unwrap();
    assert_eq!(home.status(), StatusCode::OK);
    let body = body_string(home).await;
    assert!(body.contains("reuser1"));
    assert!(body.contains("RE0001"));
    assert!(body.contains("Registration"));
}

#[tokio::test]
async fn login_with_bad_credentials_renders_plain_message() {
    let (app, _pool) = test_app().await;

    for body in [
        "username=RE0001&password=wrong",
        "username=ZZ9999&password=tcs_user1",
    ] {
        let response = app.clone().oneshot(post_form("/login", body, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(body_string(response).await.contains("No such user exists"));
    }
}

#[tokio::test]
async fn login_page_redirects_when_already_authenticated() {
    let (app, _pool) = test_app().await;
    let cookies = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookies("/login", &cookies))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/user");

    let fresh = app.oneshot(get("/login")).await.unwrap();
    assert_eq!(fresh.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_redirect_to_login_without_a_session() {
    let (app, pool) = test_app().await;
    let registry = PatientRegistry::new(pool);
    let id = registry
        .create(NewPatient {
            ssn: 987_412_365,
            name: "natsu".into(),
            address: "f-street-01, fiore".into(),
            age: 19,
            registration_type: "General".into(),
        })
        .await
        .unwrap();

    let gated = [
        "/user",
        "/patients",
        "/addnewpatient",
        "/updateDetails",
        "/updateDetails?id=1",
        "/pat/1",
    ];
    for uri in gated {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {uri}");
        assert_eq!(location(&response), "/login", "GET {uri}");
    }

    // A gated POST performs no store mutation.
    let update = format!(
        "patient_id={id}&ssn=1&name=changed&age=1&address=changed&registration_type=changed"
    );
    let response = app
        .clone()
        .oneshot(post_form("/updateDetails", &update, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let patient = registry.get(id).await.unwrap().unwrap();
    assert_eq!(patient.name, "natsu");

    // Forged identity cookies without a server-side session fail the gate.
    let forged = app
        .oneshot(get_with_cookies("/patients", "loggedInUserId=RE0001"))
        .await
        .unwrap();
    assert_eq!(forged.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&forged), "/login");
}

#[tokio::test]
async fn register_patient_then_roster_lists_them() {
    let (app, pool) = test_app().await;
    let cookies = login(&app).await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/addnewpatient",
            "ssn=987412399&name=Erza&address=f-street-09%2C+fiore&age=20&registration_type=General",
            Some(&cookies),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/patients");

    let roster = app
        .clone()
        .oneshot(get_with_cookies("/patients", &cookies))
        .await
        .unwrap();
    assert_eq!(roster.status(), StatusCode::OK);
    let body = body_string(roster).await;
    assert!(body.contains("Erza"));
    assert!(body.contains("987412399"));

    let registry = PatientRegistry::new(pool);
    let patients = registry.list().await.unwrap();
    assert_eq!(patients.len(), 1);
    let erza = &patients[0];
    assert_eq!(erza.ssn, 987_412_399);
    assert_eq!(erza.address, "f-street-09, fiore");
    assert_eq!(erza.age, 20);
    assert_eq!(erza.status, 1);
    assert_eq!(
        erza.date_of_joining,
        chrono::Local::now().format("%Y-%m-%d").to_string()
    );
}

#[tokio::test]
async fn update_overwrites_fields_and_acknowledges() {
    let (app, pool) = test_app().await;
    let registry = PatientRegistry::new(pool);
    let id = registry
        .create(NewPatient {
            ssn: 987_412_399,
            name: "Erza".into(),
            address: "f-street-09, fiore".into(),
            age: 20,
            registration_type: "General".into(),
        })
        .await
        .unwrap();
    let before = registry.get(id).await.unwrap().unwrap();

    let cookies = login(&app).await;
    // The apostrophe travels as a bound parameter, not as SQL text.
    let form = format!(
        "patient_id={id}&ssn=987412400&name=Erza+O%27Scarlet&age=21&address=g-street-11%2C+magnolia&registration_type=Trauma"
    );
    let response = app
        .clone()
        .oneshot(post_form("/updateDetails", &form, Some(&cookies)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "updated!");

    let after = registry.get(id).await.unwrap().unwrap();
    assert_eq!(after.ssn, 987_412_400);
    assert_eq!(after.name, "Erza O'Scarlet");
    assert_eq!(after.age, 21);
    assert_eq!(after.address, "g-street-11, magnolia");
    assert_eq!(after.registration_type, "Trauma");
    assert_eq!(after.patient_id, before.patient_id);
    assert_eq!(after.date_of_joining, before.date_of_joining);
    assert_eq!(after.status, before.status);
}

#[tokio::test]
async fn edit_form_is_prefilled_from_the_store() {
    let (app, pool) = test_app().await;
    let registry = PatientRegistry::new(pool);
    let id = registry
        .create(NewPatient {
            ssn: 987_412_365,
            name: "natsu".into(),
            address: "f-street-01, fiore".into(),
            age: 19,
            registration_type: "General".into(),
        })
        .await
        .unwrap();

    let cookies = login(&app).await;
    let response = app
        .clone()
        .oneshot(get_with_cookies(
            &format!("/updateDetails?id={id}"),
            &cookies,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("natsu"));
    assert!(body.contains("f-street-01, fiore"));

    // Without an id the clerk gets the blank form.
    let blank = app
        .oneshot(get_with_cookies("/updateDetails", &cookies))
        .await
        .unwrap();
    assert_eq!(blank.status(), StatusCode::OK);
    assert!(body_string(blank).await.contains("Update patient details"));
}

#[tokio::test]
async fn missing_patient_renders_plain_message_not_404() {
    let (app, _pool) = test_app().await;
    let cookies = login(&app).await;

    let response = app
        .oneshot(get_with_cookies("/updateDetails?id=9999999", &cookies))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("no such records found!"));
}

#[tokio::test]
async fn pat_route_is_gated_and_returns_the_bare_address() {
    let (app, pool) = test_app().await;
    let registry = PatientRegistry::new(pool);
    let id = registry
        .create(NewPatient {
            ssn: 987_412_365,
            name: "natsu".into(),
            address: "f-street-01, fiore".into(),
            age: 19,
            registration_type: "General".into(),
        })
        .await
        .unwrap();

    let cookies = login(&app).await;
    let response = app
        .clone()
        .oneshot(get_with_cookies(&format!("/pat/{id}"), &cookies))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "f-street-01, fiore");
}

#[tokio::test]
async fn duplicate_ssn_is_a_generic_server_error() {
    let (app, _pool) = test_app().await;
    let cookies = login(&app).await;

    let form = "ssn=987412399&name=Erza&address=f-street-09%2C+fiore&age=20&registration_type=General";
    let first = app
        .clone()
        .oneshot(post_form("/addnewpatient", form, Some(&cookies)))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    let second = app
        .oneshot(post_form("/addnewpatient", form, Some(&cookies)))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn logout_expires_cookies_and_invalidates_the_session() {
    let (app, _pool) = test_app().await;
    let cookies = login(&app).await;

    let response = app
        .clone()
        .oneshot(post_form("/logout", "", Some(&cookies)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let expirations: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    for name in ["loggedInUserId", "loggedInUserName", "loggedInUserType"] {
        assert!(
            expirations
                .iter()
                .any(|c| c.starts_with(&format!("{name}=;")) && c.contains("Max-Age=0")),
            "{name} should be expired"
        );
    }

    // Replaying the pre-logout cookies fails: the server-side session is gone.
    let replay = app.oneshot(get_with_cookies("/user", &cookies)).await.unwrap();
    assert_eq!(replay.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&replay), "/login");
}

#[tokio::test]
async fn unmatched_routes_render_the_404_page() {
    let (app, _pool) = test_app().await;

    let response = app.oneshot(get("/no/such/page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("Page not found"));
}
