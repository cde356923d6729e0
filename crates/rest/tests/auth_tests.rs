//! Registration, login and logout tests.

mod common;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestResponse;
use serde_json::json;

use common::{COOKIE, create_test_server};

fn set_cookies(response: &TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_register_redirects_to_login() {
    let (server, _backend) = create_test_server();

    let response = server
        .post("/api/auth/register")
        .form(&[("username", "ana"), ("rif", "V-12345678-9"), ("password", "s3creta")])
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header(header::LOCATION), "/login");
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_register_missing_field() {
    let (server, _backend) = create_test_server();

    let response = server
        .post("/api/auth/register")
        .form(&[("username", "ana"), ("password", "s3creta")])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Username, RIF, and password are required" }));
}

#[tokio::test]
async fn test_register_duplicate_username_or_rif() {
    let (server, _backend) = create_test_server();

    server
        .post("/api/auth/register")
        .form(&[("username", "ana"), ("rif", "V-1"), ("password", "x")])
        .await
        .assert_status(StatusCode::FOUND);

    // Same username, new RIF
    let response = server
        .post("/api/auth/register")
        .form(&[("username", "ana"), ("rif", "V-2"), ("password", "x")])
        .await;
    response.assert_status(StatusCode::CONFLICT);
    response.assert_json(&json!({ "message": "User already exists or RIF is already registered" }));

    // New username, same RIF
    server
        .post("/api/auth/register")
        .form(&[("username", "beto"), ("rif", "V-1"), ("password", "x")])
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_sets_session_cookies() {
    let (server, _backend) = create_test_server();
    server
        .post("/api/auth/register")
        .form(&[("username", "ana"), ("rif", "V-12345678-9"), ("password", "s3creta")])
        .await
        .assert_status(StatusCode::FOUND);

    let response = server
        .post("/api/auth/login")
        .form(&[("username", "ana"), ("password", "s3creta")])
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header(header::LOCATION), "/dashboard");

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);

    let session = cookies
        .iter()
        .find(|c| c.starts_with("session="))
        .expect("session cookie");
    assert!(session.contains("HttpOnly"));
    assert!(session.contains("Max-Age=604800"));
    assert!(!session.starts_with("session=;"));

    let rif = cookies
        .iter()
        .find(|c| c.starts_with("user_rif="))
        .expect("user_rif cookie");
    assert!(rif.starts_with("user_rif=V-12345678-9;"));
}

#[tokio::test]
async fn test_login_cookie_opens_listing() {
    let (server, _backend) = create_test_server();
    server
        .post("/api/auth/register")
        .form(&[("username", "ana"), ("rif", "V-1"), ("password", "s3creta")])
        .await;

    let response = server
        .post("/api/auth/login")
        .form(&[("username", "ana"), ("password", "s3creta")])
        .await;
    let session = set_cookies(&response)
        .into_iter()
        .find(|c| c.starts_with("session="))
        .unwrap();
    let pair = session.split(';').next().unwrap().to_string();

    server
        .get("/api/retenciones")
        .add_header(COOKIE, HeaderValue::from_str(&pair).unwrap())
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _backend) = create_test_server();
    server
        .post("/api/auth/register")
        .form(&[("username", "ana"), ("rif", "V-1"), ("password", "s3creta")])
        .await;

    let response = server
        .post("/api/auth/login")
        .form(&[("username", "ana"), ("password", "otra")])
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "message": "Invalid credentials" }));
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_login_unknown_user() {
    let (server, _backend) = create_test_server();

    server
        .post("/api/auth/login")
        .form(&[("username", "nadie"), ("password", "x")])
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_field() {
    let (server, _backend) = create_test_server();

    let response = server
        .post("/api/auth/login")
        .form(&[("username", "ana")])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Username and password are required" }));
}

#[tokio::test]
async fn test_logout_expires_session() {
    let (server, _backend) = create_test_server();

    let response = server.get("/api/auth/logout").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header(header::LOCATION), "/login");

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("session=;"));
    assert!(cookies[0].contains("Max-Age=0"));
}
