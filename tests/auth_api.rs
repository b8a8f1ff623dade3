//! HTTP-level tests for admin login, logout and the page guard.

mod common;

use axum::http::{StatusCode, header};
use axum::body::Body;
use axum::http::Request;
use common::{
    ADMIN_EMAIL, ADMIN_PASSWORD, body_json, build_test_app, get, get_with_cookie, post_json, send,
};
use serde_json::json;

fn set_cookie(response: &axum::http::Response<axum::body::Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

fn cookie_value(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("admin-token="))
        .expect("admin-token cookie")
        .to_string()
}

#[tokio::test]
async fn login_sets_a_locked_down_cookie() {
    let app = build_test_app().await;

    let response = post_json(
        app.app(),
        "/api/auth/admin",
        json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("admin-token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=3600"));

    let token = cookie_value(&cookie);
    assert!(app.state.jwt_service.verify_token(&token).is_ok());
    assert_eq!(body_json(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = build_test_app().await;

    let wrong_password = post_json(
        app.app(),
        "/api/auth/admin",
        json!({ "email": ADMIN_EMAIL, "password": "not-it" }),
    )
    .await;
    let unknown_email = post_json(
        app.app(),
        "/api/auth/admin",
        json!({ "email": "nobody@example.com", "password": ADMIN_PASSWORD }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong_password.headers().get(header::SET_COOKIE).is_none());
    assert!(unknown_email.headers().get(header::SET_COOKIE).is_none());

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_email).await;
    assert_eq!(a, b);
    assert_eq!(a["message"], "Invalid credentials");
}

#[tokio::test]
async fn missing_credentials_are_a_bad_request() {
    let app = build_test_app().await;

    let response = post_json(app.app(), "/api/auth/admin", json!({ "email": ADMIN_EMAIL })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Email and password are required"
    );
}

#[tokio::test]
async fn malformed_login_body_is_a_json_bad_request() {
    let app = build_test_app().await;

    let request = Request::post("/api/auth/admin")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let response = send(app.app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "bad_request");

    let request = Request::post("/api/auth/admin")
        .body(Body::from(format!("email={ADMIN_EMAIL}&password={ADMIN_PASSWORD}")))
        .unwrap();
    let response = send(app.app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "bad_request");
}

#[tokio::test]
async fn cookie_from_login_authorizes_mutations() {
    let app = build_test_app().await;

    let login = post_json(
        app.app(),
        "/api/auth/admin",
        json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
    )
    .await;
    let token = cookie_value(&set_cookie(&login));

    let request = axum::http::Request::post("/api/videos")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, format!("admin-token={token}"))
        .body(axum::body::Body::from(json!({ "title": "via cookie" }).to_string()))
        .unwrap();
    let response = common::send(app.app(), request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn logout_expires_the_cookie() {
    let app = build_test_app().await;

    let response = post_json(app.app(), "/api/auth/logout", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("admin-token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn admin_pages_redirect_without_a_valid_cookie() {
    let app = build_test_app().await;

    for uri in ["/admin", "/admin/dashboard", "/admin/video/new", "/admin/video/3/edit"] {
        let response = get(app.app(), uri).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{uri}");
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");
    }

    let response = get_with_cookie(app.app(), "/admin/dashboard", "garbage").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn admin_pages_render_with_a_valid_cookie() {
    let app = build_test_app().await;
    let token = common::admin_token(&app);

    let response = get_with_cookie(app.app(), "/admin/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_with_cookie(app.app(), "/admin/video/7/edit", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_page_is_never_guarded() {
    let app = build_test_app().await;
    let response = get(app.app(), "/admin/login").await;
    assert_eq!(response.status(), StatusCode::OK);
}
