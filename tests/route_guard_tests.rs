// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route guard tests, both as a pure decision and through the edge router.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use kinfit::middleware::guard::{evaluate, GuardConfig, GuardDecision};
use tower::ServiceExt;

mod common;

fn redirect(to: &str) -> GuardDecision {
    GuardDecision::Redirect(to.to_string())
}

#[test]
fn test_guard_scenarios() {
    let config = GuardConfig::default();

    assert_eq!(evaluate("/", false, &config), redirect("/login"));
    assert_eq!(evaluate("/", true, &config), redirect("/home"));
    assert_eq!(evaluate("/tasks", false, &config), redirect("/login"));
    assert_eq!(evaluate("/tasks", true, &config), GuardDecision::Pass);
    assert_eq!(evaluate("/login", true, &config), redirect("/home"));
    assert_eq!(evaluate("/settings", true, &config), GuardDecision::Pass);
}

#[test]
fn test_guard_nested_and_unlisted_paths() {
    let config = GuardConfig::default();

    assert_eq!(evaluate("/plans/abc/edit", false, &config), redirect("/login"));
    assert_eq!(evaluate("/register", false, &config), GuardDecision::Pass);
    assert_eq!(evaluate("/verify-otp", true, &config), redirect("/home"));
    assert_eq!(evaluate("/settings", false, &config), GuardDecision::Pass);
    assert_eq!(evaluate("/about", false, &config), GuardDecision::Pass);
}

async fn get(path: &str, token: Option<&str>) -> Response {
    let (app, _) = common::create_test_app();

    let mut request = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        request = request.header(header::COOKIE, format!("accessToken={token}"));
    }

    app.oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_router_redirects_root() {
    let response = get("/", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");

    let response = get("/", Some("tok")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/home");
}

#[tokio::test]
async fn test_router_protects_pages() {
    let response = get("/tasks", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");

    // Redirects still carry the security headers.
    assert_eq!(
        response.headers().get("X-Frame-Options").unwrap(),
        "DENY"
    );
}

#[tokio::test]
async fn test_router_passes_authenticated_request() {
    // The test bundle directory is empty, so a passed request ends in 404
    // from the static file service rather than a redirect.
    let response = get("/tasks", Some("tok")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::LOCATION).is_none());
}

#[tokio::test]
async fn test_empty_cookie_counts_as_signed_out() {
    let response = get("/home", Some("")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_health_check_is_public() {
    let response = get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
