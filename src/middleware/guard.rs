// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Edge route guard.
//!
//! Decides from the request path and the mere presence of the token cookie
//! whether a page may render. The token itself is not validated here; an
//! expired token is caught by the API client's 401 handling.

use crate::session::cookies::TOKEN_COOKIE;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Path lists and redirect targets for the guard.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Prefixes that require a token cookie
    pub protected_paths: Vec<String>,
    /// Prefixes reserved for signed-out users
    pub auth_paths: Vec<String>,
    pub home_path: String,
    pub login_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            protected_paths: [
                "/home",
                "/tasks",
                "/plans",
                "/progress",
                "/leaderboard",
                "/profile",
                "/select-profile",
                "/onboarding",
                "/referral",
            ]
            .map(String::from)
            .to_vec(),
            auth_paths: ["/login", "/register", "/verify-otp"]
                .map(String::from)
                .to_vec(),
            home_path: "/home".to_string(),
            login_path: "/login".to_string(),
        }
    }
}

/// Outcome of evaluating a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Redirect(String),
}

/// `path` is `prefix` itself or lies beneath it.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return false;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Apply the guard rules, first match wins:
/// 1. `/` goes home with a token, to login without
/// 2. protected prefixes need a token
/// 3. auth-only prefixes bounce users that already have one
/// 4. everything else passes
pub fn evaluate(path: &str, has_token: bool, config: &GuardConfig) -> GuardDecision {
    if path == "/" {
        let target = if has_token {
            &config.home_path
        } else {
            &config.login_path
        };
        return GuardDecision::Redirect(target.clone());
    }

    if !has_token && config.protected_paths.iter().any(|p| matches_prefix(path, p)) {
        return GuardDecision::Redirect(config.login_path.clone());
    }

    if has_token && config.auth_paths.iter().any(|p| matches_prefix(path, p)) {
        return GuardDecision::Redirect(config.home_path.clone());
    }

    GuardDecision::Pass
}

/// Middleware applying [`evaluate`] to every request.
pub async fn route_guard(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let has_token = jar
        .get(TOKEN_COOKIE)
        .map(|c| !c.value().is_empty())
        .unwrap_or(false);

    match evaluate(request.uri().path(), has_token, &state.guard) {
        GuardDecision::Pass => next.run(request).await,
        GuardDecision::Redirect(target) => {
            tracing::debug!(
                path = %request.uri().path(),
                has_token,
                target = %target,
                "Route guard redirect"
            );
            Redirect::temporary(&target).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_prefix_respects_segments() {
        assert!(matches_prefix("/home", "/home"));
        assert!(matches_prefix("/home/stats", "/home"));
        assert!(matches_prefix("/home/stats", "/home/"));
        assert!(!matches_prefix("/homework", "/home"));
        assert!(!matches_prefix("/anything", "/"));
    }

    #[test]
    fn test_custom_targets() {
        let config = GuardConfig {
            home_path: "/dashboard".to_string(),
            ..GuardConfig::default()
        };
        assert_eq!(
            evaluate("/login", true, &config),
            GuardDecision::Redirect("/dashboard".to_string())
        );
    }
}
