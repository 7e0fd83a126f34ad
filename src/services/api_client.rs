// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the wellness API.
//!
//! Handles:
//! - Bearer token injection (read from the token cookie on every attempt)
//! - Active profile injection as the `profileId` query parameter
//! - One silent token refresh and replay after a 401
//! - Forced logout and redirect to the login page when refresh fails
//!
//! Every other error status is handed back to the caller untouched.

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::ApiResponse;
use crate::session::SessionStore;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Query parameter carrying the active profile id.
pub const PROFILE_QUERY_PARAM: &str = "profileId";

/// Refresh endpoint, relative to the API base URL.
pub const REFRESH_PATH: &str = "/auth/refresh-token";

/// Where a failed refresh sends the user.
pub const LOGIN_PATH: &str = "/login";

/// Endpoints whose 401 means "bad credentials", not "expired token".
const AUTH_ENDPOINTS: &[&str] = &[
    "/auth/login",
    "/auth/register",
    "/auth/verify-otp",
    "/auth/request-otp",
];

fn is_auth_endpoint(path: &str) -> bool {
    AUTH_ENDPOINTS.iter().any(|endpoint| path.starts_with(endpoint))
}

/// Client-side navigation hook used when the session is force-ended.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that only records the request in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(path, "Navigation requested");
    }
}

/// A replayable request description.
///
/// Credentials are not part of it: they are attached fresh on each attempt.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Decode(format!("Failed to encode request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

/// Where one logical request is in the 401 recovery flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Refreshing,
    RetriedOnce,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshData {
    access_token: String,
}

/// Credential-injecting API client shared by all typed service modules.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a client against `config.api_base_url`.
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            // Keeps the backend's refresh cookie between login and refresh.
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
            navigator: Arc::new(LogNavigator),
        })
    }

    /// Client with a session persisted under `config.session_dir`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let session = Arc::new(SessionStore::on_disk(&config.session_dir));
        Self::new(config, session)
    }

    /// Replace the navigator invoked on forced logout.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ─── Decoding helpers ────────────────────────────────────────────────────

    /// Send and decode the full response envelope.
    ///
    /// A 2xx response with an empty body (e.g. 204) counts as a successful
    /// envelope without data.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<ApiResponse<T>> {
        let response = self.execute(&request).await?;
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiResponse::empty());
        }
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Decode(format!("{} {}: {}", request.method, request.path, e)))
    }

    /// Send and return the envelope's payload, which must be present.
    pub async fn send_data<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let path = request.path.clone();
        self.send_optional(request)
            .await?
            .ok_or_else(|| ApiError::Decode(format!("{path}: response has no data")))
    }

    /// Send and return the payload, treating `data: null` as `None`.
    pub async fn send_optional<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Option<T>> {
        let envelope = self.send::<T>(request).await?;
        if !envelope.success {
            return Err(ApiError::Rejected(envelope.message));
        }
        Ok(envelope.data)
    }

    /// Send a request whose payload is irrelevant; returns the message.
    pub async fn send_message(&self, request: ApiRequest) -> Result<String> {
        let envelope = self.send::<serde_json::Value>(request).await?;
        if !envelope.success {
            return Err(ApiError::Rejected(envelope.message));
        }
        Ok(envelope.message)
    }

    // ─── Request execution ───────────────────────────────────────────────────

    /// Run one logical request through the 401 recovery flow.
    ///
    /// A 401 from a non-auth endpoint triggers exactly one refresh. A
    /// successful refresh replays the request once; its outcome, including
    /// a second 401, goes straight to the caller. A failed refresh ends the
    /// session.
    pub async fn execute(&self, request: &ApiRequest) -> Result<reqwest::Response> {
        let mut attempt = Attempt::First;

        loop {
            attempt = match attempt {
                Attempt::First => {
                    let response = self.dispatch(request).await?;
                    if response.status() == StatusCode::UNAUTHORIZED
                        && !is_auth_endpoint(&request.path)
                    {
                        tracing::debug!(path = %request.path, "Access token rejected, refreshing");
                        Attempt::Refreshing
                    } else {
                        return check_status(response).await;
                    }
                }
                Attempt::Refreshing => match self.refresh_access_token().await {
                    Ok(token) => {
                        self.session.set_access_token(Some(token));
                        tracing::info!(path = %request.path, "Token refreshed, replaying request");
                        Attempt::RetriedOnce
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Token refresh failed, ending session");
                        self.session.logout();
                        self.navigator.navigate(LOGIN_PATH);
                        return Err(ApiError::SessionExpired);
                    }
                },
                Attempt::RetriedOnce => {
                    let response = self.dispatch(request).await?;
                    return check_status(response).await;
                }
            };
        }
    }

    /// Exchange the current session for a new access token.
    ///
    /// Does not touch the session store; the caller decides what to do with
    /// the result.
    pub async fn refresh_access_token(&self) -> Result<String> {
        let url = format!("{}{}", self.base_url, REFRESH_PATH);
        let mut builder = self.http.post(&url);
        if let Some(token) = self.session.cookie_token() {
            builder = builder.bearer_auth(token);
        }

        let response = check_status(builder.send().await?).await?;
        let envelope: ApiResponse<RefreshData> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Failed to parse refresh response: {e}")))?;

        if !envelope.success {
            return Err(ApiError::Rejected(envelope.message));
        }

        envelope
            .data
            .map(|d| d.access_token)
            .ok_or_else(|| ApiError::Decode("Refresh response has no token".to_string()))
    }

    /// Send one attempt with the credentials current at this moment.
    async fn dispatch(&self, request: &ApiRequest) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), &url);

        // Cookie, not store: the store may not have caught up yet.
        if let Some(token) = self.session.cookie_token() {
            builder = builder.bearer_auth(token);
        }

        let mut query = request.query.clone();
        if let Some(profile_id) = self.session.selected_profile_id() {
            query.retain(|(k, _)| k != PROFILE_QUERY_PARAM);
            query.push((PROFILE_QUERY_PARAM.to_string(), profile_id));
        }
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, path = %request.path, "Sending API request");
        Ok(builder.send().await?)
    }
}

/// Turn a non-success response into `ApiError::Status`.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!("API rate limit hit (429)");
    }

    Err(ApiError::from_status(status.as_u16(), &body))
}
