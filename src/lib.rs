// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Kinfit: client session layer for the family wellness tracker.
//!
//! This crate provides the pieces that sit between the app's pages and the
//! wellness API:
//! - [`session::SessionStore`]: user, household profiles, active profile
//!   and bearer token, persisted across restarts
//! - [`services::ApiClient`]: credential injection and one-shot token
//!   refresh, with a typed module per backend resource
//! - [`middleware::guard`]: cookie-based route guard run at the edge

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod time_utils;

use config::Config;
use middleware::guard::GuardConfig;

/// Shared edge server state.
pub struct AppState {
    pub config: Config,
    pub guard: GuardConfig,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let guard = config.guard_config();
        Self { config, guard }
    }
}
