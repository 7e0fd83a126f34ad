// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - typed access to the wellness API.
//!
//! `ApiClient` carries the credentials; each resource module adds an
//! accessor on it (`client.auth()`, `client.daily_logs()`, ...).

pub mod activities;
pub mod api_client;
pub mod auth;
pub mod daily_logs;
pub mod leaderboard;
pub mod recommendations;
pub mod referral;
pub mod weekly_plans;

pub use activities::ActivityFilter;
pub use api_client::{ApiClient, ApiRequest, LogNavigator, Navigator};
pub use auth::{
    AddFamilyMemberRequest, AuthData, ChangePasswordRequest, LoginRequest, RegisterRequest,
    RequestOtpRequest, UpdateProfileRequest, VerifyOtpRequest,
};
pub use weekly_plans::{CreatePlanRequest, FirstTimeSetupRequest, PlanActivityInput};
