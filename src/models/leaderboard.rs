// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard rankings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub profile_id: String,
    pub name: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub streak: u32,
    /// Set by the backend on the caller's own row
    #[serde(default)]
    pub is_current_profile: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    /// "weekly" or "all-time"
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub activity_id: Option<String>,
    #[serde(default)]
    pub entries: Vec<LeaderboardEntry>,
    /// Caller's own position when it is outside `entries`
    #[serde(default)]
    pub current_profile: Option<LeaderboardEntry>,
}
