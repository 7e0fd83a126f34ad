// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly plan models. Targets and point allocations come from the backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One activity target inside a weekly plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlanActivity {
    pub activity_id: String,
    #[serde(default)]
    pub name: String,
    /// Target amount per day, in the activity's unit
    pub target: f64,
    /// Days per week the target should be met
    #[serde(default)]
    pub days_per_week: u8,
    /// Points the backend allotted to this activity for the week
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub tier: u32,
}

/// Set of activity targets for one calendar week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    #[serde(rename = "_id")]
    pub id: String,
    pub profile_id: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    #[serde(default)]
    pub activities: Vec<WeeklyPlanActivity>,
    #[serde(default)]
    pub total_points: i64,
    /// "active", "upcoming", "completed"
    #[serde(default)]
    pub status: String,
}

/// Choices offered when configuring a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOptions {
    #[serde(default)]
    pub days_per_week: Vec<u8>,
    #[serde(default)]
    pub max_activities: Option<u32>,
    #[serde(default)]
    pub tiers: Vec<TierOption>,
}

/// Permitted target range for a tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierOption {
    pub tier: u32,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub min_target: f64,
    #[serde(default)]
    pub max_target: f64,
}

/// Progress numbers for a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAnalytics {
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub points_earned: i64,
    #[serde(default)]
    pub points_possible: i64,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub activities: Vec<ActivityProgress>,
}

/// Per-activity progress within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityProgress {
    pub activity_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub days_completed: u8,
    #[serde(default)]
    pub days_target: u8,
    #[serde(default)]
    pub points_earned: i64,
}
