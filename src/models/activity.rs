// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trackable activity catalogue.

use serde::{Deserialize, Serialize};

/// Activity a profile can put into its weekly plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Unit the target is measured in ("minutes", "glasses", "steps", ...)
    #[serde(default)]
    pub unit: String,
    /// Tier bracket this activity belongs to
    #[serde(default)]
    pub tier: u32,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub min_target: Option<f64>,
    #[serde(default)]
    pub max_target: Option<f64>,
}

/// Activities grouped under one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTierGroup {
    pub tier: u32,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}
