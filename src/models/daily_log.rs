// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily progress logs and the summaries derived from them server-side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Amount logged for one activity on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub activity_id: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A submitted day of progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    #[serde(rename = "_id")]
    pub id: String,
    pub profile_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub entries: Vec<LogEntry>,
    #[serde(default)]
    pub points_earned: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub points_earned: i64,
    #[serde(default)]
    pub activities_completed: u32,
    #[serde(default)]
    pub activities_planned: u32,
    #[serde(default)]
    pub logged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    #[serde(default)]
    pub week_start: Option<NaiveDate>,
    #[serde(default)]
    pub points_earned: i64,
    #[serde(default)]
    pub points_possible: i64,
    #[serde(default)]
    pub days: Vec<DailySummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// "YYYY-MM"
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub points_earned: i64,
    #[serde(default)]
    pub days_logged: u32,
    #[serde(default)]
    pub weeks: Vec<WeeklySummary>,
}

/// Points lost in a week, per activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointLossBreakdown {
    #[serde(default)]
    pub total_lost: i64,
    #[serde(default)]
    pub items: Vec<PointLossItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointLossItem {
    pub activity_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points_lost: i64,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Consecutive-day logging counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_logged_date: Option<NaiveDate>,
}

/// One cell of the calendar views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// "completed", "partial", "missed", "upcoming"
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub points_earned: i64,
    #[serde(default)]
    pub value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_defaults_when_fields_missing() {
        let streak: StreakData = serde_json::from_str("{}").unwrap();
        assert_eq!(streak, StreakData::default());
    }

    #[test]
    fn test_log_entry_skips_empty_note() {
        let entry = LogEntry {
            activity_id: "a1".to_string(),
            value: 2.0,
            note: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("note").is_none());
        assert_eq!(value["activityId"], "a1");
    }
}
