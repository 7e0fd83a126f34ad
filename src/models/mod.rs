// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the wellness API.
//!
//! `User` and `Profile` are the only records the client keeps around (in the
//! session store). Everything else is owned by the backend and only
//! deserialized for display.

pub mod activity;
pub mod daily_log;
pub mod envelope;
pub mod leaderboard;
pub mod plan;
pub mod referral;
pub mod user;

pub use activity::{Activity, ActivityTierGroup};
pub use daily_log::{
    CalendarDay, DailyLog, DailySummary, LogEntry, MonthlySummary, PointLossBreakdown, StreakData,
    WeeklySummary,
};
pub use envelope::ApiResponse;
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use plan::{PlanAnalytics, PlanOptions, WeeklyPlan, WeeklyPlanActivity};
pub use referral::{Recommendation, ReferralCode, ReferralStats};
pub use user::{Lifestyle, Profile, ProfileStats, User, MAX_PROFILES};
