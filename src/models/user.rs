// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account holder and household profile models.

use serde::{Deserialize, Serialize};

/// Maximum profiles per household. The backend enforces this; the client
/// only uses it to hide the "add family member" action.
pub const MAX_PROFILES: usize = 5;

/// Authenticated account holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    /// Phone number without country code
    pub phone_number: String,
    /// Dialing prefix, e.g. "+91"
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Subscription state as reported by the backend ("free", "premium", ...)
    #[serde(default)]
    pub subscription_status: Option<String>,
}

/// One trackable household member (the account holder or family).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// "self", "spouse", "child", ...
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Gamification level assigned by the backend
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub lifestyle: Option<Lifestyle>,
    #[serde(default)]
    pub stats: ProfileStats,
}

/// Lifestyle and preference answers collected during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifestyle {
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub sleep_hours: Option<f32>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub preferred_activities: Vec<String>,
}

/// Per-profile counters computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    #[serde(default)]
    pub total_points: i64,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_backend_json() {
        let json = r#"{
            "_id": "p1",
            "name": "Asha",
            "relationship": "self",
            "age": 34,
            "level": 2,
            "lifestyle": { "activityLevel": "moderate", "goals": ["sleep"] },
            "stats": { "totalPoints": 120, "currentStreak": 4 }
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, "p1");
        assert_eq!(profile.stats.total_points, 120);
        assert_eq!(profile.stats.longest_streak, 0);
        assert_eq!(
            profile.lifestyle.unwrap().activity_level.as_deref(),
            Some("moderate")
        );
    }

    #[test]
    fn test_user_serializes_mongo_id() {
        let user = User {
            id: "u1".to_string(),
            phone_number: "9876543210".to_string(),
            country_code: "+91".to_string(),
            name: "Asha".to_string(),
            email: None,
            age: None,
            gender: None,
            city: None,
            subscription_status: None,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["_id"], "u1");
        assert_eq!(value["phoneNumber"], "9876543210");
    }
}
