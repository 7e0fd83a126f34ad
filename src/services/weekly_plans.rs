// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly plan endpoints. Plan generation and point allocation happen
//! server-side; these calls only carry the user's choices.

use crate::error::Result;
use crate::models::{PlanAnalytics, PlanOptions, WeeklyPlan};
use crate::services::api_client::{ApiClient, ApiRequest};
use crate::time_utils::format_date;
use chrono::NaiveDate;
use serde::Serialize;
use validator::Validate;

/// One activity target chosen by the user.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlanActivityInput {
    #[validate(length(min = 1))]
    pub activity_id: String,
    #[validate(range(min = 0.0))]
    pub target: f64,
    #[validate(range(min = 1, max = 7))]
    pub days_per_week: u8,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start: Option<NaiveDate>,
    #[validate(length(min = 1), nested)]
    pub activities: Vec<PlanActivityInput>,
}

/// First plan for a new profile, built from onboarding answers.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FirstTimeSetupRequest {
    #[validate(length(min = 1), nested)]
    pub activities: Vec<PlanActivityInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

pub struct WeeklyPlansService<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn weekly_plans(&self) -> WeeklyPlansService<'_> {
        WeeklyPlansService { client: self }
    }
}

impl WeeklyPlansService<'_> {
    pub async fn options(&self) -> Result<PlanOptions> {
        Ok(self
            .client
            .send_optional(ApiRequest::get("/weekly-plans/options"))
            .await?
            .unwrap_or_default())
    }

    pub async fn create(&self, request: &CreatePlanRequest) -> Result<WeeklyPlan> {
        request.validate()?;
        self.client
            .send_data(ApiRequest::post("/weekly-plans").json(request)?)
            .await
    }

    /// Plan covering `date` (today when `None`), if one exists.
    pub async fn current(&self, date: Option<NaiveDate>) -> Result<Option<WeeklyPlan>> {
        let request =
            ApiRequest::get("/weekly-plans/current").query_opt("date", date.map(format_date));
        self.client.send_optional(request).await
    }

    pub async fn upcoming(&self) -> Result<Option<WeeklyPlan>> {
        self.client
            .send_optional(ApiRequest::get("/weekly-plans/upcoming"))
            .await
    }

    pub async fn first_time_setup(&self, request: &FirstTimeSetupRequest) -> Result<WeeklyPlan> {
        request.validate()?;
        self.client
            .send_data(ApiRequest::post("/weekly-plans/first-time-setup").json(request)?)
            .await
    }

    /// Copy last week's targets into next week's plan.
    pub async fn repeat_last_week(&self) -> Result<WeeklyPlan> {
        self.client
            .send_data(ApiRequest::post("/weekly-plans/repeat-last-week"))
            .await
    }

    pub async fn analytics(&self, plan_id: &str) -> Result<PlanAnalytics> {
        let path = format!("/weekly-plans/{}/analytics", urlencoding::encode(plan_id));
        self.client.send_data(ApiRequest::get(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_plan_requires_activities() {
        let request = CreatePlanRequest {
            week_start: None,
            activities: vec![],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_nested_days_per_week_is_validated() {
        let request = CreatePlanRequest {
            week_start: None,
            activities: vec![PlanActivityInput {
                activity_id: "walk".to_string(),
                target: 30.0,
                days_per_week: 9,
            }],
        };
        assert!(request.validate().is_err());
    }
}
