// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity catalogue endpoints.

use crate::error::Result;
use crate::models::{Activity, ActivityTierGroup};
use crate::services::api_client::{ApiClient, ApiRequest};

/// Optional filters for the activity list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityFilter {
    pub tier: Option<u32>,
    pub is_default: Option<bool>,
}

pub struct ActivitiesService<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn activities(&self) -> ActivitiesService<'_> {
        ActivitiesService { client: self }
    }
}

impl ActivitiesService<'_> {
    pub async fn list(&self, filter: ActivityFilter) -> Result<Vec<Activity>> {
        let request = ApiRequest::get("/activities")
            .query_opt("tier", filter.tier)
            .query_opt("isDefault", filter.is_default);
        Ok(self.client.send_optional(request).await?.unwrap_or_default())
    }

    pub async fn by_tier(&self) -> Result<Vec<ActivityTierGroup>> {
        Ok(self
            .client
            .send_optional(ApiRequest::get("/activities/by-tier"))
            .await?
            .unwrap_or_default())
    }
}
