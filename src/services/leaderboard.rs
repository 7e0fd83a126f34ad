// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard endpoints. Ranking is computed by the backend.

use crate::error::Result;
use crate::models::Leaderboard;
use crate::services::api_client::{ApiClient, ApiRequest};

pub struct LeaderboardService<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn leaderboard(&self) -> LeaderboardService<'_> {
        LeaderboardService { client: self }
    }
}

impl LeaderboardService<'_> {
    pub async fn weekly(&self, activity_id: Option<&str>) -> Result<Leaderboard> {
        self.fetch("/leaderboard/weekly", activity_id).await
    }

    pub async fn all_time(&self, activity_id: Option<&str>) -> Result<Leaderboard> {
        self.fetch("/leaderboard/all-time", activity_id).await
    }

    async fn fetch(&self, path: &str, activity_id: Option<&str>) -> Result<Leaderboard> {
        let request = ApiRequest::get(path).query_opt("activityId", activity_id);
        Ok(self.client.send_optional(request).await?.unwrap_or_default())
    }
}
