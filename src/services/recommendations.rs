// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity recommendations for the active profile.

use crate::error::Result;
use crate::models::Recommendation;
use crate::services::api_client::{ApiClient, ApiRequest};

pub struct RecommendationsService<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn recommendations(&self) -> RecommendationsService<'_> {
        RecommendationsService { client: self }
    }
}

impl RecommendationsService<'_> {
    /// Suggestions, optionally capped at `limit` items.
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<Recommendation>> {
        let request = ApiRequest::get("/recommendations").query_opt("limit", limit);
        Ok(self.client.send_optional(request).await?.unwrap_or_default())
    }
}
