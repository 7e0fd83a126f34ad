// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Referral endpoints.

use crate::error::Result;
use crate::models::{ReferralCode, ReferralStats};
use crate::services::api_client::{ApiClient, ApiRequest};

pub struct ReferralService<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn referral(&self) -> ReferralService<'_> {
        ReferralService { client: self }
    }
}

impl ReferralService<'_> {
    pub async fn code(&self) -> Result<ReferralCode> {
        self.client.send_data(ApiRequest::get("/referral/code")).await
    }

    pub async fn stats(&self) -> Result<ReferralStats> {
        Ok(self
            .client
            .send_optional(ApiRequest::get("/referral/stats"))
            .await?
            .unwrap_or_default())
    }
}
