// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily log endpoints: submissions, summaries, streaks and calendars.

use crate::error::Result;
use crate::models::{
    CalendarDay, DailyLog, DailySummary, LogEntry, MonthlySummary, PointLossBreakdown, StreakData,
    WeeklySummary,
};
use crate::services::api_client::{ApiClient, ApiRequest};
use crate::time_utils::{
    can_submit_previous_day, format_date, month_key, previous_day_deadline, week_start,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitLogBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    entries: &'a [LogEntry],
}

pub struct DailyLogsService<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn daily_logs(&self) -> DailyLogsService<'_> {
        DailyLogsService { client: self }
    }
}

impl DailyLogsService<'_> {
    pub async fn submit_today(&self, entries: &[LogEntry]) -> Result<DailyLog> {
        let body = SubmitLogBody {
            date: None,
            entries,
        };
        self.client
            .send_data(ApiRequest::post("/daily-logs").json(&body)?)
            .await
    }

    /// Submit a past day's log.
    ///
    /// `now` is the caller's local time. Past the 6 PM next-day cutoff the
    /// request is still sent; the backend has the final word.
    pub async fn submit_previous_day(
        &self,
        date: NaiveDate,
        entries: &[LogEntry],
        now: NaiveDateTime,
    ) -> Result<DailyLog> {
        if !can_submit_previous_day(date, now) {
            tracing::warn!(
                date = %date,
                deadline = %previous_day_deadline(date),
                "Previous-day log looks past its deadline, submitting anyway"
            );
        }

        let body = SubmitLogBody {
            date: Some(date),
            entries,
        };
        self.client
            .send_data(ApiRequest::post("/daily-logs/previous-day").json(&body)?)
            .await
    }

    pub async fn daily_summary(&self, date: NaiveDate) -> Result<DailySummary> {
        let request = ApiRequest::get("/daily-logs/summary/daily").query("date", format_date(date));
        Ok(self.client.send_optional(request).await?.unwrap_or_default())
    }

    /// Summary of the week containing `date`.
    pub async fn weekly_summary(&self, date: NaiveDate) -> Result<WeeklySummary> {
        let request = ApiRequest::get("/daily-logs/summary/weekly")
            .query("weekStart", format_date(week_start(date)));
        Ok(self.client.send_optional(request).await?.unwrap_or_default())
    }

    pub async fn monthly_summary(&self, year: i32, month: u32) -> Result<MonthlySummary> {
        let request =
            ApiRequest::get("/daily-logs/summary/monthly").query("month", month_key(year, month));
        Ok(self.client.send_optional(request).await?.unwrap_or_default())
    }

    /// Where points were lost in the week containing `date`.
    pub async fn point_loss(&self, date: NaiveDate) -> Result<PointLossBreakdown> {
        let request = ApiRequest::get("/daily-logs/point-loss")
            .query("weekStart", format_date(week_start(date)));
        Ok(self.client.send_optional(request).await?.unwrap_or_default())
    }

    pub async fn streak(&self) -> Result<StreakData> {
        Ok(self
            .client
            .send_optional(ApiRequest::get("/daily-logs/streak"))
            .await?
            .unwrap_or_default())
    }

    /// Streak for a home-screen widget: any failure degrades to zeros.
    pub async fn streak_or_default(&self) -> StreakData {
        match self.streak().await {
            Ok(streak) => streak,
            Err(e) => {
                tracing::debug!(error = %e, "Streak unavailable, showing defaults");
                StreakData::default()
            }
        }
    }

    pub async fn calendar(&self, year: i32, month: u32) -> Result<Vec<CalendarDay>> {
        let request = ApiRequest::get("/daily-logs/calendar").query("month", month_key(year, month));
        Ok(self.client.send_optional(request).await?.unwrap_or_default())
    }

    pub async fn activity_calendar(
        &self,
        activity_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<CalendarDay>> {
        let path = format!("/daily-logs/calendar/{}", urlencoding::encode(activity_id));
        let request = ApiRequest::get(path).query("month", month_key(year, month));
        Ok(self.client.send_optional(request).await?.unwrap_or_default())
    }
}
