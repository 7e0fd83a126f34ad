// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication and account endpoints.
//!
//! Calls that establish or change the session (login, OTP verification,
//! magic link, profile edits, logout) also update the session store so
//! callers never have to mirror backend state by hand.

use crate::error::Result;
use crate::models::{Lifestyle, Profile, User};
use crate::services::api_client::{ApiClient, ApiRequest};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration form.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(length(min = 7, max = 15))]
    pub phone_number: String,
    #[validate(length(min = 2, max = 5))]
    pub country_code: String,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(length(min = 8))]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

/// Ask the backend to send a one-time code.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpRequest {
    #[validate(length(min = 7, max = 15))]
    pub phone_number: String,
    #[validate(length(min = 2, max = 5))]
    pub country_code: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[validate(length(min = 7, max = 15))]
    pub phone_number: String,
    #[validate(length(min = 2, max = 5))]
    pub country_code: String,
    #[validate(length(equal = 6))]
    pub otp: String,
}

/// Login by password or by one-time code; exactly one is sent.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 7, max = 15))]
    pub phone_number: String,
    #[validate(length(min = 2, max = 5))]
    pub country_code: String,
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[validate(length(equal = 6))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

impl LoginRequest {
    pub fn with_password(phone_number: &str, country_code: &str, password: &str) -> Self {
        Self {
            phone_number: phone_number.to_string(),
            country_code: country_code.to_string(),
            password: Some(password.to_string()),
            otp: None,
        }
    }

    pub fn with_otp(phone_number: &str, country_code: &str, otp: &str) -> Self {
        Self {
            phone_number: phone_number.to_string(),
            country_code: country_code.to_string(),
            password: None,
            otp: Some(otp.to_string()),
        }
    }
}

/// Account fields the user can edit.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 80))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(range(min = 1, max = 120))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<Lifestyle>,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddFamilyMemberRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(length(min = 1))]
    pub relationship: String,
    #[validate(range(min = 1, max = 120))]
    pub age: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<Lifestyle>,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Payload of every call that starts a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub access_token: String,
    pub user: User,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

/// Registration accepted; an OTP is on its way.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPending {
    #[serde(default)]
    pub phone_number: String,
    /// Seconds until the code expires
    #[serde(default)]
    pub otp_expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountData {
    user: User,
    #[serde(default)]
    profiles: Vec<Profile>,
}

#[derive(Serialize)]
struct MagicLinkRequest<'a> {
    token: &'a str,
}

/// Authentication endpoints.
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn auth(&self) -> AuthService<'_> {
        AuthService { client: self }
    }
}

impl AuthService<'_> {
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegistrationPending> {
        request.validate()?;
        self.client
            .send_data(ApiRequest::post("/auth/register").json(request)?)
            .await
    }

    pub async fn request_otp(&self, request: &RequestOtpRequest) -> Result<String> {
        request.validate()?;
        self.client
            .send_message(ApiRequest::post("/auth/request-otp").json(request)?)
            .await
    }

    /// Verify an OTP and start the session.
    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<AuthData> {
        request.validate()?;
        let data: AuthData = self
            .client
            .send_data(ApiRequest::post("/auth/verify-otp").json(request)?)
            .await?;
        self.start_session(&data);
        Ok(data)
    }

    /// Log in and start the session.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthData> {
        request.validate()?;
        let data: AuthData = self
            .client
            .send_data(ApiRequest::post("/auth/login").json(request)?)
            .await?;
        self.start_session(&data);
        Ok(data)
    }

    /// Exchange a magic-link token for a session.
    pub async fn verify_magic_link(&self, token: &str) -> Result<AuthData> {
        let data: AuthData = self
            .client
            .send_data(ApiRequest::post("/auth/magic-link/verify").json(&MagicLinkRequest { token })?)
            .await?;
        self.start_session(&data);
        Ok(data)
    }

    /// Refresh the access token explicitly and store it.
    pub async fn refresh(&self) -> Result<String> {
        let token = self.client.refresh_access_token().await?;
        self.client.session().set_access_token(Some(token.clone()));
        Ok(token)
    }

    /// Tell the backend, then clear the local session whatever it said.
    pub async fn logout(&self) {
        if let Err(e) = self.client.send_message(ApiRequest::post("/auth/logout")).await {
            tracing::warn!(error = %e, "Logout call failed, clearing session anyway");
        }
        self.client.session().logout();
    }

    /// Reload the account and household from the backend.
    pub async fn me(&self) -> Result<User> {
        let data: AccountData = self.client.send_data(ApiRequest::get("/auth/me")).await?;
        let session = self.client.session();
        session.set_user(Some(data.user.clone()));
        session.set_profiles(data.profiles);
        Ok(data.user)
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User> {
        request.validate()?;
        let user: User = self
            .client
            .send_data(ApiRequest::put("/auth/profile").json(request)?)
            .await?;
        self.client.session().set_user(Some(user.clone()));
        Ok(user)
    }

    pub async fn add_family_member(&self, request: &AddFamilyMemberRequest) -> Result<Profile> {
        request.validate()?;
        let profile: Profile = self
            .client
            .send_data(ApiRequest::post("/auth/family-members").json(request)?)
            .await?;
        tracing::info!(profile_id = %profile.id, "Family member added");
        self.client.session().upsert_profile(profile.clone());
        Ok(profile)
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<String> {
        request.validate()?;
        self.client
            .send_message(ApiRequest::post("/auth/change-password").json(request)?)
            .await
    }

    fn start_session(&self, data: &AuthData) {
        self.client.session().apply_login(
            data.access_token.clone(),
            data.user.clone(),
            data.profiles.clone(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_sends_one_method() {
        let request = LoginRequest::with_otp("9876543210", "+91", "123456");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["otp"], "123456");
        assert!(value.get("password").is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_short_otp() {
        let request = VerifyOtpRequest {
            phone_number: "9876543210".to_string(),
            country_code: "+91".to_string(),
            otp: "123".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_email() {
        let request = UpdateProfileRequest {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
