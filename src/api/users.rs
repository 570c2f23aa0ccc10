//! User Endpoints
//!
//! Login, signup, password reset and profile calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiClient, HttpMethod};
use crate::error::AppResult;
use crate::models::{ProfileUpdate, UserId, UserSnapshot};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupArgs {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct EmailArgs<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct VerifyOtpArgs<'a> {
    email: &'a str,
    otp: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordArgs<'a> {
    email: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordArgs<'a> {
    email: &'a str,
    current_password: &'a str,
    new_password: &'a str,
}

// ========================
// Responses
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<UserSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    #[serde(default)]
    pub is_verified: bool,
}

// ========================
// Commands
// ========================

pub async fn login_user(api: &ApiClient, email: &str, password: &str) -> AppResult<LoginResponse> {
    let args = LoginArgs { email, password };
    api.call_as("/api/users/login", HttpMethod::Post, Some(&args), false).await
}

/// The body is an acknowledgement only; its shape is not relied upon
pub async fn signup_user(api: &ApiClient, args: &SignupArgs) -> AppResult<Value> {
    api.call_as("/api/users/signup", HttpMethod::Post, Some(args), false).await
}

pub async fn send_reset_mail(api: &ApiClient, email: &str) -> AppResult<SuccessResponse> {
    api.call_as("/api/users/sendmail", HttpMethod::Post, Some(&EmailArgs { email }), false)
        .await
}

pub async fn verify_otp(api: &ApiClient, email: &str, otp: &str) -> AppResult<VerifyOtpResponse> {
    let args = VerifyOtpArgs { email, otp };
    api.call_as("/api/users/verifyotp", HttpMethod::Post, Some(&args), false).await
}

pub async fn reset_password(
    api: &ApiClient,
    email: &str,
    new_password: &str,
) -> AppResult<SuccessResponse> {
    let args = ResetPasswordArgs { email, new_password };
    api.call_as("/api/users/forgotpassword", HttpMethod::Post, Some(&args), false)
        .await
}

pub async fn change_password(
    api: &ApiClient,
    email: &str,
    current_password: &str,
    new_password: &str,
) -> AppResult<Value> {
    let args = ChangePasswordArgs { email, current_password, new_password };
    api.call_as("/api/users/changepassword", HttpMethod::Post, Some(&args), true)
        .await
}

pub async fn get_profile(api: &ApiClient, id: UserId) -> AppResult<UserSnapshot> {
    api.call_as::<Value, _>(&format!("/api/users/{}", id), HttpMethod::Get, None, true)
        .await
}

pub async fn update_profile(
    api: &ApiClient,
    id: UserId,
    update: &ProfileUpdate,
) -> AppResult<UserSnapshot> {
    api.call_as(&format!("/api/users/{}", id), HttpMethod::Put, Some(update), true)
        .await
}
