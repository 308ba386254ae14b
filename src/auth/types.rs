//! Request payloads for the account endpoints.

use serde::Serialize;

/// New-account payload for `POST /register`.
#[derive(Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Credentials for `POST /login`.
#[derive(Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Address to send a security code to, for `POST /send-code`.
#[derive(Serialize)]
pub struct SendCodeRequest {
    pub email: String,
}

/// Security code check for `POST /verify-code`.
#[derive(Serialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

/// Replacement password for `POST /reset-password`, sent after the security
/// code has been verified.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}
