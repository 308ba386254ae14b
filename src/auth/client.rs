//! Thin client over the remote account endpoints. Each operation maps to one
//! request, hands back the raw response envelope, and leaves the local cache
//! alone; interpreting the outcome is the caller's job.

use crate::api::types::ApiEnvelope;
use crate::api::{ApiClient, ClientError};
use crate::auth::types::{
    LoginRequest, RegisterRequest, ResetPasswordRequest, SendCodeRequest, VerifyCodeRequest,
};
use tracing::{info_span, Instrument};

#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Creates a new account.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<ApiEnvelope, ClientError> {
        let span = info_span!("auth.register", http.method = "POST", path = "/register");
        self.api.post_json("/register", payload).instrument(span).await
    }

    /// Exchanges credentials for a session; the envelope may carry a token
    /// and the user record.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn login(&self, payload: &LoginRequest) -> Result<ApiEnvelope, ClientError> {
        let span = info_span!("auth.login", http.method = "POST", path = "/login");
        self.api.post_json("/login", payload).instrument(span).await
    }

    /// Asks the server to email a security code.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn send_code(&self, payload: &SendCodeRequest) -> Result<ApiEnvelope, ClientError> {
        let span = info_span!("auth.send_code", http.method = "POST", path = "/send-code");
        self.api.post_json("/send-code", payload).instrument(span).await
    }

    /// Checks a security code the user received.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn verify_code(
        &self,
        payload: &VerifyCodeRequest,
    ) -> Result<ApiEnvelope, ClientError> {
        let span = info_span!("auth.verify_code", http.method = "POST", path = "/verify-code");
        self.api.post_json("/verify-code", payload).instrument(span).await
    }

    /// Replaces the account password after a verified code.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn reset_password(
        &self,
        payload: &ResetPasswordRequest,
    ) -> Result<ApiEnvelope, ClientError> {
        let span = info_span!(
            "auth.reset_password",
            http.method = "POST",
            path = "/reset-password"
        );
        self.api
            .post_json("/reset-password", payload)
            .instrument(span)
            .await
    }

    /// Asks the server whether the current session is valid; the envelope's
    /// success flag carries the verdict.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn verify_session(&self) -> Result<ApiEnvelope, ClientError> {
        let span = info_span!("auth.verify_session", http.method = "GET", path = "/verify-user");
        self.api.get_json("/verify-user").instrument(span).await
    }

    /// Invalidates the session on the server side.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn logout(&self) -> Result<ApiEnvelope, ClientError> {
        let span = info_span!("auth.logout", http.method = "POST", path = "/logout");
        self.api.post_empty("/logout").instrument(span).await
    }
}
