//! Account actions: drive the auth client and keep the local session cache
//! in step with what the server said.

use crate::api::types::ApiEnvelope;
use crate::api::ApiClient;
use crate::auth::types::{
    LoginRequest, RegisterRequest, ResetPasswordRequest, SendCodeRequest, VerifyCodeRequest,
};
use crate::auth::{AccessGate, AuthClient, AuthStatus};
use crate::session::SessionStore;
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};

/// Print the server's status message when it sent one.
fn report(envelope: &ApiEnvelope) {
    if let Some(message) = &envelope.message {
        println!("{message}");
    }
}

/// Create a new account.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn register(
    api: &ApiClient,
    username: String,
    email: String,
    password: SecretString,
) -> Result<()> {
    let client = AuthClient::new(api.clone());
    let envelope = client
        .register(&RegisterRequest {
            username,
            email,
            password: password.expose_secret().to_string(),
        })
        .await?;

    report(&envelope);
    Ok(())
}

/// Log in and remember the returned token and user record.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn login(
    api: &ApiClient,
    session: &SessionStore,
    email: String,
    password: SecretString,
) -> Result<()> {
    let client = AuthClient::new(api.clone());
    let envelope = client
        .login(&LoginRequest {
            email,
            password: password.expose_secret().to_string(),
        })
        .await?;

    session.remember_login(&envelope);
    report(&envelope);
    Ok(())
}

/// Log out. The local session is dropped even when the server call fails.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn logout(api: &ApiClient, session: &SessionStore) -> Result<()> {
    let client = AuthClient::new(api.clone());
    let result = client.logout().await;
    session.clear();

    let envelope = result?;
    report(&envelope);
    Ok(())
}

/// Ask the server to email a security code.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn send_code(api: &ApiClient, email: String) -> Result<()> {
    let client = AuthClient::new(api.clone());
    let envelope = client.send_code(&SendCodeRequest { email }).await?;

    report(&envelope);
    Ok(())
}

/// Check a security code the user received.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn verify_code(api: &ApiClient, email: String, code: String) -> Result<()> {
    let client = AuthClient::new(api.clone());
    let envelope = client.verify_code(&VerifyCodeRequest { email, code }).await?;

    report(&envelope);
    Ok(())
}

/// Replace the account password.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn reset_password(
    api: &ApiClient,
    email: String,
    new_password: SecretString,
) -> Result<()> {
    let client = AuthClient::new(api.clone());
    let envelope = client
        .reset_password(&ResetPasswordRequest {
            email,
            new_password: new_password.expose_secret().to_string(),
        })
        .await?;

    report(&envelope);
    Ok(())
}

/// Run the access gate once and report the verdict.
///
/// # Errors
/// Returns an error if the report cannot be produced; an unreachable server
/// reads as unauthenticated, not as a failure.
pub async fn status(api: &ApiClient, session: &SessionStore) -> Result<()> {
    let mut gate = AccessGate::mount(AuthClient::new(api.clone()), session.clone());

    match gate.resolve().await {
        AuthStatus::Authenticated => println!("authenticated"),
        _ => println!("unauthenticated, continue at /"),
    }

    Ok(())
}
