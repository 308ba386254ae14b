use anyhow::{anyhow, Result};
use konto::api::ApiClient;
use konto::auth::types::{LoginRequest, RegisterRequest, ResetPasswordRequest};
use konto::auth::AuthClient;
use konto::session::SessionStore;
use konto::storage::MemoryStorage;
use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn session() -> SessionStore {
    SessionStore::new(Arc::new(MemoryStorage::new()))
}

fn client_for(uri: &str, session: &SessionStore) -> Result<AuthClient> {
    let api = ApiClient::new(uri, session.clone())?;
    Ok(AuthClient::new(api))
}

#[tokio::test]
async fn login_envelope_feeds_the_session_cache() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({
            "email": "ana@example.com",
            "password": "s3cret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Welcome back",
            "token": "tok-123",
            "user": {
                "_id": "64f0c2",
                "username": "ana",
                "email": "ana@example.com"
            }
        })))
        .mount(&server)
        .await;

    let session = session();
    let client = client_for(&server.uri(), &session)?;

    let envelope = client
        .login(&LoginRequest {
            email: "ana@example.com".to_string(),
            password: "s3cret".to_string(),
        })
        .await?;

    session.remember_login(&envelope);

    assert_eq!(session.token().as_deref(), Some("tok-123"));
    let user = session.user().ok_or_else(|| anyhow!("no cached user"))?;
    assert_eq!(user.username, "ana");
    Ok(())
}

#[tokio::test]
async fn register_posts_expected_payload() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "username": "ana",
            "email": "ana@example.com",
            "password": "s3cret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Account created"
        })))
        .mount(&server)
        .await;

    let session = session();
    let client = client_for(&server.uri(), &session)?;

    let envelope = client
        .register(&RegisterRequest {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "s3cret".to_string(),
        })
        .await?;

    assert!(envelope.success);
    assert_eq!(envelope.message.as_deref(), Some("Account created"));
    Ok(())
}

#[tokio::test]
async fn reset_password_sends_camel_case_field() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/reset-password"))
        .and(body_json(json!({
            "email": "ana@example.com",
            "newPassword": "n3w-s3cret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Password updated"
        })))
        .mount(&server)
        .await;

    let session = session();
    let client = client_for(&server.uri(), &session)?;

    let envelope = client
        .reset_password(&ResetPasswordRequest {
            email: "ana@example.com".to_string(),
            new_password: "n3w-s3cret".to_string(),
        })
        .await?;

    assert!(envelope.success);
    Ok(())
}

#[tokio::test]
async fn failed_login_surfaces_server_message() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let session = session();
    let client = client_for(&server.uri(), &session)?;

    let result = client
        .login(&LoginRequest {
            email: "ana@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await;

    let err = result.err().ok_or_else(|| anyhow!("expected error"))?;
    assert!(err.to_string().contains("Invalid credentials"));

    // A failed login never touches the cache
    assert!(session.token().is_none());
    assert!(session.user().is_none());
    Ok(())
}

#[tokio::test]
async fn logout_posts_to_the_endpoint() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Logged out"
        })))
        .mount(&server)
        .await;

    let session = session();
    session.set_token("tok-123");

    let client = client_for(&server.uri(), &session)?;
    let envelope = client.logout().await?;

    assert_eq!(envelope.message.as_deref(), Some("Logged out"));

    // Dropping the local session is the caller's move, not the client's
    assert_eq!(session.token().as_deref(), Some("tok-123"));
    session.clear();
    assert!(session.token().is_none());
    Ok(())
}
