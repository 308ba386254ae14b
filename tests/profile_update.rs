use anyhow::{anyhow, Result};
use konto::api::types::UserRecord;
use konto::api::ApiClient;
use konto::profile::{AvatarFile, ProfileClient, ProfileUpdate};
use konto::session::SessionStore;
use konto::storage::MemoryStorage;
use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn session() -> SessionStore {
    SessionStore::new(Arc::new(MemoryStorage::new()))
}

fn cached_user() -> UserRecord {
    UserRecord {
        id: "64f0c2".to_string(),
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        bio: Some("old bio".to_string()),
        avatar: None,
    }
}

fn client_for(uri: &str, session: &SessionStore) -> Result<ProfileClient> {
    let api = ApiClient::new(uri, session.clone())?;
    Ok(ProfileClient::new(api))
}

#[tokio::test]
async fn update_sends_multipart_fields_with_bearer() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Updated",
            "user": {
                "_id": "64f0c2",
                "username": "ana",
                "email": "ana@example.com",
                "bio": "new bio",
                "avatar": "/uploads/ana.png"
            }
        })))
        .mount(&server)
        .await;

    let session = session();
    session.set_token("tok-123");
    session.set_user(&cached_user());

    let client = client_for(&server.uri(), &session)?;
    let envelope = client
        .update(ProfileUpdate {
            user_id: "64f0c2".to_string(),
            bio: "new bio".to_string(),
            avatar: Some(AvatarFile::new("me.png", b"PNGDATA".to_vec())),
        })
        .await?;

    assert_eq!(envelope.message.as_deref(), Some("Updated"));

    let requests = server
        .received_requests()
        .await
        .ok_or_else(|| anyhow!("requests not recorded"))?;
    let request = requests.first().ok_or_else(|| anyhow!("no request seen"))?;

    let content_type = request
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| anyhow!("missing content-type"))?;
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"_id\""));
    assert!(body.contains("64f0c2"));
    assert!(body.contains("name=\"bio\""));
    assert!(body.contains("new bio"));
    assert!(body.contains("name=\"avatar\""));
    assert!(body.contains("filename=\"me.png\""));
    assert!(body.contains("image/png"));
    assert!(body.contains("PNGDATA"));
    Ok(())
}

#[tokio::test]
async fn update_response_with_user_replaces_cached_record() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Updated",
            "user": {
                "_id": "64f0c2",
                "username": "ana",
                "email": "ana@example.com",
                "bio": "new bio",
                "avatar": null
            }
        })))
        .mount(&server)
        .await;

    let session = session();
    session.set_user(&cached_user());

    let client = client_for(&server.uri(), &session)?;
    let envelope = client
        .update(ProfileUpdate {
            user_id: "64f0c2".to_string(),
            bio: "new bio".to_string(),
            avatar: None,
        })
        .await?;

    session.absorb_update(&envelope);

    let cached = session.user().ok_or_else(|| anyhow!("no cached user"))?;
    assert_eq!(cached.bio.as_deref(), Some("new bio"));
    Ok(())
}

#[tokio::test]
async fn update_response_without_user_leaves_cache_untouched() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Updated"
        })))
        .mount(&server)
        .await;

    let session = session();
    session.set_user(&cached_user());

    let client = client_for(&server.uri(), &session)?;
    let envelope = client
        .update(ProfileUpdate {
            user_id: "64f0c2".to_string(),
            bio: "new bio".to_string(),
            avatar: None,
        })
        .await?;

    session.absorb_update(&envelope);

    let cached = session.user().ok_or_else(|| anyhow!("no cached user"))?;
    assert_eq!(cached, cached_user());

    // No avatar part without an avatar payload
    let requests = server
        .received_requests()
        .await
        .ok_or_else(|| anyhow!("requests not recorded"))?;
    let request = requests.first().ok_or_else(|| anyhow!("no request seen"))?;
    let body = String::from_utf8_lossy(&request.body);
    assert!(!body.contains("name=\"avatar\""));
    Ok(())
}

#[tokio::test]
async fn two_hundred_char_bio_is_sent_unmodified() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Updated"
        })))
        .mount(&server)
        .await;

    let session = session();
    let client = client_for(&server.uri(), &session)?;

    let bio = "x".repeat(200);
    client
        .update(ProfileUpdate {
            user_id: "64f0c2".to_string(),
            bio: bio.clone(),
            avatar: None,
        })
        .await?;

    let requests = server
        .received_requests()
        .await
        .ok_or_else(|| anyhow!("requests not recorded"))?;
    let request = requests.first().ok_or_else(|| anyhow!("no request seen"))?;
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains(&bio));
    Ok(())
}

#[tokio::test]
async fn update_failure_surfaces_server_message() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Avatar too large"
        })))
        .mount(&server)
        .await;

    let session = session();
    let client = client_for(&server.uri(), &session)?;

    let result = client
        .update(ProfileUpdate {
            user_id: "64f0c2".to_string(),
            bio: "new bio".to_string(),
            avatar: None,
        })
        .await;

    let err = result.err().ok_or_else(|| anyhow!("expected error"))?;
    assert!(err.to_string().contains("Avatar too large"));
    Ok(())
}
