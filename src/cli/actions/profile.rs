//! Profile actions: print the cached record and push updates behind the
//! access gate.

use crate::api::ApiClient;
use crate::auth::{AccessGate, AuthClient, GateOutcome};
use crate::profile::{avatar_url, bio_chars_remaining, AvatarFile, ProfileClient, ProfileUpdate};
use crate::session::SessionStore;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

/// Print the cached user record, or the redirect hint when there is none.
///
/// # Errors
/// Infallible today; kept fallible to match the other actions.
pub fn show(session: &SessionStore, api_url: &str) -> Result<()> {
    let Some(user) = session.user() else {
        println!("No cached user, log in first (continue at /).");
        return Ok(());
    };

    println!("username: {}", user.username);
    println!("email:    {}", user.email);
    println!("bio:      {}", user.bio.as_deref().unwrap_or("No bio yet!"));
    println!("avatar:   {}", avatar_url(&user, api_url));

    Ok(())
}

/// Update the bio and optionally the avatar. Runs behind the access gate;
/// an admitted update refreshes the cached user record from the response.
///
/// # Errors
/// Returns an error if the avatar cannot be read, there is no cached user
/// record, or the request fails.
pub async fn update(
    api: &ApiClient,
    session: &SessionStore,
    bio: String,
    avatar: Option<PathBuf>,
) -> Result<()> {
    let mut gate = AccessGate::mount(AuthClient::new(api.clone()), session.clone());

    let client = match gate.admit(ProfileClient::new(api.clone())).await {
        GateOutcome::Admitted(client) => client,
        GateOutcome::Redirected(redirect) => {
            println!("Not authenticated, continue at {}", redirect.to);
            return Ok(());
        }
    };

    let user = session
        .user()
        .context("no cached user record, log in first")?;

    debug!("bio budget remaining: {}", bio_chars_remaining(&bio));

    let avatar = avatar.map(read_avatar).transpose()?;

    let envelope = client
        .update(ProfileUpdate {
            user_id: user.id,
            bio,
            avatar,
        })
        .await?;

    session.absorb_update(&envelope);
    if let Some(message) = &envelope.message {
        println!("{message}");
    }

    Ok(())
}

fn read_avatar(path: PathBuf) -> Result<AvatarFile> {
    let bytes = std::fs::read(&path)
        .with_context(|| format!("Failed to read avatar {}", path.display()))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("avatar")
        .to_string();

    Ok(AvatarFile::new(file_name, bytes))
}
