use crate::api::ApiClient;
use crate::cli::actions::{auth, profile, Action};
use crate::cli::globals::GlobalArgs;
use crate::session::SessionStore;
use crate::storage::FileStorage;
use anyhow::Result;
use std::sync::Arc;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    // Single dispatch point: wire the session cache over the state file and
    // the shared HTTP client, then hand off.
    let storage = FileStorage::open(globals.state_file.clone());
    let session = SessionStore::new(Arc::new(storage));
    let api = ApiClient::new(&globals.api_url, session.clone())?;

    match action {
        Action::Register {
            username,
            email,
            password,
        } => auth::register(&api, username, email, password).await,
        Action::Login { email, password } => auth::login(&api, &session, email, password).await,
        Action::Logout => auth::logout(&api, &session).await,
        Action::SendCode { email } => auth::send_code(&api, email).await,
        Action::VerifyCode { email, code } => auth::verify_code(&api, email, code).await,
        Action::ResetPassword {
            email,
            new_password,
        } => auth::reset_password(&api, email, new_password).await,
        Action::Status => auth::status(&api, &session).await,
        Action::ProfileShow => profile::show(&session, &globals.api_url),
        Action::ProfileUpdate { bio, avatar } => {
            profile::update(&api, &session, bio, avatar).await
        }
    }
}
