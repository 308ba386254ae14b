pub mod auth;
pub mod profile;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

use crate::cli::globals::GlobalArgs;
use secrecy::SecretString;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Action {
    Register {
        username: String,
        email: String,
        password: SecretString,
    },
    Login {
        email: String,
        password: SecretString,
    },
    Logout,
    SendCode {
        email: String,
    },
    VerifyCode {
        email: String,
        code: String,
    },
    ResetPassword {
        email: String,
        new_password: SecretString,
    },
    Status,
    ProfileShow,
    ProfileUpdate {
        bio: String,
        avatar: Option<PathBuf>,
    },
}

impl Action {
    // Convenience wrapper so call sites can do `action.execute(&globals).await`.
    // When adding new actions, extend the match in `run::execute`.
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
