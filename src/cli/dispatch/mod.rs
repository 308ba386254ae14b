use crate::cli::actions::Action;
use crate::cli::globals::GlobalArgs;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let api_url = matches
        .get_one::<String>("api-url")
        .cloned()
        .context("missing required argument: --api-url")?;

    let state_file = matches
        .get_one::<PathBuf>("state-file")
        .cloned()
        .context("missing required argument: --state-file")?;

    let globals = GlobalArgs::new(api_url, state_file);

    // Closure to return subcommand matches
    let sub_m = |subcommand: &str| -> Result<&clap::ArgMatches> {
        matches
            .subcommand_matches(subcommand)
            .context("arguments not found")
    };

    let action = match matches.subcommand_name() {
        Some("register") => {
            let matches = sub_m("register")?;
            Action::Register {
                username: required(matches, "username")?,
                email: required(matches, "email")?,
                password: SecretString::from(required(matches, "password")?),
            }
        }
        Some("login") => {
            let matches = sub_m("login")?;
            Action::Login {
                email: required(matches, "email")?,
                password: SecretString::from(required(matches, "password")?),
            }
        }
        Some("logout") => Action::Logout,
        Some("send-code") => {
            let matches = sub_m("send-code")?;
            Action::SendCode {
                email: required(matches, "email")?,
            }
        }
        Some("verify-code") => {
            let matches = sub_m("verify-code")?;
            Action::VerifyCode {
                email: required(matches, "email")?,
                code: required(matches, "code")?,
            }
        }
        Some("reset-password") => {
            let matches = sub_m("reset-password")?;
            Action::ResetPassword {
                email: required(matches, "email")?,
                new_password: SecretString::from(required(matches, "new-password")?),
            }
        }
        Some("status") => Action::Status,
        Some("profile") => {
            let matches = sub_m("profile")?;
            match matches.subcommand_name() {
                Some("show") => Action::ProfileShow,
                Some("update") => {
                    let matches = matches
                        .subcommand_matches("update")
                        .context("arguments not found")?;
                    Action::ProfileUpdate {
                        bio: required(matches, "bio")?,
                        avatar: matches.get_one::<PathBuf>("avatar").cloned(),
                    }
                }
                _ => return Err(anyhow!("no profile command provided")),
            }
        }
        _ => return Err(anyhow!("no command provided")),
    };

    Ok((action, globals))
}

fn required(matches: &clap::ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}
