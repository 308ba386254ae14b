use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};
use std::path::PathBuf;

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn email_arg() -> Arg {
    Arg::new("email")
        .short('e')
        .long("email")
        .help("Account email address")
        .required(true)
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("konto")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the account API, example: https://api.example.tld")
                .env("KONTO_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("state-file")
                .long("state-file")
                .help("File holding the cached session token and user record")
                .default_value(".konto/state.json")
                .env("KONTO_STATE_FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("KONTO_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("register")
                .about("Create a new account")
                .arg(
                    Arg::new("username")
                        .short('u')
                        .long("username")
                        .help("Public account name")
                        .required(true),
                )
                .arg(email_arg())
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Account password")
                        .env("KONTO_PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and cache the session token")
                .arg(email_arg())
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Account password")
                        .env("KONTO_PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("Log out and drop the cached session"))
        .subcommand(
            Command::new("send-code")
                .about("Email a security code to the account address")
                .arg(email_arg()),
        )
        .subcommand(
            Command::new("verify-code")
                .about("Check a received security code")
                .arg(email_arg())
                .arg(
                    Arg::new("code")
                        .short('c')
                        .long("code")
                        .help("Security code from the email")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("reset-password")
                .about("Replace the account password after a verified code")
                .arg(email_arg())
                .arg(
                    Arg::new("new-password")
                        .long("new-password")
                        .help("Replacement password")
                        .required(true),
                ),
        )
        .subcommand(Command::new("status").about("Verify the current session and report the verdict"))
        .subcommand(
            Command::new("profile")
                .about("Show or update the profile")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Print the cached user record"))
                .subcommand(
                    Command::new("update")
                        .about("Update the bio and optionally the avatar")
                        .arg(
                            Arg::new("bio")
                                .short('b')
                                .long("bio")
                                .help("Bio text, 200 character budget")
                                .required(true),
                        )
                        .arg(
                            Arg::new("avatar")
                                .short('a')
                                .long("avatar")
                                .help("Path to an avatar image (JPEG or PNG)")
                                .value_parser(clap::value_parser!(PathBuf)),
                        ),
                ),
        )
}
