use std::fmt;

/// Errors surfaced by the API plumbing and the feature clients built on it.
///
/// `Http` carries the sanitized server-provided message so callers can show it
/// directly; every other variant wraps a transport or encoding failure.
#[derive(Clone, Debug)]
pub enum ClientError {
    Config(String),
    Network(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Config(message) => write!(formatter, "Config error: {message}"),
            ClientError::Network(message) => write!(formatter, "Network error: {message}"),
            ClientError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            ClientError::Parse(message) => write!(formatter, "Response error: {message}"),
            ClientError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for ClientError {}
