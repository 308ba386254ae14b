//! Authentication against the remote account service: the endpoint client
//! and the access gate that decides whether protected work may run.

pub mod client;
pub mod gate;
pub mod types;

pub use client::AuthClient;
pub use gate::{AccessGate, AuthStatus, GateOutcome, Redirect, PUBLIC_ROOT};
