//! # Konto
//!
//! `konto` is a client for a remote account service: it logs in, verifies
//! sessions, and updates profiles over HTTP, keeping a small local cache
//! (one session token, one user record) in step with what the server said.
//!
//! ## Layered design
//!
//! - [`storage`]: injectable key-value capability with in-memory and
//!   JSON-file implementations.
//! - [`session`]: the fixed-key token + user cache layered on storage.
//!   The token is written on login, attached as a bearer header on every
//!   request, and dropped on logout or a failed session check.
//! - [`api`]: one shared `reqwest` client with a cookie jar, bearer
//!   attachment, envelope decoding and error mapping.
//! - [`auth`]: the endpoint client plus the tri-state access gate
//!   (pending / authenticated / unauthenticated) guarding protected work.
//! - [`profile`]: the multipart profile update and display helpers.
//! - [`cli`]: the `konto` command tree driving all of the above.
//!
//! The gate deliberately reads an unreachable server the same as a denied
//! session: either way the caller is sent to the public root and the cached
//! token is dropped.

pub mod api;
pub mod auth;
pub mod cli;
pub mod profile;
pub mod session;
pub mod storage;
