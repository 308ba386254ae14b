//! Profile feature: the multipart update client plus the display helpers
//! for avatars and the bio budget.

pub mod client;
pub mod types;

pub use client::ProfileClient;
pub use types::{
    avatar_url, bio_chars_remaining, guess_mime, AvatarFile, ProfileUpdate, BIO_MAX_CHARS,
};
