//! Profile update inputs and the data-level display helpers the profile
//! screen needs: avatar resolution and the bio character budget.

use crate::api::types::UserRecord;
use std::ffi::OsStr;
use std::path::Path;
use url::form_urlencoded;

/// Bio length budget shown to the user. A bio at exactly this length is
/// still accepted unchanged.
pub const BIO_MAX_CHARS: usize = 200;

/// Placeholder avatar service used when the record carries no avatar.
const AVATAR_FALLBACK_API: &str = "https://ui-avatars.com/api/";

/// Avatar payload: raw bytes plus the metadata the multipart part needs.
#[derive(Clone, Debug)]
pub struct AvatarFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl AvatarFile {
    /// Builds an avatar payload, guessing the MIME type from the file name.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = guess_mime(&file_name).to_string();
        Self {
            file_name,
            bytes,
            mime,
        }
    }
}

/// Everything one profile update sends.
#[derive(Clone, Debug)]
pub struct ProfileUpdate {
    pub user_id: String,
    pub bio: String,
    pub avatar: Option<AvatarFile>,
}

/// MIME type from a file extension; the upload form accepts JPEG and PNG.
#[must_use]
pub fn guess_mime(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Characters left in the bio budget, for the countdown display.
#[must_use]
pub fn bio_chars_remaining(bio: &str) -> usize {
    BIO_MAX_CHARS.saturating_sub(bio.chars().count())
}

/// Resolves the record's avatar against the API base URL, falling back to a
/// deterministic placeholder derived from the username. The name is
/// percent-encoded so spaces and such cannot break the URL.
#[must_use]
pub fn avatar_url(user: &UserRecord, base_url: &str) -> String {
    if let Some(path) = user.avatar.as_deref().filter(|path| !path.is_empty()) {
        return format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
    }

    let name = if user.username.is_empty() {
        "User"
    } else {
        user.username.as_str()
    };
    let encoded: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();

    format!("{AVATAR_FALLBACK_API}?name={encoded}&background=0D8ABC&color=fff&size=128")
}
