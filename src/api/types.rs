//! Wire types shared by every endpoint of the account API. The backend wraps
//! all responses in one envelope shape; absent fields deserialize as `None`
//! and an absent success flag deserializes as `false`, so callers never need
//! to special-case a missing flag.

use serde::{Deserialize, Serialize};

/// The current user's profile as the API returns and the session cache stores it.
/// The identifier is the server's `_id` and is treated as opaque.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// Uniform response body: `{ success?, message?, token?, user? }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub token: Option<String>,
    pub user: Option<UserRecord>,
}
