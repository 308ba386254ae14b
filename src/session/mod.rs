//! Session cache: one token string and one serialized user record under fixed
//! keys in the injected storage. The cached record is a read-mostly snapshot;
//! it is replaced wholesale after a successful profile update and may lag the
//! server until the next refresh.

use crate::api::types::{ApiEnvelope, UserRecord};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the serialized user record.
pub const USER_KEY: &str = "user";

/// Token and user-record cache shared by the API plumbing and the CLI.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Returns the cached bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) {
        self.storage.set(TOKEN_KEY, token);
    }

    pub fn clear_token(&self) {
        self.storage.remove(TOKEN_KEY);
    }

    /// Returns the cached user record. A cache entry that no longer parses is
    /// treated as absent.
    #[must_use]
    pub fn user(&self) -> Option<UserRecord> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!("ignoring unreadable cached user record: {err}");
                None
            }
        }
    }

    pub fn set_user(&self, user: &UserRecord) {
        match serde_json::to_string(user) {
            Ok(json) => self.storage.set(USER_KEY, &json),
            Err(err) => warn!("failed to encode user record: {err}"),
        }
    }

    pub fn clear_user(&self) {
        self.storage.remove(USER_KEY);
    }

    /// Stores whatever credentials a login envelope carries. The auth client
    /// itself never writes the cache; callers apply the envelope here.
    pub fn remember_login(&self, envelope: &ApiEnvelope) {
        if let Some(token) = &envelope.token {
            self.set_token(token);
        }
        if let Some(user) = &envelope.user {
            self.set_user(user);
        }
    }

    /// Replaces the cached user wholesale when an update envelope carries one;
    /// an envelope without a user leaves the cache untouched.
    pub fn absorb_update(&self, envelope: &ApiEnvelope) {
        match &envelope.user {
            Some(user) => self.set_user(user),
            None => debug!("update response carried no user; cache unchanged"),
        }
    }

    /// Drops both keys. Used by logout.
    pub fn clear(&self) {
        self.clear_token();
        self.clear_user();
    }
}
