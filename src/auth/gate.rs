//! Tri-state access gate: one session check per mount deciding whether
//! protected work runs or the caller is sent back to the public root.

use crate::auth::AuthClient;
use crate::session::SessionStore;
use tracing::{debug, warn};

/// Where unauthenticated callers are sent.
pub const PUBLIC_ROOT: &str = "/";

/// Verification verdict. `Pending` means the check has not settled yet and is
/// a distinct state, not a false.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Pending,
    Authenticated,
    Unauthenticated,
}

/// Navigation order handed back instead of the protected value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    /// Replace the current history entry so back-navigation cannot return to
    /// the guarded route.
    pub replace: bool,
}

impl Redirect {
    #[must_use]
    pub fn to_public_root() -> Self {
        Self {
            to: PUBLIC_ROOT.to_string(),
            replace: true,
        }
    }
}

/// What a mount yields once the check settles.
#[derive(Debug, PartialEq, Eq)]
pub enum GateOutcome<V> {
    Admitted(V),
    Redirected(Redirect),
}

/// One mount of the gate. Construction starts at `Pending`; the first
/// `resolve` issues exactly one verification request and settles the state
/// for the lifetime of the mount. Independent mounts do not coordinate.
pub struct AccessGate {
    auth: AuthClient,
    session: SessionStore,
    status: AuthStatus,
}

impl AccessGate {
    #[must_use]
    pub fn mount(auth: AuthClient, session: SessionStore) -> Self {
        Self {
            auth,
            session,
            status: AuthStatus::Pending,
        }
    }

    /// Current verdict without touching the network.
    #[must_use]
    pub const fn status(&self) -> AuthStatus {
        self.status
    }

    /// Settles the mount. The first call asks the server to verify the
    /// session; later calls return the settled verdict without a new request.
    pub async fn resolve(&mut self) -> AuthStatus {
        if self.status != AuthStatus::Pending {
            return self.status;
        }

        let verdict = match self.auth.verify_session().await {
            Ok(envelope) if envelope.success => AuthStatus::Authenticated,
            // Single fallback: a denial and an unreachable or failing server
            // read the same, and the cached token is dropped either way.
            outcome => {
                if let Err(err) = outcome {
                    warn!("session verification failed: {err}");
                }
                AuthStatus::Unauthenticated
            }
        };

        if verdict == AuthStatus::Unauthenticated {
            self.session.clear_token();
        }

        self.status = verdict;
        debug!("access gate settled: {verdict:?}");
        verdict
    }

    /// Resolves the mount and either admits `protected` or yields the
    /// redirect to the public root.
    pub async fn admit<V>(&mut self, protected: V) -> GateOutcome<V> {
        match self.resolve().await {
            AuthStatus::Authenticated => GateOutcome::Admitted(protected),
            _ => GateOutcome::Redirected(Redirect::to_public_root()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_targets_public_root_and_replaces_history() {
        let redirect = Redirect::to_public_root();
        assert_eq!(redirect.to, "/");
        assert!(redirect.replace);
    }
}
