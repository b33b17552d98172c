//! Session authentication flag.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use super::AuthState;

/// Authentication flag for one storefront session.
///
/// Signing in does not touch the cart; the next `fetch_cart` notices the
/// change and runs the guest merge.
#[derive(Debug, Default)]
pub struct SessionAuth {
    authenticated: AtomicBool,
}

impl SessionAuth {
    /// Creates a session in the given state.
    #[must_use]
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated: AtomicBool::new(authenticated),
        }
    }

    /// A session holding a bearer token is authenticated.
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        Self::new(token.is_some_and(|token| !token.trim().is_empty()))
    }

    /// Marks the session as signed in.
    pub fn sign_in(&self) {
        debug!("session signed in");

        self.authenticated.store(true, Ordering::SeqCst);
    }

    /// Marks the session as signed out.
    pub fn sign_out(&self) {
        debug!("session signed out");

        self.authenticated.store(false, Ordering::SeqCst);
    }
}

impl AuthState for SessionAuth {
    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }
}
