//! Session
//!
//! Holder of the bearer token used for ledger and catalog calls. Logging in
//! and refreshing tokens happen elsewhere; the client only reads the token and
//! drops it when the server answers 401.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use mockall::automock;
use tracing::warn;

/// Source of the current bearer token.
#[automock]
pub trait Session: Send + Sync {
    /// Current token, if signed in.
    fn bearer_token(&self) -> Option<String>;

    /// Forget the token after the server rejected it.
    fn invalidate(&self);
}

/// Session backed by a token fixed at startup.
#[derive(Debug)]
pub struct StaticSession {
    token: Option<String>,
    invalidated: AtomicBool,
}

impl StaticSession {
    /// Create a session. A blank token means signed out.
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|token| !token.trim().is_empty()),
            invalidated: AtomicBool::new(false),
        }
    }

    /// Shared handle, as the HTTP client expects.
    pub fn shared(token: Option<String>) -> Arc<dyn Session> {
        Arc::new(Self::new(token))
    }

    /// Whether the server has rejected the token.
    pub fn is_invalidated(&self) -> bool {
        self.invalidated.load(Ordering::Acquire)
    }
}

impl Session for StaticSession {
    fn bearer_token(&self) -> Option<String> {
        if self.is_invalidated() {
            return None;
        }

        self.token.clone()
    }

    fn invalidate(&self) {
        if !self.invalidated.swap(true, Ordering::AcqRel) && self.token.is_some() {
            warn!("session token rejected by server; sign in again");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_signed_out() {
        assert_eq!(StaticSession::new(Some("  ".to_string())).bearer_token(), None);
        assert_eq!(StaticSession::new(None).bearer_token(), None);
    }

    #[test]
    fn invalidate_drops_token() {
        let session = StaticSession::new(Some("abc".to_string()));

        assert_eq!(session.bearer_token().as_deref(), Some("abc"));

        session.invalidate();

        assert!(session.is_invalidated());
        assert_eq!(session.bearer_token(), None);
    }
}
