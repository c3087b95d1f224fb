//! Credential provider capability.
//!
//! The header builder reads the current bearer token through this trait
//! instead of reaching into global state, so clients can be constructed with
//! fake credentials in tests and real ones in the host application. The token
//! is read fresh on every call; nothing here is cached.

use std::sync::RwLock;

/// Read access to the host application's current bearer token.
///
/// The resource client only ever reads; how the token is persisted (memory,
/// cookie jar, keychain) is the host's concern.
pub trait CredentialProvider: Send + Sync {
    fn current_token(&self) -> Option<String>;
}

/// Credentials for unauthenticated access. `current_token` is always `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl CredentialProvider for Anonymous {
    fn current_token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, useful for tests and service accounts.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn current_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// A token slot the host swaps at runtime (login, refresh, logout).
///
/// Writers use [`set`](SharedToken::set) / [`clear`](SharedToken::clear); the
/// resource client only reads.
#[derive(Debug, Default)]
pub struct SharedToken {
    token: RwLock<Option<String>>,
}

impl SharedToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}

impl CredentialProvider for SharedToken {
    fn current_token(&self) -> Option<String> {
        self.token.read().map(|slot| slot.clone()).unwrap_or(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_token() {
        assert!(Anonymous.current_token().is_none());
    }

    #[test]
    fn static_token_always_returns_its_value() {
        let creds = StaticToken::new("abc123");
        assert_eq!(creds.current_token().as_deref(), Some("abc123"));
        assert_eq!(creds.current_token().as_deref(), Some("abc123"));
    }

    #[test]
    fn shared_token_tracks_set_and_clear() {
        let creds = SharedToken::new();
        assert!(creds.current_token().is_none());

        creds.set("first");
        assert_eq!(creds.current_token().as_deref(), Some("first"));

        creds.set("second");
        assert_eq!(creds.current_token().as_deref(), Some("second"));

        creds.clear();
        assert!(creds.current_token().is_none());
    }
}
