use anyhow::{anyhow, Result};
use std::path::PathBuf;

use vitae_app_core::domain::StoredSession;
use vitae_app_core::persistence::SessionFilePersistence;
use vitae_client::ApiClient;
use vitae_core::UserProfile;

/// Owns the persisted session echo so every command sees the same
/// signed-in user between invocations.
pub struct SessionManager {
    persistence: SessionFilePersistence,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            persistence: SessionFilePersistence::new(),
        }
    }

    /// Keep the echo under an explicit directory (tests).
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            persistence: SessionFilePersistence::with_root(root),
        }
    }

    pub fn current(&self) -> Result<StoredSession> {
        self.persistence
            .load_session()?
            .ok_or_else(|| anyhow!("Not signed in. Run `vitae-cli login` first."))
    }

    pub fn store(&self, token: Option<String>, user: UserProfile) -> Result<()> {
        self.persistence.save_session(&StoredSession { token, user })
    }

    pub fn clear(&self) -> Result<()> {
        self.persistence.clear_session()
    }

    /// Install the stored credential on the client, if any.
    pub fn attach(&self, api: &ApiClient) -> Result<()> {
        if let Some(session) = self.persistence.load_session()? {
            api.set_token(session.token);
        }
        Ok(())
    }
}
