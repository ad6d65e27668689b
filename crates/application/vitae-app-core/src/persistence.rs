use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::domain::StoredSession;
use crate::ports::SessionCachePort;

const QUALIFIER: &str = "com";
const ORG: &str = "vitae";
const APP: &str = "client";

/// File-backed session echo under the platform config directory.
pub struct SessionFilePersistence {
    root: Option<PathBuf>,
}

impl Default for SessionFilePersistence {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionFilePersistence {
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Store under an explicit directory instead of the platform default.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root: Some(root) }
    }

    fn config_dir(&self) -> Result<PathBuf> {
        let dir = match &self.root {
            Some(root) => root.clone(),
            None => ProjectDirs::from(QUALIFIER, ORG, APP)
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
                .config_dir()
                .to_path_buf(),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    fn session_path(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("session.json"))
    }

    pub fn load_session(&self) -> Result<Option<StoredSession>> {
        let path = self.session_path()?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).context("Failed to read session echo")?;
        let session: StoredSession = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    pub fn save_session(&self, session: &StoredSession) -> Result<()> {
        let path = self.session_path()?;
        let json = serde_json::to_string_pretty(session)?;
        atomic_write(&path, json.as_bytes()).context("Failed to write session echo")?;
        Ok(())
    }

    pub fn clear_session(&self) -> Result<()> {
        let path = self.session_path()?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove session echo"),
        }
    }
}

impl SessionCachePort for SessionFilePersistence {
    fn load(&self) -> Result<Option<StoredSession>> {
        self.load_session()
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        self.save_session(session)
    }

    fn clear(&self) -> Result<()> {
        self.clear_session()
    }
}

fn atomic_write(path: &std::path::Path, contents: &[u8]) -> Result<()> {
    let tmp_path = {
        let mut name = path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    };

    let mut file = fs::File::create(&tmp_path)
        .with_context(|| format!("Failed to create temp file {}", tmp_path.display()))?;
    file.write_all(contents)
        .with_context(|| format!("Failed to write temp file {}", tmp_path.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync temp file {}", tmp_path.display()))?;
    drop(file);

    match fs::rename(&tmp_path, path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            fs::remove_file(path).ok();
            fs::rename(&tmp_path, path)
                .with_context(|| format!("Failed to replace {}", path.display()))
        }
        Err(e) => Err(e).with_context(|| {
            format!(
                "Failed to rename temp file {} to {}",
                tmp_path.display(),
                path.display()
            )
        }),
    }
}
