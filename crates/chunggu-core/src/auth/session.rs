use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use super::login::SessionUser;

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

pub struct Session {
    cache_dir: PathBuf,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            user: None,
        }
    }

    /// Load session from disk. Returns whether a user was restored.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .context("Failed to read session file")?;
            let user: SessionUser = serde_json::from_str(&contents)
                .context("Failed to parse session file")?;
            debug!(username = %user.username, "Restored session");
            self.user = Some(user);
            return Ok(true);
        }
        Ok(false)
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        if let Some(ref user) = self.user {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(user)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    /// Sign out and remove the session file
    pub fn clear(&mut self) -> Result<()> {
        self.user = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn update(&mut self, user: SessionUser) {
        self.user = Some(user);
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().and_then(|u| u.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(|u| u.is_admin()).unwrap_or(false)
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use chrono::Utc;
    use tempfile::TempDir;

    fn member_user() -> SessionUser {
        SessionUser {
            id: Some(12),
            username: "12".to_string(),
            name: "김철수".to_string(),
            role: Role::Member,
            generation: Some(30),
            gender: None,
            signed_in_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());
        assert!(!session.is_authenticated());

        session.update(member_user());
        session.save().unwrap();

        let mut restored = Session::new(dir.path().to_path_buf());
        assert!(restored.load().unwrap());
        assert_eq!(restored.user_id(), Some(12));
        assert!(restored.is_authenticated());
        assert!(!restored.is_admin());

        restored.clear().unwrap();
        assert!(!restored.is_authenticated());
        assert!(!Session::new(dir.path().to_path_buf()).load().unwrap());
    }

    #[test]
    fn test_corrupt_session_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "not json").unwrap();
        assert!(Session::new(dir.path().to_path_buf()).load().is_err());
    }
}
