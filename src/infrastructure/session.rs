use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::SessionToken;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
    expires_at: i64,
}

/// Holds the session token between runs, like an http-only cookie.
pub struct SessionManager {
    session_file: PathBuf,
    max_age_days: u64,
}

impl SessionManager {
    pub fn new(config_dir: &Path, max_age_days: u64) -> Self {
        Self {
            session_file: config_dir.join("session.json"),
            max_age_days,
        }
    }

    pub fn save_session(&self, token: &SessionToken) -> Result<()> {
        let session = SessionFile {
            token: token.to_string(),
            expires_at: token.expires_at(self.max_age_days),
        };
        let json = serde_json::to_string(&session).context("Failed to serialize session")?;
        fs::write(&self.session_file, json).context("Failed to write session file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.session_file)
                .context("Failed to get session file metadata")?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.session_file, perms)
                .context("Failed to set session file permissions")?;
        }

        Ok(())
    }

    /// The raw stored token, if a session file exists and has not expired.
    /// Expired sessions are removed.
    pub fn load_token(&self, now: i64) -> Result<Option<String>> {
        if !self.session_file.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&self.session_file).context("Failed to read session file")?;
        let session: SessionFile = match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Discarding unreadable session file: {}", e);
                self.clear_session()?;
                return Ok(None);
            }
        };

        if now >= session.expires_at {
            self.clear_session()?;
            return Ok(None);
        }

        Ok(Some(session.token))
    }

    pub fn clear_session(&self) -> Result<()> {
        if self.session_file.exists() {
            fs::remove_file(&self.session_file).context("Failed to remove session file")?;
        }
        Ok(())
    }
}
