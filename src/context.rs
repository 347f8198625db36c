use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::Config;
use crate::domain::{AccessGate, AutosaveController, Clock, GateDecision, SystemClock};
use crate::infrastructure::{FileStore, SessionManager};

pub type Journal = AutosaveController<FileStore, SystemClock>;

/// Everything a command needs: configuration, the data store and the session.
pub struct AppContext {
    pub config: Config,
    pub config_dir: PathBuf,
    pub store: Rc<FileStore>,
}

impl AppContext {
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config = Config::load(config_dir)?;
        let store = Rc::new(FileStore::new(&config.data_dir, config.storage_quota()));

        Ok(Self {
            config,
            config_dir: config_dir.to_path_buf(),
            store,
        })
    }

    pub fn session(&self) -> SessionManager {
        SessionManager::new(&self.config_dir, self.config.session_max_age_days)
    }

    pub fn journal(&self) -> Journal {
        AutosaveController::load(
            self.store.clone(),
            SystemClock,
            self.config.autosave_delay_ms,
        )
    }

    /// Fails with a hint to unlock when `route` is gated and there is no live session.
    pub fn require_access(&self, route: &str) -> Result<()> {
        let now = SystemClock.now_ms();
        let token = self.session().load_token(now)?;
        let gate = AccessGate::new(self.config.session_max_age_days);

        match gate.check(route, token.as_deref(), now) {
            GateDecision::Allow => Ok(()),
            GateDecision::Redirect(to) => {
                log::debug!("Access to '{}' redirected to '{}'", route, to);
                bail!("🔒 Locked. Run 'dr unlock' with your license key first.")
            }
        }
    }
}
