use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PlanError, Result};
use crate::models::Profile;
use crate::state::history::{push_bounded, PlanRecord};

/// Screen a client should open with, given the session it starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    ProfileSetup,
    Dashboard,
}

/// Bearer token, cached profile and recent plans for one user.
///
/// Passed explicitly to whatever needs it; populated from a [`SessionStore`]
/// at startup and cleared on logout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    history: Vec<PlanRecord>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    /// Recent plans, newest first.
    pub fn history(&self) -> &[PlanRecord] {
        &self.history
    }

    pub fn record_plan(&mut self, record: PlanRecord) {
        push_bounded(&mut self.history, record);
    }

    pub fn require_login(&self) -> Result<()> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(PlanError::NotLoggedIn)
        }
    }

    pub fn require_profile(&self) -> Result<&Profile> {
        self.profile.as_ref().ok_or(PlanError::NoProfile)
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.profile = None;
        self.history.clear();
    }

    pub fn initial_screen(&self) -> Screen {
        if !self.is_logged_in() {
            Screen::Login
        } else if self.profile.is_none() {
            Screen::ProfileSetup
        } else {
            Screen::Dashboard
        }
    }
}

/// File-backed persistence for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted session; a missing file is an empty session.
    pub fn load(&self) -> Result<Session> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let session: Session = serde_json::from_str(&content)?;
                debug!(path = %self.path.display(), logged_in = session.is_logged_in(), "loaded session");
                Ok(session)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no session file, starting empty");
                Ok(Session::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "saved session");
        Ok(())
    }

    /// Clear the session and remove its file.
    pub fn logout(&self, session: &mut Session) -> Result<()> {
        session.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        info!(path = %self.path.display(), "logged out");
        Ok(())
    }
}
