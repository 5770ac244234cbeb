//! Appearance preferences persisted outside the todo store.
//!
//! # Responsibility
//! - Load the appearance setting once at startup.
//! - Save it on every change.
//!
//! # Invariants
//! - A missing or unparseable preferences file yields defaults
//!   (`dark_mode=false`); the next save overwrites it.
//! - Saves replace the file atomically (temp file + rename).
//! - Nothing here touches the todo database.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Process-wide UI preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppPreferences {
    pub dark_mode: bool,
}

#[derive(Debug)]
pub enum PreferencesError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl Display for PreferencesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "preferences io failed: {err}"),
            Self::Parse(err) => write!(f, "preferences json failed: {err}"),
        }
    }
}

impl Error for PreferencesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for PreferencesError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for PreferencesError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// File-backed preferences with an in-memory current value.
#[derive(Debug)]
pub struct PreferencesStore {
    path: PathBuf,
    current: AppPreferences,
}

impl PreferencesStore {
    /// Loads preferences from `path`, falling back to defaults when the file
    /// is absent or malformed.
    ///
    /// # Errors
    /// - The file exists but cannot be read.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let current = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(prefs) => prefs,
                Err(err) => {
                    warn!(
                        "event=prefs_load module=preferences status=error error_code=prefs_parse_failed source=default error={err}"
                    );
                    AppPreferences::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=prefs_load module=preferences status=ok source=default");
                AppPreferences::default()
            }
            Err(err) => {
                warn!("event=prefs_load module=preferences status=error error={err}");
                return Err(err.into());
            }
        };
        Ok(Self { path, current })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> AppPreferences {
        self.current
    }

    pub fn dark_mode(&self) -> bool {
        self.current.dark_mode
    }

    /// Sets dark mode and persists it before updating the in-memory value.
    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<(), PreferencesError> {
        let next = AppPreferences { dark_mode: enabled };
        write_atomically(&self.path, &next)?;
        self.current = next;
        info!("event=prefs_save module=preferences status=ok dark_mode={enabled}");
        Ok(())
    }
}

fn write_atomically(path: &Path, prefs: &AppPreferences) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let bytes = serde_json::to_vec_pretty(prefs)?;
    {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
