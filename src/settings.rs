use crate::profile::{Context, Profile};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use thiserror::Error;

const PROFILE_FILE: &str = "profile.toml";

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unable to determine configuration directory")]
    MissingConfigDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedProfile {
    active: Option<Context>,
}

/// On-disk home of the active context. The resolution cache is process
/// lifetime only and is never persisted.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> SettingsResult<Self> {
        ProjectDirs::from("com", "azctx", "azctx")
            .map(|dirs| Self {
                path: dirs.config_dir().join(PROFILE_FILE),
            })
            .ok_or(SettingsError::MissingConfigDir)
    }

    pub fn load(&self) -> SettingsResult<Profile> {
        let contents = fs::read_to_string(&self.path).unwrap_or_default();

        if contents.trim().is_empty() {
            return Ok(Profile::new());
        }

        let persisted: PersistedProfile = toml::from_str(&contents)?;
        Ok(match persisted.active {
            Some(ctx) => Profile::with_active(ctx),
            None => Profile::new(),
        })
    }

    pub fn save(&self, profile: &Profile) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let persisted = PersistedProfile {
            active: profile.active().cloned(),
        };
        let data = toml::to_string_pretty(&persisted)?;
        fs::write(&self.path, data)?;

        Ok(())
    }
}
