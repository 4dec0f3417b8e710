//! App Vault configuration.

use crate::error::{AppError, AppResult};
use appvault_activity::StreakPolicy;
use appvault_crypto::DEFAULT_PASSWORD_LENGTH;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration, loadable from TOML.
///
/// ```toml
/// data_dir = "/home/me/.local/share/app-vault"
/// utc_offset_minutes = 120
/// streak_policy = "reset-on-gap"
/// password_length = 20
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppVaultConfig {
    /// Directory of the file-backed store. Required by [`AppVault::open`](crate::AppVault::open).
    pub data_dir: Option<PathBuf>,

    /// Offset from UTC used to decide which calendar day an instant is on.
    pub utc_offset_minutes: i32,

    pub streak_policy: StreakPolicy,

    /// Length of generated passwords.
    pub password_length: usize,
}

impl Default for AppVaultConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            utc_offset_minutes: 0,
            streak_policy: StreakPolicy::Preserve,
            password_length: DEFAULT_PASSWORD_LENGTH,
        }
    }
}

impl AppVaultConfig {
    pub fn from_toml_str(text: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.offset()?;
        if self.password_length == 0 {
            return Err(AppError::Config("password_length must be at least 1".into()));
        }
        Ok(())
    }

    /// The configured offset as a chrono offset.
    pub fn offset(&self) -> AppResult<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                AppError::Config(format!(
                    "utc_offset_minutes out of range: {}",
                    self.utc_offset_minutes
                ))
            })
    }
}
