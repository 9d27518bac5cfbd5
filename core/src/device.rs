//! Device-scoped settings.
//!
//! Theme and language belong to the installation, not to the synced
//! preferences row, so they live in a small key-value document of their
//! own. Values stored here override the ones in the preferences row.

use crate::{
    error::{RaffleError, RaffleResult},
    types::{AppLanguage, AppTheme},
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

pub trait DeviceSettings: Send + Sync {
    fn theme(&self) -> AppTheme;
    fn language(&self) -> AppLanguage;
    fn set_theme(&self, theme: AppTheme) -> RaffleResult<()>;
    fn set_language(&self, language: AppLanguage) -> RaffleResult<()>;
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
struct DeviceValues {
    #[serde(default)]
    theme: AppTheme,
    #[serde(default)]
    language: AppLanguage,
}

/// Settings persisted as a JSON document on disk.
pub struct JsonDeviceSettings {
    path: PathBuf,
    values: Mutex<DeviceValues>,
}

impl JsonDeviceSettings {
    /// Open the document at `path`. A missing or unreadable file starts
    /// from defaults; it is created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("device: ignoring malformed {}: {e}", path.display());
                DeviceValues::default()
            }),
            Err(_) => DeviceValues::default(),
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut DeviceValues)) -> RaffleResult<()> {
        let mut values = self.values.lock().map_err(|_| RaffleError::LockPoisoned)?;
        let mut next = *values;
        apply(&mut next);
        std::fs::write(&self.path, serde_json::to_string_pretty(&next)?)?;
        *values = next;
        Ok(())
    }

    fn read(&self) -> DeviceValues {
        self.values.lock().map(|v| *v).unwrap_or_default()
    }
}

impl DeviceSettings for JsonDeviceSettings {
    fn theme(&self) -> AppTheme {
        self.read().theme
    }

    fn language(&self) -> AppLanguage {
        self.read().language
    }

    fn set_theme(&self, theme: AppTheme) -> RaffleResult<()> {
        self.update(|v| v.theme = theme)
    }

    fn set_language(&self, language: AppLanguage) -> RaffleResult<()> {
        self.update(|v| v.language = language)
    }
}

/// Settings kept only for the life of the process (tests, runner default).
#[derive(Default)]
pub struct InMemoryDeviceSettings {
    values: Mutex<DeviceValues>,
}

impl InMemoryDeviceSettings {
    pub fn new(theme: AppTheme, language: AppLanguage) -> Self {
        Self {
            values: Mutex::new(DeviceValues { theme, language }),
        }
    }
}

impl DeviceSettings for InMemoryDeviceSettings {
    fn theme(&self) -> AppTheme {
        self.values.lock().map(|v| v.theme).unwrap_or_default()
    }

    fn language(&self) -> AppLanguage {
        self.values.lock().map(|v| v.language).unwrap_or_default()
    }

    fn set_theme(&self, theme: AppTheme) -> RaffleResult<()> {
        self.values.lock().map_err(|_| RaffleError::LockPoisoned)?.theme = theme;
        Ok(())
    }

    fn set_language(&self, language: AppLanguage) -> RaffleResult<()> {
        self.values.lock().map_err(|_| RaffleError::LockPoisoned)?.language = language;
        Ok(())
    }
}
