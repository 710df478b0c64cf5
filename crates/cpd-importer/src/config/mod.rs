//! Importer settings, read from `cpd-import.toml`.
//!
//! Settings are split into one file per category. [`ImporterSettings`]
//! aggregates all categories and handles TOML deserialization. Every
//! category has a public settings struct and a private `*Patch` struct so
//! that a file only needs to mention the keys it overrides.

pub(crate) mod import;
pub(crate) mod logging;
pub(crate) mod project;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use import::ImportSettingsPatch;
pub use import::{DEFAULT_REPORT_FILE_NAME, ImportSettings, MAX_MAX_MESSAGE_SIZE_KB, MIN_MAX_MESSAGE_SIZE_KB};
use logging::LoggingSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use project::ProjectSettingsPatch;
pub use project::{MAX_MAX_FILE_SIZE_KB, MIN_MAX_FILE_SIZE_KB, ProjectSettings};
use serde::Deserialize;
use thiserror::Error;

pub const SETTINGS_FILE_NAME: &str = "cpd-import.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImporterSettings {
    pub import: ImportSettings,
    pub project: ProjectSettings,
    pub logging: LoggingSettings,
}

impl ImporterSettings {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let patch: ImporterSettingsPatch = toml::from_str(content)?;
        let mut settings = Self::default();
        settings.apply_patch(patch);
        settings.normalize();
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_patch(
        &mut self,
        patch: ImporterSettingsPatch,
    ) {
        if let Some(p) = patch.import {
            self.import.apply_patch(p);
        }
        if let Some(p) = patch.project {
            self.project.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.import.normalize();
        self.project.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
struct ImporterSettingsPatch {
    import: Option<ImportSettingsPatch>,
    project: Option<ProjectSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, toml::Value>,
}

/// Walks parent directories from `start` looking for `cpd-import.toml`.
pub fn find_settings_file(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(SETTINGS_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
