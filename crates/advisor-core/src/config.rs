//! Advisor configuration
//!
//! Read from a TOML file; every section is optional. The global file lives at
//! `<config_dir>/advisor/config.toml`, or under `ADVISOR_CONFIG_DIR` when set.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::CommonWordSet;
use crate::error::{AdvisorError, Result};
use crate::similarity::Comparator;

pub use types::{
    AdvisorConfig, AutocorrelationConfig, FetchConfig, DEFAULT_BASE_URL, DEFAULT_COMMON_WORDS,
};

const CONFIG_DIR: &str = "advisor";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "ADVISOR_CONFIG_DIR";

impl AdvisorConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| AdvisorError::file_operation("read", path, e))?;
        let config: AdvisorConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if it is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Load the global configuration file
    pub fn load_global() -> Result<Self> {
        Self::load_or_default(&Self::global_path()?)
    }

    /// Location of the global configuration file
    pub fn global_path() -> Result<PathBuf> {
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| AdvisorError::invalid_value("config directory", "(unknown)"))?
                .join(CONFIG_DIR)
        };
        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Save configuration to a file, creating its directory
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| AdvisorError::file_operation("create directory", parent, e))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AdvisorError::io_operation("serialize", "config", e))?;
        fs::write(path, content).map_err(|e| AdvisorError::file_operation("write", path, e))?;
        Ok(())
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        let kernels = &self.autocorrelation.kernels;
        if kernels.is_empty() {
            return Err(AdvisorError::invalid_value("autocorrelation.kernels", "[]"));
        }
        if kernels.contains(&0) {
            return Err(AdvisorError::invalid_value(
                "autocorrelation.kernels",
                format!("{:?}", kernels),
            ));
        }
        self.scoring.validate()
    }

    /// Path of the common-word list
    pub fn common_words_path(&self) -> PathBuf {
        self.common_words
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMMON_WORDS))
    }

    /// Load the configured common-word list
    pub fn load_common_words(&self) -> Result<CommonWordSet> {
        CommonWordSet::load(&self.common_words_path())
    }

    /// Build a comparator using the configured weights and kernels
    pub fn comparator<'a>(&self, common: &'a CommonWordSet) -> Comparator<'a> {
        Comparator::new(common)
            .with_weights(self.scoring.clone())
            .with_kernels(self.autocorrelation.kernels.clone())
    }
}
