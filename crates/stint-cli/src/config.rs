//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use stint_core::format::{DEFAULT_DATE_FORMAT, is_valid_date_format};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// strftime pattern for the Date column, rendered in local time.
    pub date_format: String,

    /// Re-print the time line on every tick while the timer runs.
    pub live_display: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            live_display: false,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: defaults, `<config dir>/stint/config.toml`, the
    /// given file, then `STINT_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("STINT_"));

        let config: Self = figment.extract()?;
        config.validate()
    }

    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    fn validate(self) -> Result<Self, figment::Error> {
        if !is_valid_date_format(&self.date_format) {
            return Err(figment::Error::from(format!(
                "invalid date_format: {:?}",
                self.date_format
            )));
        }
        Ok(self)
    }
}

/// Returns the platform-specific config directory for stint.
///
/// On Linux: `~/.config/stint`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("stint"))
}
