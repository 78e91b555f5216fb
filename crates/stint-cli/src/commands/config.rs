//! Config command for printing the effective configuration.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::Config;
use crate::config::dirs_config_path;

pub fn run<W: Write>(writer: &mut W, config: &Config, explicit: Option<&Path>) -> Result<()> {
    writeln!(writer, "stint configuration")?;
    match dirs_config_path() {
        Some(dir) => writeln!(writer, "Default file: {}", dir.join("config.toml").display())?,
        None => writeln!(writer, "Default file: (no config directory)")?,
    }
    if let Some(path) = explicit {
        writeln!(writer, "Override file: {}", path.display())?;
    }
    writeln!(writer, "date_format: {}", config.date_format)?;
    writeln!(writer, "live_display: {}", config.live_display)?;
    Ok(())
}
