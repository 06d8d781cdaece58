//! Config file reading utilities

use crate::error::{CliError, CliResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "shugen.yaml";

/// Output path used when neither the command line nor the config names one.
pub const DEFAULT_OUTPUT: &str = "./shugen.go";

/// Full config file structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path of the generated file.
    pub output: Option<String>,
}

/// Read the config file at `config_path`, if it exists.
pub fn read_config(config_path: &Path) -> CliResult<Option<ConfigFile>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let config_content = fs::read_to_string(config_path)
        .map_err(|e| CliError::Config(format!("Failed to read {}: {e}", config_path.display())))?;

    // An empty file deserializes to unit, not to a struct with all fields absent.
    if config_content.trim().is_empty() {
        return Ok(Some(ConfigFile::default()));
    }

    let config: ConfigFile = serde_yaml::from_str(&config_content)
        .map_err(|e| CliError::Config(format!("Failed to parse {}: {e}", config_path.display())))?;

    Ok(Some(config))
}

/// Determine output path with priority: CLI flag > Config > Default
pub fn determine_output(cli_output: Option<&str>) -> CliResult<PathBuf> {
    if let Some(output) = cli_output {
        return Ok(PathBuf::from(output));
    }

    let configured = read_config(Path::new(CONFIG_FILE))?.and_then(|config| config.output);
    Ok(PathBuf::from(
        configured.as_deref().unwrap_or(DEFAULT_OUTPUT),
    ))
}
