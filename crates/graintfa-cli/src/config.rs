//! Locates, reads and validates the CLI's TOML configuration.
//!
//! An explicit `--config` path always wins. Otherwise the first file that
//! exists among [`search_paths`] is used, and when none does the built-in
//! defaults apply. A loaded file is validated before it reaches the
//! renderer, so a bad scale or highlight color is reported against the
//! file that contains it.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use graintfa::{GraintfaError, config::AppConfig};

/// Name of the configuration file in every searched directory.
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {0} does not exist")]
    MissingFile(PathBuf),

    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration in {path}: {reason}")]
    Validation { path: PathBuf, reason: String },
}

impl From<ConfigError> for GraintfaError {
    fn from(err: ConfigError) -> Self {
        GraintfaError::Config(err.to_string())
    }
}

/// Directories searched when no explicit path is given, most specific
/// first: `./graintfa/` and then the platform config directory.
fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![Path::new("graintfa").join(CONFIG_FILE)];
    match ProjectDirs::from("com", "graintfa", "graintfa") {
        Some(dirs) => paths.push(dirs.config_dir().join(CONFIG_FILE)),
        None => debug!("No platform configuration directory on this system"),
    }
    paths
}

/// Loads the configuration for a run.
///
/// # Errors
///
/// Returns [`GraintfaError::Config`] when the explicit path does not exist,
/// when the file is not valid TOML for [`AppConfig`], or when a value is out
/// of range. Read failures surface as [`GraintfaError::Io`].
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, GraintfaError> {
    let path = match explicit_path {
        Some(path) => path.as_ref().to_path_buf(),
        None => {
            let Some(found) = search_paths().into_iter().find(|path| path.is_file()) else {
                debug!("No configuration file found, using defaults");
                return Ok(AppConfig::default());
            };
            found
        }
    };

    info!(path:? = path; "Loading configuration");
    let config = read_config(&path)?;
    validate(&path, &config)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<AppConfig, GraintfaError> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        }
        .into()
    })
}

fn validate(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Validation {
        path: path.to_path_buf(),
        reason,
    };

    if config.export().scale() == 0 {
        return Err(invalid("export.scale must be at least 1".to_string()));
    }
    config
        .render()
        .highlight_color()
        .map_err(|err| invalid(format!("render.highlight_color: {err}")))?;
    Ok(())
}
