//! Configuration file discovery and loading
//!
//! Values are layered in priority order:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Config file (searched in standard locations)
//! 4. Built-in defaults (lowest priority)
//!
//! This module only handles the file layer; CLI and environment values are
//! merged on top by the binary.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::APP_NAME;

/// Where a configuration was loaded from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Path given on the command line or through the environment
    Explicit(PathBuf),
    /// Found in the working directory
    CurrentDir(PathBuf),
    /// Found under `$XDG_CONFIG_HOME/hawaii-climate/`
    XdgConfig(PathBuf),
    /// Found under `/etc/hawaii-climate/`
    System(PathBuf),
    /// Nothing found
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// Find a configuration file in the standard locations.
///
/// Search order:
/// 1. The path held by `env_var` (e.g. `CLIMATE_API_CONFIG`), if it exists
/// 2. `./{filename}`
/// 3. `$XDG_CONFIG_HOME/hawaii-climate/{filename}` (or `~/.config/...`)
/// 4. `/etc/hawaii-climate/{filename}`
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    if let Some(path) = env::var_os(env_var).map(PathBuf::from) {
        if path.exists() {
            return ConfigSource::Explicit(path);
        }
        log::warn!(
            "{} points at {}, which does not exist",
            env_var,
            path.display()
        );
    }

    let local = PathBuf::from(filename);
    if local.exists() {
        return ConfigSource::CurrentDir(local);
    }

    let xdg = xdg_dir("XDG_CONFIG_HOME", ".config").join(filename);
    if xdg.exists() {
        return ConfigSource::XdgConfig(xdg);
    }

    let system = PathBuf::from("/etc").join(APP_NAME).join(filename);
    if system.exists() {
        return ConfigSource::System(system);
    }

    ConfigSource::Defaults
}

/// Data directory for the application, where a shared copy of the dataset
/// can be installed.
pub fn get_xdg_data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

fn xdg_dir(xdg_var: &str, home_relative: &str) -> PathBuf {
    if let Some(base) = env::var_os(xdg_var) {
        PathBuf::from(base).join(APP_NAME)
    } else if let Some(home) = env::var_os("HOME") {
        PathBuf::from(home).join(home_relative).join(APP_NAME)
    } else {
        PathBuf::from(home_relative).join(APP_NAME)
    }
}

/// Load and parse a TOML configuration file.
///
/// Returns `T::default()` when the source is [`ConfigSource::Defaults`].
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    match source.path() {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse config file {}", path.display()))
        }
        None => Ok(T::default()),
    }
}
