//! Climate API Core Library
//!
//! Shared pieces used by the API server:
//! - Configuration discovery and loading (XDG-compliant)
//! - Filesystem helpers for locating the dataset

mod config;
pub mod fs;

pub use config::{find_config_file, get_xdg_data_dir, load_config, ConfigSource};
pub use fs::{first_existing, is_file};

/// Application name used for XDG paths
pub const APP_NAME: &str = "hawaii-climate";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// File name of the bundled measurement dataset
pub const DATASET_FILE: &str = "hawaii.sqlite";
