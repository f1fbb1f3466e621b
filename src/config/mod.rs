//! Configuration loading for droidsync.
//!
//! - Schema definitions in [`schema`]
//! - Home directory discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use droidsync::config::load_settings;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "templates_dir: /opt/droidsync/templates").unwrap();
//!
//! let settings = load_settings(Some(&path)).unwrap();
//! assert_eq!(
//!     settings.templates_dir(),
//!     Some(std::path::PathBuf::from("/opt/droidsync/templates"))
//! );
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    home_dir, load_config_file, load_settings, parse_config, Settings, CONFIG_FILE, HOME_ENV,
    STORE_FILE,
};
pub use schema::DroidsyncConfig;
