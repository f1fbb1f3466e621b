//! Configuration file discovery and loading.
//!
//! droidsync keeps its state in a home directory: `$DROIDSYNC_HOME` when
//! set, otherwise `~/.droidsync`. The optional `config.yml` there may
//! override the template root and the workspace document location.

use crate::config::schema::DroidsyncConfig;
use crate::error::{DroidsyncError, Result};
use crate::templates::TemplateCatalog;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "DROIDSYNC_HOME";

/// Config file name inside the home directory.
pub const CONFIG_FILE: &str = "config.yml";

/// Default workspace document name inside the home directory.
pub const STORE_FILE: &str = "projects.json";

/// The droidsync home directory.
pub fn home_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(".droidsync")
}

/// Parse YAML content into [`DroidsyncConfig`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<DroidsyncConfig> {
    if content.trim().is_empty() {
        return Ok(DroidsyncConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| DroidsyncError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `InvalidInput` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DroidsyncConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DroidsyncError::invalid_input(format!("config file not found: {}", path.display()))
        } else {
            DroidsyncError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Configuration with every location resolved.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Home directory in effect.
    pub home: PathBuf,

    /// Config file that was read, if any.
    pub source: Option<PathBuf>,

    /// Parsed configuration.
    pub config: DroidsyncConfig,
}

impl Settings {
    /// Settings for `home` with no config file.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            source: None,
            config: DroidsyncConfig::default(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        let base = self
            .source
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.home);
        base.join(path)
    }

    /// Where the workspace document lives.
    pub fn store_path(&self) -> PathBuf {
        match &self.config.store_path {
            Some(path) => self.resolve(path),
            None => self.home.join(STORE_FILE),
        }
    }

    /// Configured template root, if any.
    pub fn templates_dir(&self) -> Option<PathBuf> {
        self.config.templates_dir.as_deref().map(|p| self.resolve(p))
    }

    /// Template root candidates in search order.
    pub fn template_candidates(&self) -> Vec<PathBuf> {
        TemplateCatalog::default_candidates(self.templates_dir().as_deref(), &self.home)
    }
}

/// Load settings.
///
/// An explicit `config_path` must exist. Without one, `<home>/config.yml`
/// is read when present and defaults apply otherwise.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let home = home_dir();

    if let Some(path) = config_path {
        let config = load_config_file(path)?;
        return Ok(Settings {
            home,
            source: Some(path.to_path_buf()),
            config,
        });
    }

    let default_path = home.join(CONFIG_FILE);
    if !default_path.exists() {
        tracing::debug!("No config at {}, using defaults", default_path.display());
        return Ok(Settings::with_home(home));
    }

    let config = load_config_file(&default_path)?;
    Ok(Settings {
        home,
        source: Some(default_path),
        config,
    })
}
