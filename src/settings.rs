//! Monitor settings loaded from a file with environment overrides.

use crate::core::{DEFAULT_INTERVAL_SECS, interval_millis};
use crate::error::{MonitorError, Result};
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix used by [`MonitorSettings::load`].
pub const DEFAULT_ENV_PREFIX: &str = "CONFIG_MONITOR";

fn default_monitor_interval() -> u32 {
    DEFAULT_INTERVAL_SECS
}

/// Settings controlling how often a monitor checks its resource.
///
/// # Examples
///
/// ```rust,no_run
/// use config_monitor::settings::MonitorSettings;
///
/// # fn example() -> config_monitor::error::Result<()> {
/// // monitor.yaml:
/// //   monitor_interval: 30
/// // CONFIG_MONITOR_MONITOR_INTERVAL=60 overrides the file.
/// let settings = MonitorSettings::load("config/monitor.yaml")?;
/// println!("checking every {:?}", settings.effective_interval());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Requested check interval in seconds; values below 5 are raised to 5.
    #[serde(default = "default_monitor_interval")]
    pub monitor_interval: u32,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            monitor_interval: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl MonitorSettings {
    /// Load settings from a YAML, TOML or JSON file, with `CONFIG_MONITOR_*`
    /// environment variables taking precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, has an unsupported extension,
    /// or contains invalid values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_env(path, DEFAULT_ENV_PREFIX)
    }

    /// Load settings from a file, with `<prefix>_*` environment variables taking precedence.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_env(path: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        let path = path.as_ref();
        validate_extension(path)?;

        if !path.exists() {
            return Err(MonitorError::LoadError(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }

        let config = config::Config::builder()
            .add_source(File::from(path.to_path_buf()).required(true))
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()
            .map_err(|e| MonitorError::LoadError(format!("Failed to load file: {}", e)))?;

        let settings = config.try_deserialize::<Self>().map_err(|e| {
            MonitorError::DeserializationError(format!("Failed to parse settings: {}", e))
        })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            path = %path.display(),
            monitor_interval = settings.monitor_interval,
            "Loaded monitor settings"
        );

        Ok(settings)
    }

    /// The interval a monitor built from these settings will actually use.
    pub fn effective_interval(&self) -> Duration {
        Duration::from_millis(interval_millis(self.monitor_interval))
    }
}

fn validate_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| {
            MonitorError::LoadError(format!(
                "Unable to determine file format for: {}",
                path.display()
            ))
        })?;

    match extension {
        "yaml" | "yml" | "toml" | "json" => Ok(()),
        _ => Err(MonitorError::LoadError(format!(
            "Unsupported file extension: {}. Supported: .yaml, .yml, .toml, .json",
            extension
        ))),
    }
}
