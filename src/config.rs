use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable pointing at an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "SILUET_CONFIG";

/// Bounds for [`Config::notification_secs`]
pub const MIN_NOTIFICATION_SECS: f64 = 0.5;
pub const MAX_NOTIFICATION_SECS: f64 = 60.0;

/// Application configuration.
///
/// Every field has a default, so a config file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width and height of the silhouette surface
    pub canvas_size: [f32; 2],
    /// Image drawn behind the placed items
    pub silhouette_image: String,
    /// How long a notification stays visible, in seconds
    pub notification_secs: f64,
    /// Label seeded into the lookbook list when none is stored
    pub default_lookbook: String,
    pub default_dressing_name: String,
    pub default_dressing_items: Vec<String>,
    /// Where durable state lives. `None` lets the binary pick a platform directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_size: [320.0, 520.0],
            silhouette_image: "images/silhouette.png".to_owned(),
            notification_secs: 2.2,
            default_lookbook: "Lookbook par défaut".to_owned(),
            default_dressing_name: "Basics".to_owned(),
            default_dressing_items: (1..=4)
                .map(|n| format!("images/visuel-defaut-{n}.png"))
                .collect(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Bring out-of-range values back into something the UI can use
    fn sanitized(mut self) -> Self {
        let secs = self.notification_secs;
        let clamped = if secs.is_nan() {
            Self::default().notification_secs
        } else {
            secs.clamp(MIN_NOTIFICATION_SECS, MAX_NOTIFICATION_SECS)
        };
        if clamped != secs {
            log::warn!("notification_secs {} out of range, using {}", secs, clamped);
            self.notification_secs = clamped;
        }
        self
    }

    /// Load the file named by `SILUET_CONFIG`, or the defaults when it is unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("Loading config from {}", Path::new(&path).display());
                Self::load(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "notification_secs": 5.0 }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.notification_secs, 5.0);
        assert_eq!(config.canvas_size, [320.0, 520.0]);
        assert_eq!(config.default_dressing_items.len(), 4);
    }

    #[test]
    fn test_notification_lifetime_is_clamped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "notification_secs": 1e300 }}"#).unwrap();
        assert_eq!(Config::load(file.path()).unwrap().notification_secs, MAX_NOTIFICATION_SECS);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "notification_secs": -3 }}"#).unwrap();
        assert_eq!(Config::load(file.path()).unwrap().notification_secs, MIN_NOTIFICATION_SECS);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Config::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
