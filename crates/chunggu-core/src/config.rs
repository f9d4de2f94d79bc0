//! Application configuration management.
//!
//! Holds the data source location and the tunable thresholds used by the
//! statistics views (recent-form window, bucket size, minimum rounds).
//!
//! Configuration is stored at `~/.config/chunggu/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::TrendSettings;
use crate::store::DataSource;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "chunggu";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `members.json` and `scores.json`.
    pub data_dir: Option<PathBuf>,
    /// Base URL serving the same two files. Used when `data_dir` is unset.
    pub data_url: Option<String>,
    /// Meetings counted for the recent-form ranking.
    pub recent_window: usize,
    pub meetings_per_bucket: i64,
    pub moving_average_window: usize,
    pub improvement_min_points: usize,
    pub top_limit: usize,
    /// Minimum rounds for the best-average table.
    pub top_min_samples: usize,
    /// Extra attempts per collection when the web host fails.
    pub load_retries: u32,
    pub admin_username: String,
    pub admin_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            data_url: None,
            recent_window: 5,
            meetings_per_bucket: 10,
            moving_average_window: 3,
            improvement_min_points: 5,
            top_limit: 10,
            top_min_samples: 10,
            load_retries: 3,
            admin_username: "admin".to_string(),
            admin_password: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// The configured source; a local directory wins over a URL, and
    /// `./data` is the fallback.
    pub fn data_source(&self) -> DataSource {
        match (&self.data_dir, &self.data_url) {
            (Some(dir), _) => DataSource::Directory(dir.clone()),
            (None, Some(url)) => DataSource::Http {
                base_url: url.clone(),
            },
            (None, None) => DataSource::Directory(PathBuf::from("data")),
        }
    }

    /// Replace the configured source with one given on the command line.
    /// A directory wins when both are given; naming neither keeps the file's.
    pub fn override_source(&mut self, data_dir: Option<PathBuf>, data_url: Option<String>) {
        match (data_dir, data_url) {
            (Some(dir), _) => {
                self.data_dir = Some(dir);
                self.data_url = None;
            }
            (None, Some(url)) => {
                self.data_dir = None;
                self.data_url = Some(url);
            }
            (None, None) => {}
        }
    }

    pub fn trend_settings(&self) -> TrendSettings {
        TrendSettings {
            min_points: self.improvement_min_points,
            moving_average_window: self.moving_average_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.recent_window, 5);
        assert_eq!(config.meetings_per_bucket, 10);
        assert_eq!(config.trend_settings(), TrendSettings::default());
        assert_eq!(config.data_source(), DataSource::Directory(PathBuf::from("data")));
    }

    #[test]
    fn test_command_line_url_replaces_configured_dir() {
        let mut config = Config {
            data_dir: Some(PathBuf::from("/srv/club")),
            ..Default::default()
        };
        config.override_source(None, Some("https://club.example/data".to_string()));
        assert_eq!(
            config.data_source(),
            DataSource::Http {
                base_url: "https://club.example/data".to_string()
            }
        );

        config.override_source(Some(PathBuf::from("local")), None);
        assert_eq!(config.data_source(), DataSource::Directory(PathBuf::from("local")));
        assert_eq!(config.data_url, None);

        config.override_source(None, None);
        assert_eq!(config.data_source(), DataSource::Directory(PathBuf::from("local")));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"data_url": "https://example.org/data", "top_limit": 5}"#).unwrap();
        assert_eq!(config.top_limit, 5);
        assert_eq!(config.recent_window, 5);
        assert_eq!(
            config.data_source(),
            DataSource::Http {
                base_url: "https://example.org/data".to_string()
            }
        );
    }

    #[test]
    fn test_directory_wins_over_url() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/club")),
            data_url: Some("https://example.org".to_string()),
            ..Config::default()
        };
        assert_eq!(config.data_source(), DataSource::Directory(PathBuf::from("/srv/club")));
    }
}
