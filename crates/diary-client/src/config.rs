//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/diary/config.toml` by default:
//!
//! ```toml
//! debug = false
//! log_format = "compact"
//!
//! [store]
//! path = "/srv/diary/diary.json"
//!
//! [display]
//! json = false
//! no_events_text = "No events scheduled"
//!
//! [composer]
//! id_prefix = "local"
//! property_href_base = "/properties"
//! ```

use std::path::{Path, PathBuf};

use diary_core::{ComposerOptions, TracingOutputFormat};
use serde::{Deserialize, Serialize};

/// Configuration for the diary client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiaryConfig {
    /// Debug mode.
    pub debug: bool,

    /// Log line format on stderr (`compact`, `pretty` or `json`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<TracingOutputFormat>,

    /// Diary store settings.
    pub store: StoreSettings,

    /// Display settings.
    pub display: DisplaySettings,

    /// Settings for composed bookings.
    pub composer: ComposerOptions,
}

/// Where the diary store lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the diary store; the data directory is used when unset.
    pub path: Option<PathBuf>,
}

/// Display settings for output formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Print JSON instead of text.
    pub json: bool,

    /// Text to show when a window has no events.
    pub no_events_text: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            json: false,
            no_events_text: "No events scheduled".to_string(),
        }
    }
}

impl DiaryConfig {
    /// Loads configuration from the default path, or defaults if it is absent.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse {}: {}", path.display(), e))
    }

    /// Checks settings that parse but cannot work.
    pub fn validate(&self) -> Result<(), String> {
        if self.composer.id_prefix.trim().is_empty() {
            return Err("composer.id_prefix must not be empty".to_string());
        }
        if self.composer.property_href_base.trim().is_empty() {
            return Err("composer.property_href_base must not be empty".to_string());
        }
        if self
            .store
            .path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err("store.path must not be empty".to_string());
        }
        Ok(())
    }

    /// The diary store path, falling back to the data directory.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(Self::default_store_path)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("diary")
    }

    pub fn default_store_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("diary")
            .join("diary.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config: DiaryConfig = toml::from_str("").unwrap();
        assert_eq!(config, DiaryConfig::default());
        assert_eq!(config.display.no_events_text, "No events scheduled");
        assert_eq!(config.composer.id_prefix, "local");
        assert_eq!(config.composer.property_href_base, "/properties");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: DiaryConfig = toml::from_str(
            r#"
debug = true

[store]
path = "/srv/diary/diary.json"

[composer]
id_prefix = "branch-7"
"#,
        )
        .unwrap();

        assert!(config.debug);
        assert_eq!(config.store_path(), PathBuf::from("/srv/diary/diary.json"));
        assert_eq!(config.composer.id_prefix, "branch-7");
        assert_eq!(config.composer.property_href_base, "/properties");
        assert!(!config.display.json);
    }

    #[test]
    fn log_format_is_optional() {
        assert_eq!(DiaryConfig::default().log_format, None);

        let config: DiaryConfig = toml::from_str("log_format = \"json\"").unwrap();
        assert_eq!(config.log_format, Some(TracingOutputFormat::Json));

        assert!(toml::from_str::<DiaryConfig>("log_format = \"xml\"").is_err());
    }

    #[test]
    fn store_path_falls_back_to_data_dir() {
        let config = DiaryConfig::default();
        assert!(config.store_path().ends_with("diary/diary.json"));
    }

    #[test]
    fn validate_rejects_blank_composer_settings() {
        let mut config = DiaryConfig::default();
        config.composer.id_prefix = "  ".to_string();
        assert!(config.validate().unwrap_err().contains("id_prefix"));

        let mut config = DiaryConfig::default();
        config.composer.property_href_base = String::new();
        assert!(config.validate().unwrap_err().contains("property_href_base"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\njson = true").unwrap();

        let config = DiaryConfig::load_from(file.path()).unwrap();
        assert!(config.display.json);
    }

    #[test]
    fn load_from_missing_or_broken_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = DiaryConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.contains("failed to read"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debug = \"sometimes\"").unwrap();
        let err = DiaryConfig::load_from(file.path()).unwrap_err();
        assert!(err.contains("failed to parse"));
    }

    #[test]
    fn dump_round_trips_through_toml() {
        let mut config = DiaryConfig::default();
        config.store.path = Some(PathBuf::from("/tmp/diary.json"));
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: DiaryConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
