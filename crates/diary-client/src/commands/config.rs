//! Configuration commands.
//!
//! `config_path` is the file the configuration was loaded from, which may be
//! a `--config` override rather than the default location.

use std::path::Path;

use crate::config::DiaryConfig;
use crate::error::{ClientError, ClientResult};

/// Renders the effective configuration as TOML.
pub fn dump(config: &DiaryConfig, config_path: &Path) -> ClientResult<String> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    Ok(format!(
        "# config.toml ({})\n{}",
        config_path.display(),
        toml_str.trim_end()
    ))
}

/// Checks the configuration and names the store it points at.
pub fn validate(config: &DiaryConfig) -> ClientResult<String> {
    config.validate().map_err(ClientError::Config)?;
    Ok(format!(
        "Configuration is valid.\nstore: {}",
        config.store_path().display()
    ))
}

/// Shows the configuration and store paths.
pub fn path(config: &DiaryConfig, config_path: &Path) -> ClientResult<String> {
    Ok(format!(
        "config: {}\nstore: {}",
        config_path.display(),
        config.store_path().display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn dump_contains_every_section() {
        let output = dump(&DiaryConfig::default(), &DiaryConfig::default_path()).unwrap();
        assert!(output.starts_with("# config.toml ("));
        assert!(output.contains("[display]"));
        assert!(output.contains("[composer]"));
        assert!(output.contains("id_prefix = \"local\""));
    }

    #[test]
    fn validate_reports_store() {
        let mut config = DiaryConfig::default();
        config.store.path = Some(PathBuf::from("/srv/diary/diary.json"));
        let output = validate(&config).unwrap();
        assert_eq!(output, "Configuration is valid.\nstore: /srv/diary/diary.json");

        config.composer.id_prefix.clear();
        assert!(matches!(validate(&config), Err(ClientError::Config(_))));
    }

    #[test]
    fn path_lists_both_files() {
        let output = path(&DiaryConfig::default(), &DiaryConfig::default_path()).unwrap();
        assert!(output.starts_with("config: "));
        assert!(output.contains("\nstore: "));
    }

    #[test]
    fn override_path_is_reported() {
        let mut config = DiaryConfig::default();
        config.store.path = Some(PathBuf::from("/srv/diary/diary.json"));
        let override_path = PathBuf::from("/etc/diary/branch-7.toml");

        assert_eq!(
            path(&config, &override_path).unwrap(),
            "config: /etc/diary/branch-7.toml\nstore: /srv/diary/diary.json"
        );
        assert!(
            dump(&config, &override_path)
                .unwrap()
                .starts_with("# config.toml (/etc/diary/branch-7.toml)\n")
        );
    }
}
