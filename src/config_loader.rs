use serde::Deserialize;
use std::fs;
use std::path::Path;
use crate::app_config::ApplicationConfig;
use anyhow::{Result, Context, bail};
use log::{debug, info, warn};
use std::time::Instant;

pub const DEFAULT_CONFIG_PATH: &str = "config/tcman.yaml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MasterConfig {
    #[serde(rename = "application", default)]
    pub app_settings: ApplicationConfig,
}

pub fn load_config(path: &str) -> Result<MasterConfig> {
    debug!("📄 Attempting to load config from: {}", path);
    let start_time = Instant::now();

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file '{}'. 📖", path))?;
    debug!("Read config file in {:?}", start_time.elapsed());

    let config = parse_config(&config_str)
        .with_context(|| format!("Failed to load configuration from '{}'. 💔", path))?;

    info!("✅ Successfully loaded and validated configuration from '{}' in {:?}", path, start_time.elapsed());
    Ok(config)
}

/// Loads an explicitly requested config file, or falls back to the built-in
/// defaults when the default path is absent.
pub fn load_config_or_default(explicit_path: Option<&str>) -> Result<MasterConfig> {
    match explicit_path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => {
            warn!("No configuration file at '{}'. Using built-in defaults.", DEFAULT_CONFIG_PATH);
            Ok(MasterConfig::default())
        }
    }
}

pub fn parse_config(yaml: &str) -> Result<MasterConfig> {
    let parse_start_time = Instant::now();
    // An empty document deserializes as unit, not as an empty mapping
    let config: MasterConfig = if yaml.trim().is_empty() {
        MasterConfig::default()
    } else {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")?
    };
    debug!("Parsed YAML in {:?}", parse_start_time.elapsed());

    validate_master_config(&config).context("Master configuration validation failed 👎")?;
    Ok(config)
}

fn validate_master_config(config: &MasterConfig) -> Result<()> {
    debug!("🕵️ Validating master configuration...");
    if config.app_settings.split_file_count_limit == 0 {
        bail!("❌ Application split_file_count_limit must be greater than zero.");
    }
    if config.app_settings.annotate_filename_column.trim().is_empty() {
        bail!("❌ Application annotate_filename_column cannot be empty.");
    }
    debug!("👍 Master configuration validated.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.app_settings.split_file_count_limit, 1000);
        assert_eq!(config.app_settings.annotate_filename_column, "filename");
        assert!(!config.app_settings.use_shell);
    }

    #[test]
    fn partial_application_section_keeps_other_defaults() {
        let yaml = "application:\n  split_file_count_limit: 250\n  use_shell: true\n";
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.app_settings.split_file_count_limit, 250);
        assert!(config.app_settings.use_shell);
        assert_eq!(config.app_settings.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn zero_file_count_limit_is_rejected() {
        let yaml = "application:\n  split_file_count_limit: 0\n";
        assert!(parse_config(yaml).is_err());
    }

    #[test]
    fn blank_filename_column_is_rejected() {
        let yaml = "application:\n  annotate_filename_column: \"  \"\n";
        assert!(parse_config(yaml).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(load_config_or_default(Some("/nonexistent/tcman.yaml")).is_err());
    }
}
