use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use quickparse_runner::{ReportFormat, RunOptions};
use tracing::debug;

/// File name of the user configuration inside `~/quickparse`.
pub const CONFIG_FILE: &str = "config.json";

const CONFIG_DIR: &str = "quickparse";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(flatten)]
    pub run: RunOptions,
    #[serde(default)]
    pub report_format: ReportFormat,
    #[serde(default = "Config::default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run: RunOptions::default(),
            report_format: ReportFormat::default(),
            log_level: Self::default_log_level(),
        }
    }
}

impl Config {
    fn default_log_level() -> String {
        "info".to_string()
    }

    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load `~/quickparse/config.json`, falling back to defaults when it does
    /// not exist.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read config {}: {e}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = Self::write_default(&config_dir.join(CONFIG_FILE))?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Write a pattern file ('quickparse template > patterns.yml')");
        println!("   2. Run 'quickparse parse patterns.yml <target_dir>'");
        println!();
        println!("🔧 Configuration options:");
        println!("   - keyword_label: Name of the keyword entry in reports");
        println!("   - extensions: File extensions scanned in each folder");
        println!("   - worker_multiplier: Worker threads per CPU core");
        println!("   - report_format: yaml or json");
        println!("   - log_level: error, warn, info, debug or trace");
        println!();
        Ok(())
    }

    /// Write the default configuration to `path`. Refuses to overwrite.
    pub fn write_default(path: &Path) -> anyhow::Result<PathBuf> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }
        let content = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(path, content + "\n")?;
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"keyword_label": "Device"}"#)
            .expect("partial config should parse");
        assert_eq!(config.run.keyword_label, "Device");
        assert_eq!(config.run.extensions, vec![".txt", ".log"]);
        assert_eq!(config.run.worker_multiplier, 2);
        assert_eq!(config.report_format, ReportFormat::Yaml);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn default_file_round_trips_and_is_not_overwritten() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);

        Config::write_default(&path).expect("first write succeeds");
        let loaded = Config::load_from(&path).expect("written config loads");
        assert_eq!(loaded, Config::default());

        let content = std::fs::read_to_string(&path).expect("readable");
        assert!(content.contains("\"report_format\": \"yaml\""));
        assert!(content.contains("\"worker_multiplier\": 2"));

        assert!(Config::write_default(&path).is_err());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn invalid_file_names_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"report_format": "xml"}"#).expect("write");

        let err = Config::load_from(&path).expect_err("unknown format rejected");
        assert!(err.to_string().contains(&path.display().to_string()));
    }
}
