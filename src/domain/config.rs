//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the Matrix connection, bot behaviour, and votekick tuning.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub votekick: VotekickConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

impl AppConfig {
    /// Reads and validates the configuration at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).context(crate::strings::logs::CONFIG_PARSE_ERROR)?;
        config.votekick.validate()?;
        Ok(config)
    }
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Command handling settings.
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Accounts treated as automated (never eligible to vote).
    #[serde(default)]
    pub bots: Vec<String>,
    #[serde(default = "default_quotes_path")]
    pub quotes: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            bots: Vec::new(),
            quotes: default_quotes_path(),
        }
    }
}

fn default_prefix() -> String {
    "!".to_string()
}
fn default_quotes_path() -> String {
    "data/quotes.json".to_string()
}

/// Election tuning. Values are fixed per election at creation time.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VotekickConfig {
    #[serde(default = "default_quorum_percent")]
    pub quorum_percent: u32,
    #[serde(default = "default_min_voters")]
    pub min_voters: usize,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for VotekickConfig {
    fn default() -> Self {
        Self {
            quorum_percent: default_quorum_percent(),
            min_voters: default_min_voters(),
            window_secs: default_window_secs(),
        }
    }
}

impl VotekickConfig {
    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.quorum_percent) {
            bail!("votekick.quorum_percent must be within 1..=100, got {}", self.quorum_percent);
        }
        if self.min_voters == 0 {
            bail!("votekick.min_voters must be at least 1");
        }
        if self.window_secs == 0 {
            bail!("votekick.window_secs must be at least 1");
        }
        Ok(())
    }
}

fn default_quorum_percent() -> u32 {
    51
}
fn default_min_voters() -> usize {
    3
}
fn default_window_secs() -> u64 {
    60
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
        }
    }
}

fn default_log_dir() -> String {
    "data".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
services:
  matrix:
    username: ellesee
    password: hunter2
    homeserver: https://matrix.example.org
"#;

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::parse(MINIMAL).unwrap();
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.bot.quotes, "data/quotes.json");
        assert_eq!(config.votekick, VotekickConfig::default());
        assert_eq!(config.votekick.quorum_percent, 51);
        assert_eq!(config.votekick.min_voters, 3);
        assert_eq!(config.votekick.window_secs, 60);
        assert_eq!(config.system.log_dir, "data");
    }

    #[test]
    fn test_overrides() {
        let yaml = format!(
            "{MINIMAL}bot:\n  prefix: \"?\"\n  bots: [\"@helper:example.org\"]\nvotekick:\n  min_voters: 5\n"
        );
        let config = AppConfig::parse(&yaml).unwrap();
        assert_eq!(config.bot.prefix, "?");
        assert_eq!(config.bot.bots, vec!["@helper:example.org".to_string()]);
        assert_eq!(config.votekick.min_voters, 5);
        assert_eq!(config.votekick.quorum_percent, 51);
    }

    #[test]
    fn test_rejects_bad_quorum() {
        let yaml = format!("{MINIMAL}votekick:\n  quorum_percent: 0\n");
        assert!(AppConfig::parse(&yaml).is_err());
        let yaml = format!("{MINIMAL}votekick:\n  quorum_percent: 101\n");
        assert!(AppConfig::parse(&yaml).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.services.matrix.username, "ellesee");
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
