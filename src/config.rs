//! Configuration file parser for ~/.config/tldr-board/config.toml.
//!
//! The config file is optional. A missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though we log a warning when the file
//! contains potential typos.
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::feed::DEFAULT_THEME;

/// Category priority used when the config does not override it.
pub const DEFAULT_THEME_ORDER: &[&str] = &[
    "Big Tech",
    "Startups",
    "AI",
    "Science",
    "World",
    "Business",
    "Tools",
    "Misc",
    "Quick Links",
];

/// Tag shown on tiles whose item has no source.
pub const DEFAULT_FALLBACK_TAG: &str = "TLDR";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed location: an http(s) URL or a path to a local `tldr.json`.
    pub feed_url: String,

    /// Category priority list. Listed categories are shown first, in this order.
    pub theme_order: Vec<String>,

    /// Category for items without a theme.
    pub default_theme: String,

    /// Tag for items without a source.
    pub fallback_tag: String,

    /// Per-request timeout for remote feeds, in seconds.
    pub request_timeout_secs: u64,

    /// Start with archived tiles visible.
    pub show_archived: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: "tldr.json".to_string(),
            theme_order: DEFAULT_THEME_ORDER.iter().map(|s| s.to_string()).collect(),
            default_theme: DEFAULT_THEME.to_string(),
            fallback_tag: DEFAULT_FALLBACK_TAG.to_string(),
            request_timeout_secs: 30,
            show_archived: false,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "feed_url",
                "theme_order",
                "default_theme",
                "fallback_tag",
                "request_timeout_secs",
                "show_archived",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), feed = %config.feed_url, "Loaded configuration");
        Ok(config)
    }

    /// Request timeout as a `Duration`, never zero.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.feed_url, "tldr.json");
        assert_eq!(config.theme_order.len(), 9);
        assert_eq!(config.theme_order[0], "Big Tech");
        assert_eq!(config.theme_order[8], "Quick Links");
        assert_eq!(config.default_theme, "General");
        assert_eq!(config.fallback_tag, "TLDR");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.show_archived);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/tldr_board_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.feed_url, "tldr.json");
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = std::env::temp_dir().join("tldr_board_config_test_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_theme, "General");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let dir = std::env::temp_dir().join("tldr_board_config_test_partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "feed_url = \"https://example.com/tldr.json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.feed_url, "https://example.com/tldr.json");
        assert_eq!(config.theme_order.len(), 9); // default
        assert_eq!(config.fallback_tag, "TLDR"); // default

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let dir = std::env::temp_dir().join("tldr_board_config_test_full");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = r#"
feed_url = "/srv/digest/tldr.json"
theme_order = ["AI", "Misc"]
default_theme = "Other"
fallback_tag = "Digest"
request_timeout_secs = 5
show_archived = true
"#;
        std::fs::write(&path, content).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.feed_url, "/srv/digest/tldr.json");
        assert_eq!(config.theme_order, vec!["AI".to_string(), "Misc".to_string()]);
        assert_eq!(config.default_theme, "Other");
        assert_eq!(config.fallback_tag, "Digest");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert!(config.show_archived);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let dir = std::env::temp_dir().join("tldr_board_config_test_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "this is not [valid toml").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let dir = std::env::temp_dir().join("tldr_board_config_test_unknown");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = r#"
fallback_tag = "TLDR"
totally_fake_key = "should not fail"
"#;
        std::fs::write(&path, content).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.fallback_tag, "TLDR");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let dir = std::env::temp_dir().join("tldr_board_config_test_wrongtype");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        // theme_order must be an array of strings
        std::fs::write(&path, "theme_order = \"AI\"\n").unwrap();

        assert!(Config::load(&path).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("tldr_board_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = "a".repeat(1_048_577);
        std::fs::write(&path, content).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
