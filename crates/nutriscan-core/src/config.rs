//! Application configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path (`--config`), else the override in the data dir
//!    (~/.local/share/nutriscan/config/nutriscan.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! The profile location resolves separately: `NUTRISCAN_PROFILE`, then
//! `[profile] path`, then `{data dir}/nutriscan/profile.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::matcher::MatchMode;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/nutriscan.toml");

/// Environment variable overriding the profile location
pub const PROFILE_ENV: &str = "NUTRISCAN_PROFILE";

/// Classifier settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub match_mode: MatchMode,
}

/// Server bind settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Product resolver settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Simulated latency for the mock resolver
    pub mock_delay: Option<Duration>,
}

/// Full application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    /// Configured profile location (before env override)
    pub profile_path: Option<PathBuf>,
    pub server: ServerSettings,
    pub scanner: ScannerConfig,
}

impl AppConfig {
    /// Load config, preferring `path`, then the data-dir override
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::NotFound(format!(
                        "Config file {}",
                        path.display()
                    )));
                }
                read_config(path)?
            }
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => read_config(&default_path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    /// Embedded defaults only
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Where the profile should be read from and written to
    pub fn resolve_profile_path(&self) -> Result<PathBuf> {
        resolve_profile_path(std::env::var(PROFILE_ENV).ok(), self.profile_path.as_deref())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("nutriscan").join("config").join("nutriscan.toml"))
}

/// Default profile location
pub fn default_profile_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("nutriscan").join("profile.json"))
}

fn resolve_profile_path(env_value: Option<String>, configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(value));
    }
    if let Some(path) = configured {
        return Ok(path.to_path_buf());
    }
    default_profile_path()
        .ok_or_else(|| Error::Config("Could not determine a data directory for the profile".into()))
}

fn read_config(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "Reading config");
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    classifier: Option<RawClassifier>,
    profile: Option<RawProfile>,
    server: Option<RawServer>,
    scanner: Option<RawScanner>,
}

#[derive(Debug, Deserialize)]
struct RawClassifier {
    match_mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawProfile {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct RawScanner {
    mock_delay_ms: Option<u64>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AppConfig::default();

    if let Some(classifier) = raw.classifier {
        if let Some(mode) = classifier.match_mode {
            config.classifier.match_mode = mode.parse().map_err(Error::Config)?;
        }
    }

    if let Some(profile) = raw.profile {
        config.profile_path = profile.path;
    }

    if let Some(server) = raw.server {
        if let Some(host) = server.host {
            config.server.host = host;
        }
        if let Some(port) = server.port {
            config.server.port = port;
        }
    }

    if let Some(scanner) = raw.scanner {
        config.scanner.mock_delay = scanner
            .mock_delay_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.classifier.match_mode, MatchMode::Substring);
        assert_eq!(config.server, ServerSettings::default());
        assert!(config.profile_path.is_none());
        assert!(config.scanner.mock_delay.is_none());
    }

    #[test]
    fn test_parse_overrides() {
        let config = parse_config(
            r#"
            [classifier]
            match_mode = "word_boundary"

            [profile]
            path = "/tmp/me.json"

            [server]
            port = 8080

            [scanner]
            mock_delay_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.classifier.match_mode, MatchMode::WordBoundary);
        assert_eq!(config.profile_path, Some(PathBuf::from("/tmp/me.json")));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.scanner.mock_delay, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_match_mode() {
        let err = parse_config("[classifier]\nmatch_mode = \"fuzzy\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(parse_config("[classifier").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nutriscan.toml");
        fs::write(&path, "[server]\nhost = \"0.0.0.0\"").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_profile_path_resolution() {
        let configured = PathBuf::from("/etc/nutriscan/profile.json");

        let path = resolve_profile_path(Some("/tmp/env.json".into()), Some(&configured)).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/env.json"));

        let path = resolve_profile_path(Some("  ".into()), Some(&configured)).unwrap();
        assert_eq!(path, configured);

        if let Some(default) = default_profile_path() {
            assert_eq!(resolve_profile_path(None, None).unwrap(), default);
        }
    }
}
