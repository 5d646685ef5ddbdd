use anyhow::{Context, Result};
use extract::BuilderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Path of an optional JSON config file.
pub const CONFIG_ENV: &str = "PROCESS_FLOW_CONFIG";
/// Overrides `server.port`.
pub const PORT_ENV: &str = "PROCESS_FLOW_PORT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub builder: BuilderConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 10000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Defaults, overlaid with the file named by `PROCESS_FLOW_CONFIG` and
    /// the port from `PROCESS_FLOW_PORT` when those are set.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Ok(port) = std::env::var(PORT_ENV) {
            config.server.port = port
                .parse()
                .with_context(|| format!("Invalid {PORT_ENV}: {port:?}"))?;
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract::OtherSpanPolicy;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert!(config.cache.enabled);
        assert_eq!(config.builder.other_spans, OtherSpanPolicy::Flush);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_json_str(
            r#"{"server": {"port": 8080}, "builder": {"other_spans": "absorb"}}"#,
        )
        .unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.builder.other_spans, OtherSpanPolicy::Absorb);
        assert_eq!(config.cache.max_entries, 10000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let result = AppConfig::from_json_str(r#"{"builder": {"other_spans": "merge"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_missing_file() {
        let result = AppConfig::from_file(Path::new("/nonexistent/process-flow.json"));
        assert!(result.is_err());
    }
}
