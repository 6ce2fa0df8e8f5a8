use serde::{Deserialize, Serialize};

use super::directive::parse_directives;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::rewrite::RewriteConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG: &str = "rewriteng.toml";
const SYSTEM_CONFIG: &str = "/etc/rewriteng/config.toml";

/// Main configuration structure for rewriteng
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address, TCP)
    #[serde(default)]
    pub server: ServerConfig,

    /// Where rewritten queries are forwarded
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rewrite rules, evaluated in order
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. rewriteng.toml in current directory
    /// 3. /etc/rewriteng/config.toml
    /// 4. Default configuration
    ///
    /// Rules from `rewrite.rules_file` are appended after the inline rules.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG).exists() {
            Self::from_file(LOCAL_CONFIG)?
        } else if std::path::Path::new(SYSTEM_CONFIG).exists() {
            Self::from_file(SYSTEM_CONFIG)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.load_rules_file()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(rules_file) = overrides.rules_file {
            self.rewrite.rules_file = Some(rules_file);
        }
    }

    fn load_rules_file(&mut self) -> Result<(), ConfigError> {
        let Some(path) = self.rewrite.rules_file.as_deref() else {
            return Ok(());
        };
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        let rules = parse_directives(&contents)?;
        self.rewrite.rules.extend(rules);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.upstream.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        for (index, rule) in self.rewrite.rules.iter().enumerate() {
            rule.validate()
                .map_err(|source| ConfigError::Rule { index, source })?;
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
    pub rules_file: Option<String>,
}
