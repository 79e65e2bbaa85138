use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::monitor::MonitorConfig;
use super::output::{OutputConfig, OutputFormat};
use super::resolver::ResolverConfig;
use super::router::RouterConfig;

const LOCAL_CONFIG_PATH: &str = "routewatch.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/routewatch/config.toml";

/// Main configuration structure for routewatch
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// RouterOS API connection
    #[serde(default)]
    pub router: RouterConfig,

    /// Polling cadence and concurrency ceiling
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Reverse DNS / WHOIS settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. routewatch.toml in current directory
    /// 3. /etc/routewatch/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(host) = overrides.router_host {
            self.router.host = host;
        }
        if let Some(port) = overrides.router_port {
            self.router.port = port;
        }
        if let Some(username) = overrides.username {
            self.router.username = username;
        }
        if let Some(password) = overrides.password {
            self.router.password = password;
        }
        if let Some(interval) = overrides.poll_interval {
            self.monitor.poll_interval = interval;
        }
        if let Some(max) = overrides.max_concurrency {
            self.monitor.max_concurrency = max;
        }
        if let Some(timeout) = overrides.whois_timeout {
            self.resolver.whois_timeout = timeout;
        }
        if let Some(format) = overrides.output_format {
            self.output.format = format;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.router.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Router host cannot be empty".to_string(),
            ));
        }

        if self.router.port == 0 {
            return Err(ConfigError::Validation("Router port cannot be 0".to_string()));
        }

        if self.monitor.poll_interval == 0 {
            return Err(ConfigError::Validation(
                "Poll interval must be at least 1 second".to_string(),
            ));
        }

        if self.monitor.max_concurrency == 0 {
            return Err(ConfigError::Validation(
                "Max concurrency must be at least 1".to_string(),
            ));
        }

        if self.resolver.whois_timeout == 0 {
            return Err(ConfigError::Validation(
                "WHOIS timeout must be at least 1 second".to_string(),
            ));
        }

        if self.resolver.whois_command.trim().is_empty() {
            return Err(ConfigError::Validation(
                "WHOIS command cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub router_host: Option<String>,
    pub router_port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub poll_interval: Option<u64>,
    pub max_concurrency: Option<usize>,
    pub whois_timeout: Option<u64>,
    pub output_format: Option<OutputFormat>,
    pub log_level: Option<String>,
}
