//! Layered application configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. an optional YAML file
//! 3. environment variables prefixed with `ARMKIT__` (`__` separates nested keys,
//!    e.g. `ARMKIT__SERVER__BIND_ADDR`)
//! 4. command line overrides ([`AppConfig::apply_cli_overrides`])

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment prefix for configuration overrides.
pub const ENV_PREFIX: &str = "ARMKIT__";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub pagination: PaginationConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Deadline for one request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    /// Page size the store uses when the caller sends no `top`.
    pub default_page_size: usize,
    pub min_top: usize,
    pub max_top: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 25,
            min_top: 5,
            max_top: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// JSON file of stored resources loaded into the in-memory store at startup.
    pub seed_file: Option<PathBuf>,
}

/// Command line values that override the layered configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    /// `-v` count: 1 = info, 2 = debug, 3+ = trace.
    pub verbose: u8,
}

impl AppConfig {
    /// Load defaults, then `path` (if any), then `ARMKIT__*` environment variables.
    ///
    /// # Errors
    /// Returns an error when the file cannot be parsed, a value has the wrong type, an
    /// unknown key is present or the pagination bounds are inconsistent.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Self = figment.extract().with_context(|| match path {
            Some(p) => format!("invalid configuration in {}", p.display()),
            None => "invalid configuration".to_owned(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns an error when the pagination bounds are empty or zero.
    pub fn validate(&self) -> Result<()> {
        let p = &self.pagination;
        if p.min_top == 0 || p.min_top > p.max_top {
            anyhow::bail!(
                "pagination.min_top ({}) must be positive and not above pagination.max_top ({})",
                p.min_top,
                p.max_top
            );
        }
        if p.default_page_size == 0 {
            anyhow::bail!("pagination.default_page_size must be positive");
        }
        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("server.request_timeout_secs must be positive");
        }
        Ok(())
    }

    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.bind_addr.set_port(port);
        }
        let level = match args.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        };
        if let Some(level) = level {
            level.clone_into(&mut self.logging.level);
        }
    }

    /// Render the effective configuration as YAML.
    ///
    /// # Errors
    /// Returns the serializer error.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration as YAML")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_port_and_verbosity() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(&CliArgs {
            port: Some(9443),
            verbose: 2,
        });
        assert_eq!(config.server.bind_addr.port(), 9443);
        assert_eq!(config.logging.level, "debug");

        config.apply_cli_overrides(&CliArgs {
            port: None,
            verbose: 0,
        });
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let mut config = AppConfig::default();
        config.pagination.min_top = 50;
        config.pagination.max_top = 10;
        assert!(config.validate().is_err());
        config.pagination.min_top = 0;
        assert!(config.validate().is_err());
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn request_timeout_is_in_seconds() {
        assert_eq!(
            ServerConfig::default().request_timeout(),
            Duration::from_secs(30)
        );
    }
}
