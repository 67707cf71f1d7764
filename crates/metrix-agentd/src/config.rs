use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use metrix_observe::{LoggerConfig, LoggerFormat, LoggerLevel};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default exposition port.
pub const DEFAULT_PORT: u16 = 8001;

pub const ENV_LISTEN: &str = "METRIX_LISTEN";
pub const ENV_PORT: &str = "METRIX_PORT";
pub const ENV_CREATED_SAMPLES: &str = "METRIX_CREATED_SAMPLES";
pub const ENV_DEMO: &str = "METRIX_DEMO";
pub const ENV_LOG_LEVEL: &str = "METRIX_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "METRIX_LOG_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Interface to bind.
    pub listen: IpAddr,
    pub port: u16,
    /// Emit `_created` samples for counters.
    pub created_samples: bool,
    /// Run the synthetic request workload.
    pub demo: bool,
    pub logger: LoggerConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            listen: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            created_samples: false,
            demo: false,
            logger: LoggerConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Load from process environment on top of defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup on top of defaults.
    ///
    /// Unset and empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(v) = get(ENV_LISTEN) {
            cfg.listen = v.trim().parse::<IpAddr>().map_err(|e| invalid(ENV_LISTEN, &v, e))?;
        }
        if let Some(v) = get(ENV_PORT) {
            cfg.port = v.trim().parse::<u16>().map_err(|e| invalid(ENV_PORT, &v, e))?;
        }
        if let Some(v) = get(ENV_CREATED_SAMPLES) {
            cfg.created_samples = parse_bool(&v)
                .ok_or_else(|| invalid(ENV_CREATED_SAMPLES, &v, "expected a boolean"))?;
        }
        if let Some(v) = get(ENV_DEMO) {
            cfg.demo =
                parse_bool(&v).ok_or_else(|| invalid(ENV_DEMO, &v, "expected a boolean"))?;
        }
        if let Some(v) = get(ENV_LOG_LEVEL) {
            cfg.logger.level =
                LoggerLevel::new(v.trim()).map_err(|e| invalid(ENV_LOG_LEVEL, &v, e))?;
        }
        if let Some(v) = get(ENV_LOG_FORMAT) {
            cfg.logger.format = v
                .parse::<LoggerFormat>()
                .map_err(|e| invalid(ENV_LOG_FORMAT, &v, e))?;
        }

        Ok(cfg)
    }

    /// Address the exposition endpoint binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen, self.port)
    }
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Accepts `1/0`, `t/f`, `true/false`, `yes/no`, `on/off` (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
