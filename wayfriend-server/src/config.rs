//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! overrides collected by the command line (which also reads
//! `BACKEND_URL`).

use std::{
    fs,
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use wayfriend_core::{Locale, request::DEFAULT_ROUTE_PATH};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    /// Base URL of the obstacle-aware routing backend.
    pub backend_url: String,
    pub route_path: String,
    pub request_timeout_secs: u64,
    pub max_concurrency: usize,
    /// Mount point of the forwarding proxy.
    pub proxy_prefix: String,
    pub locale: Locale,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 3000)),
            backend_url: "http://localhost:8000".to_string(),
            route_path: DEFAULT_ROUTE_PATH.to_string(),
            request_timeout_secs: 15,
            max_concurrency: 256,
            proxy_prefix: "/api/proxy".to_string(),
            locale: Locale::default(),
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<SocketAddr>,
    pub backend_url: Option<String>,
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Defaults, or the contents of `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Applies `overrides` and validates the result.
    pub fn apply(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(listen) = overrides.listen {
            self.listen = listen;
        }
        if let Some(url) = overrides.backend_url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "backend_url must be an http(s) URL, got {:?}",
                self.backend_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".into()));
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid("max_concurrency must be positive".into()));
        }
        let prefix = self.proxy_prefix.trim_end_matches('/');
        if !prefix.starts_with('/') || prefix.contains(['{', '}']) {
            return Err(ConfigError::Invalid(format!(
                "proxy_prefix must be a non-root absolute path, got {:?}",
                self.proxy_prefix
            )));
        }
        Ok(())
    }
}
