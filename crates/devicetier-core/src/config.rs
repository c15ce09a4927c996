//! Service configuration read from the environment.

use std::net::IpAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3003;

/// Cross-origin policy applied to the HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorsMode {
    /// Any origin may call the API (the site front-end is usually served elsewhere).
    #[default]
    Permissive,
    /// No CORS headers are added.
    Off,
}

impl FromStr for CorsMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" | "on" | "true" => Ok(Self::Permissive),
            "off" | "false" | "none" => Ok(Self::Off),
            other => Err(Error::Config(format!("unknown CORS mode '{other}'"))),
        }
    }
}

/// Top-level devicetier configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceTierConfig {
    /// Interface the HTTP server binds to.
    pub host: IpAddr,
    /// HTTP server port.
    pub port: u16,
    pub cors: CorsMode,
}

impl Default for DeviceTierConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            cors: CorsMode::default(),
        }
    }
}

impl DeviceTierConfig {
    /// Create configuration from process environment and defaults.
    ///
    /// Reads `DEVICETIER_HOST`, `PORT` and `DEVICETIER_CORS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("DEVICETIER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host
            .trim()
            .parse::<IpAddr>()
            .map_err(|e| Error::Config(format!("DEVICETIER_HOST '{host}': {e}")))?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("PORT '{raw}': {e}")))?,
            None => DEFAULT_PORT,
        };

        let cors = match lookup("DEVICETIER_CORS") {
            Some(raw) => raw.parse()?,
            None => CorsMode::default(),
        };

        Ok(Self { host, port, cors })
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        match self.host {
            IpAddr::V4(ip) => format!("{}:{}", ip, self.port),
            IpAddr::V6(ip) => format!("[{}]:{}", ip, self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DeviceTierConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DeviceTierConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:3003");
    }

    #[test]
    fn test_reads_overrides() {
        let config = DeviceTierConfig::from_lookup(lookup(&[
            ("DEVICETIER_HOST", "127.0.0.1"),
            ("PORT", " 8080 "),
            ("DEVICETIER_CORS", "off"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors, CorsMode::Off);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_ipv6_bind_addr() {
        let config = DeviceTierConfig::from_lookup(lookup(&[("DEVICETIER_HOST", "::1")])).unwrap();
        assert_eq!(config.bind_addr(), "[::1]:3003");
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = DeviceTierConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = DeviceTierConfig::from_lookup(lookup(&[("DEVICETIER_HOST", "localhost")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = DeviceTierConfig::from_lookup(lookup(&[("DEVICETIER_CORS", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
