/// Configuration schema and defaults for fleetboard.
///
/// Defines the TOML-serializable structure with two sections: `[api]`
/// (remote fleet API endpoints) and `[web]` (local dashboard bind address).
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level fleetboard configuration.
///
/// Maps directly to the `~/.fleetboard/config.toml` and `.fleetboard.toml`
/// file schemas. All sections and fields are optional — missing values fall
/// back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetboardConfig {
    pub api: ApiSection,
    pub web: WebSection,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Remote fleet API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Explicit API base URL. When set, environment detection is skipped
    /// entirely. Can also be set via `FLEETBOARD_API_BASE`.
    pub base: Option<String>,
    /// Base URL used when the dashboard host is `localhost`/`127.0.0.1`.
    pub development_base: String,
    /// Base URL used everywhere else.
    pub production_base: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base: None,
            development_base: "http://localhost:5000/api".to_string(),
            production_base: "https://fleetboard.onrender.com/api".to_string(),
            timeout_ms: 30_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Local dashboard server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSection {
    /// Host the embedded dashboard binds to. Also the hostname used for
    /// API environment detection.
    pub host: String,
    /// Port the embedded dashboard binds to.
    pub port: u16,
}

impl Default for WebSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8745,
        }
    }
}

impl WebSection {
    /// Bind address in `host:port` form.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ---------------------------------------------------------------------------
// Environment + resolved API config
// ---------------------------------------------------------------------------

/// Which of the two configured API base URLs applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Detect the environment from the hostname the dashboard is served on:
    /// `localhost` and `127.0.0.1` are development, everything else is
    /// production.
    pub fn detect(hostname: &str) -> Self {
        if hostname == "localhost" || hostname == "127.0.0.1" {
            Self::Development
        } else {
            Self::Production
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Fully resolved, immutable API connection settings.
///
/// Constructed once at startup and handed to the API client — no module
/// reads ambient global state to find the base URL.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl FleetboardConfig {
    /// Resolve the API settings for the given dashboard hostname.
    ///
    /// An explicit `api.base` wins; otherwise the hostname picks between
    /// the development and production base URLs. There is no error path —
    /// both branches are always configured (with hard-coded defaults when
    /// no config file exists).
    pub fn resolve_api(&self, hostname: &str) -> ApiConfig {
        let base = match &self.api.base {
            Some(base) => base.clone(),
            None => match Environment::detect(hostname) {
                Environment::Development => self.api.development_base.clone(),
                Environment::Production => self.api.production_base.clone(),
            },
        };

        ApiConfig {
            base_url: base.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(self.api.timeout_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_localhost_is_development() {
        assert_eq!(Environment::detect("localhost"), Environment::Development);
        assert_eq!(Environment::detect("127.0.0.1"), Environment::Development);
    }

    #[test]
    fn detect_anything_else_is_production() {
        assert_eq!(
            Environment::detect("dashboard.example.com"),
            Environment::Production
        );
        assert_eq!(Environment::detect("0.0.0.0"), Environment::Production);
    }

    #[test]
    fn resolve_follows_hostname() {
        let config = FleetboardConfig::default();
        let dev = config.resolve_api("localhost");
        assert_eq!(dev.base_url, "http://localhost:5000/api");

        let prod = config.resolve_api("fleet.example.org");
        assert_eq!(prod.base_url, "https://fleetboard.onrender.com/api");
    }

    #[test]
    fn explicit_base_wins_over_hostname() {
        let mut config = FleetboardConfig::default();
        config.api.base = Some("http://10.0.0.7:5000/api/".to_string());
        let resolved = config.resolve_api("localhost");
        assert_eq!(resolved.base_url, "http://10.0.0.7:5000/api");
    }

    #[test]
    fn resolve_strips_trailing_slash() {
        let mut config = FleetboardConfig::default();
        config.api.development_base = "http://localhost:5000/api/".to_string();
        let resolved = config.resolve_api("127.0.0.1");
        assert_eq!(resolved.base_url, "http://localhost:5000/api");
    }
}
