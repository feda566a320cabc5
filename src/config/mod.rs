/// Configuration system for fleetboard.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::FleetboardConfig::default()`]
/// 2. **User global config** — `~/.fleetboard/config.toml`
/// 3. **Project local config** — `.fleetboard.toml` in the current working directory
/// 4. **Environment variables** — `FLEETBOARD_*` overrides (highest precedence)
///
/// Later layers override earlier ones. Missing or malformed TOML files fall
/// back to the previous layer's values.
///
/// The resolved [`schema::ApiConfig`] is the crate's only source of truth
/// for which remote API to talk to: it is built once at startup via
/// [`schema::FleetboardConfig::resolve_api`] and injected into the API
/// client, never read from ambient state.
pub mod schema;

use std::fs;
use std::path::PathBuf;

pub use schema::{ApiConfig, Environment, FleetboardConfig};

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully merged fleetboard configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. This is the primary entry point for both the CLI and the web
/// dashboard.
pub fn load() -> FleetboardConfig {
    let mut config = FleetboardConfig::default();

    // Layer 2: user global config (~/.fleetboard/config.toml)
    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    // Layer 3: project local config (.fleetboard.toml)
    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    // Layer 4: environment variable overrides
    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed. A broken config file must never take the dashboard
/// down — the previous layer's values apply instead.
fn load_toml_file(path: Option<PathBuf>) -> Option<FleetboardConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.fleetboard/config.toml`.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Path to the project local config: `.fleetboard.toml` in the current
/// directory.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".fleetboard").join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".fleetboard.toml"))
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `FLEETBOARD_API_BASE` — explicit API base URL (skips environment detection)
/// - `FLEETBOARD_HOST` — dashboard bind host
/// - `FLEETBOARD_PORT` — dashboard bind port
/// - `FLEETBOARD_TIMEOUT_MS` — per-request timeout
fn apply_env_overrides(config: &mut FleetboardConfig) {
    if let Ok(val) = std::env::var("FLEETBOARD_API_BASE")
        && !val.trim().is_empty()
    {
        config.api.base = Some(val);
    }
    if let Ok(val) = std::env::var("FLEETBOARD_HOST")
        && !val.trim().is_empty()
    {
        config.web.host = val;
    }
    if let Ok(val) = std::env::var("FLEETBOARD_PORT")
        && let Ok(port) = val.parse::<u16>()
    {
        config.web.port = port;
    }
    if let Ok(val) = std::env::var("FLEETBOARD_TIMEOUT_MS")
        && let Ok(timeout) = val.parse::<u64>()
    {
        config.api.timeout_ms = timeout;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_files_present() {
        let config = FleetboardConfig::default();
        assert_eq!(config.web.addr(), "127.0.0.1:8745");
        assert_eq!(config.api.timeout_ms, 30_000);
        assert!(config.api.base.is_none());
    }

    #[test]
    fn toml_overlay_parses_partial_sections() {
        let parsed: FleetboardConfig = toml::from_str(
            r#"
            [api]
            base = "http://192.168.1.20:5000/api"
            "#,
        )
        .unwrap();
        assert_eq!(
            parsed.api.base.as_deref(),
            Some("http://192.168.1.20:5000/api")
        );
        // Unset fields keep their defaults.
        assert_eq!(parsed.web.port, 8745);
        assert_eq!(parsed.api.development_base, "http://localhost:5000/api");
    }

    #[test]
    fn malformed_toml_is_rejected_by_parser() {
        let parsed: Result<FleetboardConfig, _> = toml::from_str("api = 12");
        assert!(parsed.is_err());
    }
}
