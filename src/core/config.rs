//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pinpoint/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PinpointConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub nominatim: NominatimConfig,
    #[serde(default)]
    pub ip_api: IpApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub locator: Option<String>,
    pub camera_span: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NominatimConfig {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IpApiConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_IP_API_BASE_URL: &str = "http://ip-api.com";
// Nominatim's usage policy requires an identifying User-Agent
pub const DEFAULT_NOMINATIM_USER_AGENT: &str = "pinpoint/0.1";
/// Initial camera height in degrees of latitude.
pub const DEFAULT_CAMERA_SPAN: f64 = 0.25;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub locator: String,
    pub camera_span: f64,
    pub nominatim_base_url: String,
    pub nominatim_user_agent: String,
    pub ip_api_base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.pinpoint/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pinpoint").join("config.toml"))
}

/// Load config from `~/.pinpoint/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PinpointConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PinpointConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PinpointConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PinpointConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: PinpointConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Pinpoint Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# locator = "ip"                     # "ip" or "none"
# camera_span = 0.25                 # initial camera height in degrees of latitude

# [nominatim]
# base_url = "https://nominatim.openstreetmap.org"
# user_agent = "pinpoint/0.1"        # Or set NOMINATIM_USER_AGENT env var

# [ip_api]
# base_url = "http://ip-api.com"     # Or set IP_API_BASE_URL env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_locator` is from the `--locator` flag (None = not specified).
pub fn resolve(config: &PinpointConfig, cli_locator: Option<&str>) -> ResolvedConfig {
    // Locator: CLI → env → config → default
    let locator = cli_locator
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PINPOINT_LOCATOR").ok())
        .or_else(|| config.general.locator.clone())
        .unwrap_or_else(|| "ip".to_string());

    // Nominatim base URL: env → config → default
    let nominatim_base_url = std::env::var("NOMINATIM_BASE_URL")
        .ok()
        .or_else(|| config.nominatim.base_url.clone())
        .unwrap_or_else(|| DEFAULT_NOMINATIM_BASE_URL.to_string());

    // Nominatim User-Agent: env → config → default
    let nominatim_user_agent = std::env::var("NOMINATIM_USER_AGENT")
        .ok()
        .or_else(|| config.nominatim.user_agent.clone())
        .unwrap_or_else(|| DEFAULT_NOMINATIM_USER_AGENT.to_string());

    // IP geolocation base URL: env → config → default
    let ip_api_base_url = std::env::var("IP_API_BASE_URL")
        .ok()
        .or_else(|| config.ip_api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_IP_API_BASE_URL.to_string());

    ResolvedConfig {
        locator,
        camera_span: config.general.camera_span.unwrap_or(DEFAULT_CAMERA_SPAN),
        nominatim_base_url,
        nominatim_user_agent,
        ip_api_base_url,
    }
}
