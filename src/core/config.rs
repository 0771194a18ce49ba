//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.zoid/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ZoidConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub health_interval_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

/// Optional extras sent alongside the prompt. Omitted from the request body when unset.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct GenerateConfig {
    pub user_id: Option<String>,
    pub mode: Option<String>,
    pub max_new_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub assistant_name: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_ASSISTANT_NAME: &str = "Zoid";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub health_interval: Duration,
    /// `None` means requests may hang forever, which is the default.
    pub request_timeout: Option<Duration>,
    pub generate: GenerateConfig,
    pub assistant_name: String,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub health_interval_secs: Option<u64>,
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

/// Returns the path to `~/.zoid/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".zoid").join("config.toml"))
}

/// Load config from `~/.zoid/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ZoidConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ZoidConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ZoidConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ZoidConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ZoidConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ZoidConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Zoid Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "http://127.0.0.1:5000"   # Or set ZOID_BASE_URL
# health_interval_secs = 30            # Or set ZOID_HEALTH_INTERVAL_SECS
# request_timeout_secs = 120           # Unset = wait forever

# [generate]
# user_id = "user"                     # Or set ZOID_USER_ID
# mode = "balanced"
# max_new_tokens = 128

# [ui]
# assistant_name = "Zoid"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Process environment lookups, swappable in tests.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ZoidConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, &ProcessEnv)
}

pub fn resolve_with_env(
    config: &ZoidConfig,
    cli: &CliOverrides,
    env: &dyn EnvSource,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env.var("ZOID_BASE_URL"))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = base_url.trim_end_matches('/').to_string();

    // Health interval: CLI → env → config → default. Zero is not a valid period.
    let env_interval = env.var("ZOID_HEALTH_INTERVAL_SECS").and_then(|v| {
        v.parse::<u64>()
            .map_err(|e| warn!("Ignoring ZOID_HEALTH_INTERVAL_SECS={v:?}: {e}"))
            .ok()
    });
    let interval_secs = cli
        .health_interval_secs
        .or(env_interval)
        .or(config.backend.health_interval_secs)
        .filter(|&secs| secs > 0)
        .unwrap_or(DEFAULT_HEALTH_INTERVAL_SECS);

    let request_timeout = config
        .backend
        .request_timeout_secs
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs);

    let mut generate = config.generate.clone();
    if let Some(user_id) = env.var("ZOID_USER_ID") {
        generate.user_id = Some(user_id);
    }

    ResolvedConfig {
        base_url,
        health_interval: Duration::from_secs(interval_secs),
        request_timeout,
        generate,
        assistant_name: config
            .ui
            .assistant_name
            .clone()
            .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string()),
    }
}
