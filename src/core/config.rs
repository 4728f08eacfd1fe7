//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → CLI flags.
//!
//! Config lives at `~/.chatbox/config.toml` unless `--config` points elsewhere.
//! If missing on first run, a commented-out default is generated so users can
//! discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::tui::components::input_box::{DEFAULT_MAX_VISIBLE_LINES, DEFAULT_PLACEHOLDER};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatboxConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub placeholder: Option<String>,
    pub max_visible_lines: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "chatbox.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
/// Upper bound for `max_visible_lines`; anything taller stops being an input box
pub const MAX_VISIBLE_LINES_LIMIT: u16 = 20;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub placeholder: String,
    pub max_visible_lines: u16,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&ChatboxConfig::default(), &CliOverrides::default())
    }
}

/// Values from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub log_level: Option<LevelFilter>,
    pub log_file: Option<PathBuf>,
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

/// Returns the path to `~/.chatbox/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chatbox").join("config.toml"))
}

/// Load config from `path`, or from `~/.chatbox/config.toml` when `path` is None.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatboxConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<ChatboxConfig, ConfigError> {
    let path = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ChatboxConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ChatboxConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<ChatboxConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Chatbox Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → CLI flags.

# [input]
# placeholder = "Type your message here..."
# max_visible_lines = 5              # 1-20; the box scrolls past this

# [logging]
# level = "info"                     # "off", "error", "warn", "info", "debug", "trace"
# file = "chatbox.log"
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

/// Resolve the final config by collapsing: defaults → config file → CLI.
pub fn resolve(config: &ChatboxConfig, cli: &CliOverrides) -> ResolvedConfig {
    let placeholder = config
        .input
        .placeholder
        .clone()
        .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string());

    let max_visible_lines = config
        .input
        .max_visible_lines
        .unwrap_or(DEFAULT_MAX_VISIBLE_LINES)
        .clamp(1, MAX_VISIBLE_LINES_LIMIT);

    // Log level: CLI → config → default. Unknown names fall back with a warning.
    let log_level = cli.log_level.unwrap_or_else(|| {
        config
            .logging
            .level
            .as_deref()
            .and_then(|name| {
                let parsed = name.parse::<LevelFilter>().ok();
                if parsed.is_none() {
                    warn!("Unknown log level {:?}, using {}", name, DEFAULT_LOG_LEVEL);
                }
                parsed
            })
            .unwrap_or(DEFAULT_LOG_LEVEL)
    });

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        placeholder,
        max_visible_lines,
        log_level,
        log_file,
    }
}
