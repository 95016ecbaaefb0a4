//! Configuration resolution
//!
//! Settings resolve through tiers: command line → environment → TOML file →
//! built-in default. The TOML file (`~/.config/rigscan/rigscan.toml`) is
//! optional; a missing file means defaults, a malformed one is warned about
//! and skipped so the service still starts. When a value appears in more
//! than one source the highest-priority source wins and a warning names the
//! others.

use rigscan_common::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable carrying the Groq API key.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Environment variable overriding the Groq model id.
pub const GROQ_MODEL_ENV: &str = "RIGSCAN_GROQ_MODEL";

/// Optional settings file contents. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the SQLite database file.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Groq API key used for recommendation generation.
    #[serde(default)]
    pub groq_api_key: Option<String>,

    /// Groq model id override.
    #[serde(default)]
    pub groq_model: Option<String>,
}

/// Fully resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: PathBuf,
    /// Absent key is not a startup error; generation requests fail with a
    /// configuration error instead.
    pub groq_api_key: Option<String>,
    /// `None` selects the generator's built-in default model.
    pub groq_model: Option<String>,
}

/// Platform path of the optional settings file.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("rigscan").join("rigscan.toml"))
}

/// OS-dependent default database location, e.g.
/// `~/.local/share/rigscan/rigscan.db` on Linux.
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("rigscan").join("rigscan.db"))
        .unwrap_or_else(|| PathBuf::from("rigscan.db"))
}

/// Parse the settings file at `path`.
pub fn load_toml(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Resolve the full configuration.
///
/// `port` and `database_flag` arrive already merged from the command line
/// and their environment variables; this adds the TOML and default tiers
/// plus the Groq settings, which have no command-line flags.
pub fn resolve(port: u16, database_flag: Option<PathBuf>) -> Config {
    let toml_config = match config_file_path() {
        Some(path) if path.exists() => match load_toml(&path) {
            Ok(cfg) => {
                info!("Loaded settings file {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("Ignoring settings file {}: {}", path.display(), e);
                TomlConfig::default()
            }
        },
        _ => TomlConfig::default(),
    };

    let database_path = resolve_database_path(database_flag, toml_config.database_path);
    let groq_api_key = resolve_setting(
        "Groq API key",
        GROQ_API_KEY_ENV,
        toml_config.groq_api_key.as_deref(),
    );
    let groq_model = resolve_setting(
        "Groq model",
        GROQ_MODEL_ENV,
        toml_config.groq_model.as_deref(),
    );

    Config {
        port,
        database_path,
        groq_api_key,
        groq_model,
    }
}

fn resolve_database_path(flag: Option<PathBuf>, toml_path: Option<PathBuf>) -> PathBuf {
    if flag.is_some() && toml_path.is_some() {
        warn!(
            "Database path found in multiple sources: command line/environment, TOML. \
             Using command line/environment (highest priority)."
        );
    }

    if let Some(path) = flag {
        info!("Database path from command line or environment: {}", path.display());
        return path;
    }
    if let Some(path) = toml_path {
        info!("Database path from TOML config: {}", path.display());
        return path;
    }
    let path = default_database_path();
    info!("Database path defaulting to {}", path.display());
    path
}

/// Resolve one optional setting from environment then TOML, with a warning
/// when both are set. Blank or whitespace-only values count as unset.
fn resolve_setting(what: &str, env_var: &str, toml_value: Option<&str>) -> Option<String> {
    let env_value = std::env::var(env_var).ok().filter(|v| is_set(v));
    let toml_value = toml_value.filter(|v| is_set(v));

    let mut sources = Vec::new();
    if env_value.is_some() {
        sources.push("environment");
    }
    if toml_value.is_some() {
        sources.push("TOML");
    }
    if sources.len() > 1 {
        warn!(
            "{} found in multiple sources: {}. Using environment (highest priority).",
            what,
            sources.join(", ")
        );
    }

    if let Some(value) = env_value {
        info!("{} loaded from environment variable {}", what, env_var);
        return Some(value);
    }
    if let Some(value) = toml_value {
        info!("{} loaded from TOML config", what);
        return Some(value.to_string());
    }
    None
}

fn is_set(value: &str) -> bool {
    !value.trim().is_empty()
}
