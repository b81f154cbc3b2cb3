//! Configuration for the remote store connection.
//!
//! Lives at `~/.visionpath/config.json`. A user-saved config file takes
//! priority; `VISIONPATH_SUPABASE_URL` / `VISIONPATH_SUPABASE_KEY` fill in
//! anything the file leaves blank. Missing or placeholder configuration means
//! permanent offline mode — the core runs fully from the local cache.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment fallbacks for the remote endpoint and credential.
const ENV_URL: &str = "VISIONPATH_SUPABASE_URL";
const ENV_KEY: &str = "VISIONPATH_SUPABASE_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub supabase_url: String,
    #[serde(default)]
    pub supabase_key: String,
}

impl Config {
    /// Whether a usable remote endpoint is configured.
    ///
    /// Scaffolding templates ship placeholder values; those count as
    /// unconfigured, same as empty.
    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_key.is_empty()
            && !self.supabase_url.contains("PLACEHOLDER")
    }
}

/// Get the canonical config file path (`~/.visionpath/config.json`).
pub fn config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("Could not find home directory")?;
    Ok(home.join(".visionpath").join("config.json"))
}

/// Load configuration from disk, then fill blanks from the environment.
///
/// A missing file is not an error — it yields an unconfigured (offline)
/// config. A file that exists but does not parse IS an error; silently
/// ignoring a corrupt config would look like data loss to the user.
pub fn load_config() -> Result<Config, String> {
    let path = config_path()?;

    let mut config = if path.exists() {
        let content =
            fs::read_to_string(&path).map_err(|e| format!("Failed to read config: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))?
    } else {
        Config::default()
    };

    if config.supabase_url.is_empty() {
        if let Ok(url) = std::env::var(ENV_URL) {
            config.supabase_url = url;
        }
    }
    if config.supabase_key.is_empty() {
        if let Ok(key) = std::env::var(ENV_KEY) {
            config.supabase_key = key;
        }
    }

    Ok(config)
}

/// Write configuration to `~/.visionpath/config.json`, creating the directory
/// on first run.
pub fn save_config(config: &Config) -> Result<(), String> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| format!("Failed to create config dir: {}", e))?;
        }
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(&path, content).map_err(|e| format!("Failed to write config: {}", e))?;

    Ok(())
}
