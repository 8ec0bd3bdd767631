//! Configuration constants and profile loading for mizan
//!
//! Connection settings live in an INI profile file, one section per named
//! profile:
//!
//! ```ini
//! [default]
//! host = http://localhost:8000
//! data_dir = ~/.mizan
//! history_capacity = 50
//! ```

use anyhow::{anyhow, Context, Result};
use ini::Ini;
use std::path::{Path, PathBuf};

use crate::history::DEFAULT_CAPACITY;

/// Default profile file path for mizan
pub const DEFAULT_PROFILE_PATH: &str = "~/.mizan/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "MIZAN_PROFILE_PATH";

/// Environment variable name for overriding the backend host
pub const HOST_ENV_VAR: &str = "MIZAN_HOST";

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "MIZAN_LOG";

pub const DEFAULT_PROFILE_NAME: &str = "default";
pub const DEFAULT_HOST: &str = "http://localhost:8000";
pub const DEFAULT_DATA_DIR: &str = "~/.mizan";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Expand a leading `~` and environment variables in a configured path
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => PathBuf::from(shellexpand::tilde(path).into_owned()),
    }
}

/// Resolved settings for one named profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub host: String,
    pub data_dir: PathBuf,
    pub history_capacity: usize,
}

impl Profile {
    /// Built-in settings used when no profile file exists
    pub fn defaults(name: &str) -> Self {
        Self {
            name: name.to_string(),
            host: DEFAULT_HOST.to_string(),
            data_dir: expand_path(DEFAULT_DATA_DIR),
            history_capacity: DEFAULT_CAPACITY,
        }
    }

    /// Read the named section of a parsed profile file
    pub fn from_ini(ini: &Ini, name: &str) -> Result<Self> {
        let section = ini
            .section(Some(name))
            .ok_or_else(|| anyhow!("profile '{name}' not found"))?;

        let mut profile = Self::defaults(name);
        if let Some(host) = section.get("host") {
            profile.host = host.trim().to_string();
        }
        if let Some(dir) = section.get("data_dir") {
            profile.data_dir = expand_path(dir.trim());
        }
        if let Some(capacity) = section.get("history_capacity") {
            profile.history_capacity = parse_capacity(capacity)
                .with_context(|| format!("invalid history_capacity in profile '{name}'"))?;
        }
        Ok(profile)
    }

    /// Apply process-level overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(host) = std::env::var_os(HOST_ENV_VAR).and_then(|v| v.into_string().ok()) {
            tracing::debug!("Host overridden by {HOST_ENV_VAR}: {host}");
            self.host = host;
        }
        self
    }
}

fn parse_capacity(raw: &str) -> Result<usize> {
    let capacity: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a number", raw.trim()))?;
    if capacity == 0 {
        return Err(anyhow!("capacity must be at least 1"));
    }
    Ok(capacity)
}

/// Load a named profile from `path`, falling back to defaults when the
/// file does not exist
pub fn load_profile(path: &str, name: &str) -> Result<Profile> {
    let expanded = expand_path(path);
    if !Path::new(&expanded).exists() {
        tracing::debug!(
            "Profile file {} not found, using defaults",
            expanded.display()
        );
        return Ok(Profile::defaults(name));
    }

    let ini = Ini::load_from_file(&expanded)
        .with_context(|| format!("failed to parse profile file {}", expanded.display()))?;
    Profile::from_ini(&ini, name)
}
