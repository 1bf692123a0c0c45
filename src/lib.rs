use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{fs, io, path::{Path, PathBuf}};
pub mod config;
pub mod errors;
#[cfg(test)]
mod tests;
pub use errors::{
    fatal, raise, recover, restore, restore_and_panic, ApiError, EnvelopeConfig,
    ErrorEnvelope, SharedError, TimeZoneMode, UnexpectedFault, WrapErr,
};
pub const DEFAULT_LOG_LEVEL: &str = "warn";
const CONFIG_FILE: &str = "config.json";
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmetaConfig {
    pub log_level: String,
    #[serde(default)]
    pub envelope: EnvelopeConfig,
}
impl Default for VmetaConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            envelope: EnvelopeConfig::default(),
        }
    }
}
impl VmetaConfig {
    /// Reads the configuration at `path`; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let config_data = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {:?}", path))?;
        let config = serde_json::from_str(&config_data)
            .with_context(|| format!("invalid config file {:?}", path))?;
        Ok(config)
    }
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {:?}", parent))?;
        }
        let config_data = serde_json::to_string_pretty(self)?;
        fs::write(path, config_data)
            .with_context(|| format!("cannot write config file {:?}", path))?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }
}
pub fn get_default_home_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".vmeta")
    } else if let Ok(user) = std::env::var("USERPROFILE") {
        PathBuf::from(user).join(".vmeta")
    } else {
        PathBuf::from("/tmp/.vmeta")
    }
}
pub fn default_config_path() -> PathBuf {
    get_default_home_dir().join(CONFIG_FILE)
}
/// Builds a chain from `messages`, outermost first, optionally ending in a
/// plain error with the text `cause`.
pub fn build_chain<S: AsRef<str>>(messages: &[S], cause: Option<&str>) -> Option<ApiError> {
    let (innermost, outer) = messages.split_last()?;
    let mut chain = match cause {
        Some(text) => ApiError::wrap(innermost.as_ref().to_string(), io::Error::other(text.to_string())),
        None => ApiError::new(innermost.as_ref().to_string()),
    };
    for message in outer.iter().rev() {
        chain = ApiError::wrap(message.as_ref().to_string(), chain);
    }
    Some(chain)
}
/// Unwinds through one frame per entry of `frames` (outermost first). The
/// innermost frame fails with `leaf`; each frame labels the panic on the
/// way out and the outermost label is returned as an error.
pub fn propagate<S: AsRef<str>>(frames: &[S], leaf: &str) -> Result<(), ApiError> {
    fn descend<S: AsRef<str>>(frames: &[S], leaf: &str) {
        match frames.split_first() {
            Some((frame, rest)) => {
                restore_and_panic(frame.as_ref().to_string(), || descend(rest, leaf))
            }
            None => fatal(Some(io::Error::other(leaf.to_string()))),
        }
    }
    match frames.split_first() {
        Some((top, rest)) => recover(top.as_ref().to_string(), || descend(rest, leaf)),
        None => Err(ApiError::wrap("request failed", io::Error::other(leaf.to_string()))),
    }
}
