//! Conversion options and `.textblock.json` discovery.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::concat::ChainPolicy;
use crate::error::ConfigError;
use crate::indent::MarginPolicy;
use crate::to_block::FormatStyle;

/// File name searched for in the working directory and its parents.
pub const CONFIG_FILE_NAME: &str = ".textblock.json";

/// Options shared by both conversion directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConvertOptions {
    pub margin_policy: MarginPolicy,
    pub format_style: FormatStyle,
    pub chain_policy: ChainPolicy,
}

impl ConvertOptions {
    /// Parse options from JSON text. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the text is not a JSON object of known options.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

thread_local! {
    static CUSTOM_CONFIG_PATH: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// Set a custom config path for the current thread
pub fn set_custom_config_path(path: Option<PathBuf>) {
    CUSTOM_CONFIG_PATH.with(|p| {
        *p.borrow_mut() = path;
    });
}

/// Get the custom config path if set
fn get_custom_config_path() -> Option<PathBuf> {
    CUSTOM_CONFIG_PATH.with(|p| p.borrow().clone())
}

/// Get the user's home directory in a cross-platform way.
#[must_use]
pub fn get_home_dir() -> Option<PathBuf> {
    // Try HOME first (Unix-like systems)
    if let Some(home) = std::env::var_os("HOME") {
        return Some(PathBuf::from(home));
    }

    // Try USERPROFILE (Windows)
    if let Some(userprofile) = std::env::var_os("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }

    None
}

/// Find the config file to use.
///
/// A custom path always wins, even if it does not exist, so that loading it
/// reports the problem. A directory resolves to the config file inside it.
/// Otherwise search upwards from the current directory, stopping at the
/// home directory or the root, then fall back to `~/.textblock.json`.
#[must_use]
pub fn find_config_path() -> Option<PathBuf> {
    if let Some(custom_path) = get_custom_config_path() {
        if custom_path.is_dir() {
            return Some(custom_path.join(CONFIG_FILE_NAME));
        }
        return Some(custom_path);
    }

    let home_dir = get_home_dir();

    if let Ok(current_dir) = std::env::current_dir()
        && let Some(path) = search_upwards(&current_dir, home_dir.as_deref())
    {
        return Some(path);
    }

    home_dir
        .map(|home| home.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Walk from `start` towards the root looking for the config file.
/// The search stops after checking `boundary` (normally the home directory).
fn search_upwards(start: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
    let mut current_dir = start.to_path_buf();

    loop {
        let config_path = current_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if boundary.is_some_and(|home| current_dir == home) {
            return None;
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Load options from a specific file.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or does not contain valid options.
pub fn load_from_path(path: &Path) -> Result<ConvertOptions, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let options = ConvertOptions::from_json(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), ?options, "loaded config");
    Ok(options)
}

/// Load options from the discovered config file, or the defaults if there
/// is none.
///
/// # Errors
///
/// Returns `Err` if a config file was found but could not be loaded.
pub fn load_options() -> Result<ConvertOptions, ConfigError> {
    match find_config_path() {
        Some(path) => load_from_path(&path),
        None => Ok(ConvertOptions::default()),
    }
}
