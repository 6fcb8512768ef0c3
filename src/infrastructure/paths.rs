//! Path helpers for configuration, theme and log files.

use std::env;
use std::path::PathBuf;

/// Application directory name under the platform config and data roots.
const APP_DIR: &str = "videotheque";

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Directory holding `config.toml` and custom themes.
///
/// `$XDG_CONFIG_HOME/videotheque`, else `~/.config/videotheque`, else a
/// relative `videotheque` directory.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|h| h.join(".config")))
        .map_or_else(|| PathBuf::from(APP_DIR), |root| root.join(APP_DIR))
}

/// Directory holding log files.
///
/// `$XDG_DATA_HOME/videotheque`, else `~/.local/share/videotheque`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    env::var_os("XDG_DATA_HOME")
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|h| h.join(".local").join("share")))
        .map_or_else(|| PathBuf::from(APP_DIR), |root| root.join(APP_DIR))
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a tilde, and every path when `HOME` is unset, are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use videotheque::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert_eq!(expand_tilde("relative/~"), "relative/~");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = home_dir() else {
        return path.to_string();
    };
    if path == "~" {
        home.to_string_lossy().into_owned()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest).to_string_lossy().into_owned()
    } else {
        path.to_string()
    }
}
