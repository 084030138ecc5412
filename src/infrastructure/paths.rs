//! Path utilities for the Zellij sandbox environment.
//!
//! In the plugin sandbox the host filesystem is mounted under `/host`. These
//! helpers place the plugin's files there and translate user-supplied paths.

use std::path::PathBuf;

/// Returns the data directory for zatlas files.
///
/// The directory is located at `/host/.local/share/zellij/zatlas` in the Zellij
/// sandbox. In Zellij's plugin environment, `/host` points to the cwd of the last
/// focused terminal, or the folder where Zellij was started if that's not available.
///
/// This typically resolves to the user's home directory, making the actual path
/// `~/.local/share/zellij/zatlas`.
///
/// # Examples
///
/// ```
/// use zatlas::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/zatlas");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zatlas")
}

/// The JSON file holding the session and the favorites-only hand-off flag.
#[must_use]
pub fn storage_file() -> PathBuf {
    get_data_dir().join("zatlas.json")
}

/// The OTLP JSON trace export file.
#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join("zatlas-otlp.json")
}

/// Expands tilde paths to use the `/host` prefix for Zellij sandbox.
///
/// In the Zellij sandbox environment, the host's home directory (`~`) maps to `/host`.
///
/// # Examples
///
/// ```
/// use zatlas::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/nord.toml"), "/host/themes/nord.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
