//! Where routedefs keeps its log and its config file.

use std::ffi::OsString;
use std::path::PathBuf;

/// Debug log written when `DEBUG` is set, in the OS temp directory.
#[must_use]
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("routedefs.log")
}

/// Base directory for per-user configuration, or `None` if no home is known.
///
/// The config file itself lives at `<config_dir>/routedefs/config.json`.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    config_dir_from(&std::env::var_os::<&'static str>)
}

/// Reads `key` through `lookup`, treating an empty value as unset.
fn env_path(
    lookup: &impl Fn(&'static str) -> Option<OsString>,
    key: &'static str,
) -> Option<PathBuf> {
    lookup(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(windows)]
fn config_dir_from(lookup: &impl Fn(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    if let Some(app_data) = env_path(lookup, "APPDATA") {
        return Some(app_data);
    }

    let profile = env_path(lookup, "USERPROFILE").or_else(|| {
        let drive = env_path(lookup, "HOMEDRIVE")?;
        let rest = env_path(lookup, "HOMEPATH")?;
        Some(drive.join(rest))
    });
    profile.map(|home| home.join("AppData").join("Roaming"))
}

#[cfg(target_os = "macos")]
fn config_dir_from(lookup: &impl Fn(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    env_path(lookup, "XDG_CONFIG_HOME").or_else(|| {
        env_path(lookup, "HOME").map(|home| home.join("Library").join("Application Support"))
    })
}

#[cfg(not(any(windows, target_os = "macos")))]
fn config_dir_from(lookup: &impl Fn(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    env_path(lookup, "XDG_CONFIG_HOME")
        .or_else(|| env_path(lookup, "HOME").map(|home| home.join(".config")))
}
