use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "speedy")
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("speedy_config.json"))
    }

    /// Where the log file goes. Follows `~/.local/state` when HOME is set.
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".local").join("state").join("speedy"))
        } else {
            ProjectDirs::from("", "", "speedy").map(|pd| pd.data_local_dir().to_path_buf())
        }
    }
}
