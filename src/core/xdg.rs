//! XDG Base Directory Support
//!
//! Implements XDG Base Directory specification for proper file
//! organization on Linux/Unix systems.

use std::env;
use std::fs;
use std::path::PathBuf;

/// XDG directory structure for Kashidex
///
/// Implements XDG Base Directory specification with fallbacks and
/// explicit environment overrides.
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit KASHIDEX_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.local/share, etc.)
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve("KASHIDEX_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            data_dir: Self::resolve("KASHIDEX_DATA_DIR", "XDG_DATA_HOME", &[".local", "share"]),
            state_dir: Self::resolve("KASHIDEX_STATE_DIR", "XDG_STATE_HOME", &[".local", "state"]),
        }
    }

    fn resolve(app_var: &str, xdg_var: &str, home_fallback: &[&str]) -> PathBuf {
        if let Ok(dir) = env::var(app_var) {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var(xdg_var) {
            return PathBuf::from(xdg).join("kashidex");
        }

        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        for segment in home_fallback {
            path = path.join(segment);
        }
        path.join("kashidex")
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Get the index storage root
    pub fn index_dir(&self) -> PathBuf {
        self.data_dir.join("index")
    }

    /// Get the corpus root
    pub fn corpus_dir(&self) -> PathBuf {
        self.data_dir.join("corpus")
    }

    /// Get logs directory path
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    /// Ensure the config and data directories exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(&self.state_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_explicit_env_override_wins() {
        env::set_var("KASHIDEX_CONFIG_DIR", "/tmp/kashidex-conf");

        let xdg = XdgDirs::new();
        assert_eq!(xdg.config_dir, PathBuf::from("/tmp/kashidex-conf"));
        assert_eq!(xdg.config_file(), PathBuf::from("/tmp/kashidex-conf/config.toml"));

        env::remove_var("KASHIDEX_CONFIG_DIR");
    }

    #[test]
    #[serial]
    fn test_xdg_env_gets_app_suffix() {
        env::remove_var("KASHIDEX_DATA_DIR");
        env::set_var("XDG_DATA_HOME", "/tmp/xdg-data");

        let xdg = XdgDirs::new();
        assert_eq!(xdg.data_dir, PathBuf::from("/tmp/xdg-data/kashidex"));
        assert_eq!(xdg.index_dir(), PathBuf::from("/tmp/xdg-data/kashidex/index"));
        assert_eq!(xdg.corpus_dir(), PathBuf::from("/tmp/xdg-data/kashidex/corpus"));

        env::remove_var("XDG_DATA_HOME");
    }

    #[test]
    #[serial]
    fn test_default_paths_end_with_app_name() {
        for var in [
            "KASHIDEX_CONFIG_DIR",
            "KASHIDEX_DATA_DIR",
            "KASHIDEX_STATE_DIR",
            "XDG_CONFIG_HOME",
            "XDG_DATA_HOME",
            "XDG_STATE_HOME",
        ] {
            env::remove_var(var);
        }

        let xdg = XdgDirs::new();
        assert!(xdg.config_dir.ends_with("kashidex"));
        assert!(xdg.data_dir.ends_with("kashidex"));
        assert!(xdg.logs_dir().ends_with("logs"));
    }
}
