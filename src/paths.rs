//! XDG-compliant path resolution for bel-keen.
//!
//! The data directory can be pinned with `KEEN_DATA`; otherwise it follows
//! the XDG Base Directory Specification like the config directory does.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENVVAR: &str = "KEEN_DATA";

const APP_DIR: &str = "bel-keen";

/// Global directories for bel-keen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeenPaths {
    /// `$XDG_CONFIG_HOME/bel-keen/`
    pub config_dir: PathBuf,
    /// `$KEEN_DATA`, or `$XDG_DATA_HOME/bel-keen/`
    pub data_dir: PathBuf,
}

impl KeenPaths {
    /// Resolve directories from the process environment.
    pub fn resolve() -> Result<Self, ConfigError> {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve directories from an arbitrary variable lookup.
    ///
    /// Lets callers resolve paths without mutating the process environment.
    pub fn resolve_with(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| env(key).filter(|v| !v.is_empty()).map(PathBuf::from);
        let home = var("HOME");
        let under_home = |rel: &str| home.as_ref().map(|h| h.join(rel)).ok_or(ConfigError::NoHome);

        let config_dir = match var("XDG_CONFIG_HOME") {
            Some(dir) => dir,
            None => under_home(".config")?,
        }
        .join(APP_DIR);

        let data_dir = match var(DATA_DIR_ENVVAR) {
            Some(dir) => dir,
            None => match var("XDG_DATA_HOME") {
                Some(dir) => dir,
                None => under_home(".local/share")?,
            }
            .join(APP_DIR),
        };

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Path to the global config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}
