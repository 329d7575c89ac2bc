//! Runtime configuration, persisted as TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::DEFAULT_SAMPLE_LIMIT;
use crate::error::ConfigError;
use crate::paths::KeenPaths;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// bel-keen configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeenConfig {
    /// Where graph snapshots, TSVs and summaries are cached.
    pub data_dir: PathBuf,
    /// Extension of KEEN TSV files, without the leading dot.
    #[serde(default = "default_keen_tsv_ext")]
    pub keen_tsv_ext: String,
    /// How many unhandled edges to keep as samples per conversion.
    #[serde(default = "default_sample_limit")]
    pub unhandled_sample_limit: usize,
    /// Classify edges on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

fn default_keen_tsv_ext() -> String {
    "keen.tsv".into()
}
fn default_sample_limit() -> usize {
    DEFAULT_SAMPLE_LIMIT
}

impl KeenConfig {
    /// Defaults rooted at the given data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            keen_tsv_ext: default_keen_tsv_ext(),
            unhandled_sample_limit: default_sample_limit(),
            parallel: false,
        }
    }

    /// Load from the global config file if it exists, otherwise defaults.
    ///
    /// `KEEN_DATA` always wins over the configured data directory.
    pub fn resolve(paths: &KeenPaths) -> ConfigResult<Self> {
        let file = paths.config_file();
        let mut config = if file.is_file() {
            Self::load(&file)?
        } else {
            Self::with_data_dir(&paths.data_dir)
        };
        if let Some(dir) = std::env::var_os(crate::paths::DATA_DIR_ENVVAR).filter(|d| !d.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// `{data_dir}/{name}.{keen_tsv_ext}`
    pub fn keen_tsv_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.{}", self.keen_tsv_ext))
    }

    /// `{data_dir}/{name}.keen.summary.json`
    pub fn summary_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.keen.summary.json"))
    }

    /// `{data_dir}/{name}.bel.json`
    pub fn graph_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.bel.json"))
    }
}
