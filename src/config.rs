//! Blog configuration
//!
//! Read from `/.mdblog/config.yaml` under the database root. The file is
//! optional and every key has a default:
//!
//! ```yaml
//! collection: posts
//! page_size: 10
//! search: literal
//! ```

use crate::error::{Error, Result};
use crate::query::SearchMode;
use crate::validation::validate_collection_name;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of posts per listing page
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory under `collections/` holding the posts
    pub collection: String,
    /// Window size for paged listings
    pub page_size: usize,
    /// How search keywords are matched against titles
    pub search: SearchMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection: "posts".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            search: SearchMode::default(),
        }
    }
}

impl Config {
    /// Location of the config file for a database root
    pub fn path(root: &Path) -> PathBuf {
        root.join(".mdblog").join("config.yaml")
    }

    /// Load the config for a database root, falling back to defaults
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| Error::FileReadError {
            path: path.clone(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| Error::ConfigError {
            path: path.clone(),
            message: e.to_string(),
        })?;
        config.validate(&path)?;

        Ok(config)
    }

    /// Write this config under a database root
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = Self::path(root);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| Error::FileWriteError {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = serde_yaml::to_string(self).map_err(|e| Error::YamlSerializeError {
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|source| Error::FileWriteError { path, source })
    }

    fn validate(&self, path: &Path) -> Result<()> {
        validate_collection_name(&self.collection)?;
        if self.page_size == 0 {
            return Err(Error::ConfigError {
                path: path.to_path_buf(),
                message: "page_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
