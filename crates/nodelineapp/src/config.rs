//! # Configuration
//!
//! Nodeline configuration is managed by [`confique`], which layers values from
//! environment variables, a TOML file and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `NODELINE_DONE_MARKER`, `NODELINE_DEFAULT_TYPE`
//! 2. **Config file**: the path in `NODELINE_CONFIG`, else `nodeline.toml` in the
//!    OS-appropriate config directory (via `directories`). A missing file is skipped.
//! 3. **Compiled defaults**: `#[config(default = ...)]`
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `done_marker` | `true` | Write `@done` after completed items when saving |
//! | `default_type` | `txt` | File type used for paths without an extension |

use crate::error::{NodelineError, Result};
use crate::outline::RenderOptions;
use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "NODELINE_CONFIG";
pub const CONFIG_FILE: &str = "nodeline.toml";

#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NodelineConfig {
    /// Write the `@done` marker for completed items.
    #[config(env = "NODELINE_DONE_MARKER", default = true)]
    pub done_marker: bool,

    /// File type name for files without an extension.
    #[config(env = "NODELINE_DEFAULT_TYPE", default = "txt")]
    pub default_type: String,
}

impl Default for NodelineConfig {
    fn default() -> Self {
        Self {
            done_marker: true,
            default_type: "txt".to_string(),
        }
    }
}

impl NodelineConfig {
    /// Loads from the environment, then the config file, then defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path().as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| NodelineError::Config(e.to_string()))
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            done_marker: self.done_marker,
        }
    }
}

/// Config file location: `NODELINE_CONFIG` if set, else the per-user config dir.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("", "", "nodeline").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
