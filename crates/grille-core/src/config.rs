//! Configuration for grille
//!
//! Looked up in order: an explicit `--config` path, `grille.toml` in the
//! root directory, then `grille/config.toml` under the user config
//! directory. A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{GradeError, Result};
use crate::format::OutputFormat;

/// Config file name looked up in the root directory
pub const CONFIG_FILE_NAME: &str = "grille.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GrilleConfig {
    /// Rubric CSV file used instead of the built-in rubric
    #[serde(default)]
    pub rubric: Option<PathBuf>,

    /// Directory where exports are written when no output path is given
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Output format used when `--format` is not given
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}

impl GrilleConfig {
    /// Load configuration from a file.
    ///
    /// Relative paths inside the file resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GradeError::io_operation("read config", path.display(), e))?;
        let mut config: GrilleConfig = toml::from_str(&content)?;

        if let Some(base) = path.parent() {
            config.rubric = config.rubric.map(|p| resolve_relative(base, p));
            config.output_dir = config.output_dir.map(|p| resolve_relative(base, p));
        }

        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Find and load the configuration for a root directory.
    ///
    /// An explicit path must exist; implicit locations are optional.
    pub fn discover(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        for candidate in candidate_paths(root) {
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }

        debug!(root = %root.display(), "no config file, using defaults");
        Ok(Self::default())
    }
}

fn candidate_paths(root: &Path) -> Vec<PathBuf> {
    let mut paths = vec![root.join(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("grille").join("config.toml"));
    }
    paths
}

fn resolve_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
