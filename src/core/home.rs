//! Household discovery and structure
//!
//! A household is any directory containing a `.larder/` marker directory,
//! which owns the SQLite store and the trigger preference file. Commands
//! discover the household by walking up from the working directory, or
//! accept an explicit root via `--home` / `LARDER_HOME`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the marker directory at the household root.
const LARDER_DIR: &str = ".larder";

/// File name of the SQLite store inside `.larder/`.
const STORE_FILE: &str = "larder.db";

/// File name of the trigger preference file inside `.larder/`.
const PREFS_FILE: &str = "prefs.yaml";

/// Represents an initialized household
#[derive(Debug)]
pub struct Home {
    /// Root directory of the household (parent of .larder/)
    root: PathBuf,
}

impl Home {
    /// Find the household root by walking up from the current directory
    pub fn discover() -> Result<Self, HomeError> {
        let current =
            std::env::current_dir().map_err(|e| HomeError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the household root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, HomeError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| HomeError::IoError(e.to_string()))?;

        loop {
            let larder_dir = current.join(LARDER_DIR);
            if larder_dir.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(HomeError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Resolve the household for a command: explicit root if given
    /// (`--home` or `LARDER_HOME`), otherwise walk up from the cwd.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, HomeError> {
        match explicit {
            Some(root) => {
                if root.join(LARDER_DIR).is_dir() {
                    let root = root
                        .canonicalize()
                        .map_err(|e| HomeError::IoError(e.to_string()))?;
                    Ok(Self { root })
                } else {
                    Err(HomeError::NotFound {
                        searched_from: root.to_path_buf(),
                    })
                }
            }
            None => Self::discover(),
        }
    }

    /// Create a new household structure at the given path
    pub fn init(path: &Path) -> Result<Self, HomeError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let larder_dir = root.join(LARDER_DIR);
        if larder_dir.exists() {
            return Err(HomeError::AlreadyExists(root.clone()));
        }

        std::fs::create_dir_all(&larder_dir)
            .map_err(|e| HomeError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    /// The household root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.larder/` directory
    pub fn larder_dir(&self) -> PathBuf {
        self.root.join(LARDER_DIR)
    }

    /// Path of the SQLite store
    pub fn store_path(&self) -> PathBuf {
        self.larder_dir().join(STORE_FILE)
    }

    /// Path of the trigger preference file
    pub fn prefs_path(&self) -> PathBuf {
        self.larder_dir().join(PREFS_FILE)
    }
}

#[derive(Debug, Error)]
pub enum HomeError {
    #[error("no household found searching up from {}\nRun `larder init` to create one.", searched_from.display())]
    NotFound { searched_from: PathBuf },

    #[error("household already initialized at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("io error: {0}")]
    IoError(String),
}
