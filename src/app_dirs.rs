//! Where Dockshift keeps its files.
//!
//! Everything lives below one `.dockshift` folder: the optional
//! `dockshift.toml` and a `logs/` folder. The base is the OS config directory
//! unless `DOCKSHIFT_CONFIG_HOME` points elsewhere.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory below the base.
pub const APP_DIR_NAME: &str = ".dockshift";

/// Environment variable overriding the base directory.
pub const CONFIG_HOME_ENV: &str = "DOCKSHIFT_CONFIG_HOME";

const LOGS_DIR_NAME: &str = "logs";

/// Failures while locating or creating the application directory.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// Neither the override nor the OS lookup produced a base directory.
    #[error("No config directory available; set DOCKSHIFT_CONFIG_HOME to choose one")]
    NoBaseDir,
    /// A directory could not be created.
    #[error("Failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolved application directory layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
}

impl AppDirs {
    /// Resolve the layout from the environment and create the root folder.
    pub fn resolve() -> Result<Self, AppDirError> {
        let base = std::env::var_os(CONFIG_HOME_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
            .ok_or(AppDirError::NoBaseDir)?;
        Self::under(&base)
    }

    /// Layout rooted below `base`, creating the root folder.
    pub fn under(base: &Path) -> Result<Self, AppDirError> {
        let root = base.join(APP_DIR_NAME);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file directly inside the root; the file may not exist.
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Log folder, created on demand.
    pub fn logs(&self) -> Result<PathBuf, AppDirError> {
        let path = self.root.join(LOGS_DIR_NAME);
        ensure_dir(&path)?;
        Ok(path)
    }
}

fn ensure_dir(path: &Path) -> Result<(), AppDirError> {
    std::fs::create_dir_all(path).map_err(|source| AppDirError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn layout_is_created_below_base() {
        let base = tempdir().unwrap();
        let dirs = AppDirs::under(base.path()).unwrap();

        assert_eq!(dirs.root(), base.path().join(APP_DIR_NAME));
        assert!(dirs.root().is_dir());
        assert_eq!(dirs.file("x.toml"), dirs.root().join("x.toml"));

        let logs = dirs.logs().unwrap();
        assert_eq!(logs, dirs.root().join("logs"));
        assert!(logs.is_dir());
    }

    #[test]
    fn base_that_is_a_file_is_reported() {
        let base = tempdir().unwrap();
        let blocker = base.path().join("blocked");
        std::fs::write(&blocker, "").unwrap();

        let err = AppDirs::under(&blocker).unwrap_err();

        assert!(matches!(err, AppDirError::CreateDir { ref path, .. } if path.starts_with(&blocker)));
    }
}
