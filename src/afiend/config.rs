use crate::error::{AfiendError, Result};
use directories::BaseDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the data directory (normally `~/.a-fiend`).
pub const HOME_ENV: &str = "AFIEND_HOME";

const DIR_NAME: &str = ".a-fiend";
const DB_FILENAME: &str = "alias.db";
const SOURCE_FILENAME: &str = "source.sh";

/// Where a-fiend keeps its store and the generated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AfiendPaths {
    pub root: PathBuf,
}

impl AfiendPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_home(home: &Path) -> Self {
        Self::new(home.join(DIR_NAME))
    }

    /// `$AFIEND_HOME` if set, otherwise `~/.a-fiend`.
    pub fn resolve() -> Result<Self> {
        if let Some(dir) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(dir));
        }
        let dirs = BaseDirs::new()
            .ok_or_else(|| AfiendError::Environment("Could not determine home directory".into()))?;
        Ok(Self::from_home(dirs.home_dir()))
    }

    pub fn db_file(&self) -> PathBuf {
        self.root.join(DB_FILENAME)
    }

    pub fn source_file(&self) -> PathBuf {
        self.root.join(SOURCE_FILENAME)
    }

    /// Create the data directory (owner and group only) if it is missing.
    pub fn ensure_root(&self) -> Result<()> {
        if self.root.is_dir() {
            return Ok(());
        }
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o770);
        }
        builder
            .create(&self.root)
            .map_err(|source| AfiendError::File {
                path: self.root.clone(),
                source,
            })
    }
}
