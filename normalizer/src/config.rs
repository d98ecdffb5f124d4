//! Project root validation and results-file location
//!
//! Results live under a project-scoped data directory. Projects set up for
//! Codex (`.codex/config.toml` present) use the Codex layout; everything else
//! uses the Claude layout.

use crate::error::{GuardError, GuardResult};
use std::path::{Path, PathBuf};

pub const CLAUDE_DATA_DIR: &str = ".claude/tdd-guard/data";
pub const CODEX_DATA_DIR: &str = ".codex/tdd-guard/data";
pub const CODEX_CONFIG_FILE: &str = ".codex/config.toml";
pub const TEST_RESULTS_FILENAME: &str = "test.json";

/// Validated, canonical project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    /// Require an absolute, existing path and canonicalize it.
    pub fn validate(path: impl AsRef<Path>) -> GuardResult<Self> {
        let path = path.as_ref();
        if !path.is_absolute() {
            return Err(GuardError::ProjectRootNotAbsolute {
                path: path.to_path_buf(),
            });
        }
        if !path.exists() {
            return Err(GuardError::ProjectRootNotFound {
                path: path.to_path_buf(),
            });
        }
        let canonical = path
            .canonicalize()
            .map_err(|e| GuardError::io("canonicalize", path, e))?;
        Ok(Self(canonical))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

/// Which agent's directory layout the results go into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLayout {
    Claude,
    Codex,
}

impl DataLayout {
    /// Codex when the project carries a Codex config file.
    pub fn detect(root: &Path) -> Self {
        if root.join(CODEX_CONFIG_FILE).is_file() {
            Self::Codex
        } else {
            Self::Claude
        }
    }

    fn relative_dir(&self) -> &'static str {
        match self {
            Self::Claude => CLAUDE_DATA_DIR,
            Self::Codex => CODEX_DATA_DIR,
        }
    }
}

/// Where the reporter writes its results
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    pub project_root: PathBuf,
    pub layout: DataLayout,
    pub data_dir: PathBuf,
}

impl ReporterConfig {
    pub fn for_project(root: &ProjectRoot) -> Self {
        let project_root = root.as_path().to_path_buf();
        let layout = DataLayout::detect(&project_root);
        let data_dir = project_root.join(layout.relative_dir());
        Self {
            project_root,
            layout,
            data_dir,
        }
    }

    pub fn results_path(&self) -> PathBuf {
        self.data_dir.join(TEST_RESULTS_FILENAME)
    }
}
