//! Owning-module directory skeletons.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};

/// Result of a module creation request.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModuleOutcome {
    Created,
    AlreadyExists,
}

/// Creates the directory skeleton of a new owning module.
pub struct ModuleBootstrapper {
    source_root: PathBuf,
    subdirs: Vec<String>,
}

impl ModuleBootstrapper {
    pub fn new(source_root: impl Into<PathBuf>, subdirs: Vec<String>) -> Self {
        Self {
            source_root: source_root.into(),
            subdirs,
        }
    }

    pub fn module_path(&self, module: &str) -> PathBuf {
        self.source_root.join(module)
    }

    /// Create `<source_root>/<module>` and its subdirectories.
    ///
    /// An existing module is left untouched and reported as `AlreadyExists`.
    pub fn create(&self, module: &str) -> CoreResult<ModuleOutcome> {
        let module_path = self.module_path(module);

        if module_path.exists() {
            if !module_path.is_dir() {
                return Err(CoreError::NotADirectory(module_path));
            }
            warn!("Module already exists at {:?}, skipping", module_path);
            return Ok(ModuleOutcome::AlreadyExists);
        }

        create_dir(&module_path)?;
        for dir in &self.subdirs {
            create_dir(&module_path.join(dir))?;
        }

        info!("Module created at {:?}", module_path);
        Ok(ModuleOutcome::Created)
    }
}

fn create_dir(path: &Path) -> CoreResult<()> {
    fs::create_dir_all(path).map_err(|e| CoreError::file_io(path, e))
}
