//! Project configuration (`vslice.yaml`).
//!
//! Every field is optional; a project without a configuration file gets the
//! layout the generated code expects (`src/<module>/...` and the container
//! manifest under `src/shared/infrastructure/config`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TemplateError, TemplateResult};
use crate::fragments::{ImportOrder, Section};

/// Configuration file names probed in the project root, in order.
pub const CONFIG_FILES: [&str; 2] = ["vslice.yaml", "vslice.yml"];

/// Anchor sentinels marking the end of each manifest section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AnchorSet {
    #[serde(default = "default_imports_end")]
    pub imports_end: String,
    #[serde(default = "default_models_end")]
    pub models_end: String,
    #[serde(default = "default_services_end")]
    pub services_end: String,
    #[serde(default = "default_controllers_end")]
    pub controllers_end: String,
}

fn default_imports_end() -> String {
    "imports-end".to_string()
}

fn default_models_end() -> String {
    "models-end".to_string()
}

fn default_services_end() -> String {
    "services-end".to_string()
}

fn default_controllers_end() -> String {
    "controllers-end".to_string()
}

impl Default for AnchorSet {
    fn default() -> Self {
        Self {
            imports_end: default_imports_end(),
            models_end: default_models_end(),
            services_end: default_services_end(),
            controllers_end: default_controllers_end(),
        }
    }
}

impl AnchorSet {
    /// Sentinel closing the given section.
    pub fn sentinel(&self, section: Section) -> &str {
        match section {
            Section::Imports => &self.imports_end,
            Section::Models => &self.models_end,
            Section::Services => &self.services_end,
            Section::Controllers => &self.controllers_end,
        }
    }

    /// Problems that would make anchor lookup ambiguous.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for section in Section::all() {
            if self.sentinel(section).trim().is_empty() {
                errors.push(format!("Anchor for section '{}' must not be empty", section));
            }
        }

        for a in Section::all() {
            for b in Section::all() {
                if a == b {
                    continue;
                }
                let (sa, sb) = (self.sentinel(a), self.sentinel(b));
                if !sa.trim().is_empty() && !sb.trim().is_empty() && sb.contains(sa) {
                    errors.push(format!(
                        "Anchor '{}' ({}) overlaps anchor '{}' ({})",
                        sa, a, sb, b
                    ));
                }
            }
        }

        errors
    }
}

fn default_source_root() -> PathBuf {
    PathBuf::from("src")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("src/shared/infrastructure/config/di-container.ts")
}

fn default_module_dirs() -> Vec<String> {
    ["controllers", "dtos", "models", "routes", "services", "shared"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}

/// Scaffolding configuration for one project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// Directory holding the owning modules, relative to the project root.
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,
    /// Composition-root manifest, relative to the project root.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
    /// Ordering of import lines inserted into the manifest.
    #[serde(default)]
    pub import_order: ImportOrder,
    /// Section anchor sentinels.
    #[serde(default)]
    pub anchors: AnchorSet,
    /// Subdirectories created for a new module.
    #[serde(default = "default_module_dirs")]
    pub module_dirs: Vec<String>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            manifest: default_manifest(),
            import_order: ImportOrder::default(),
            anchors: AnchorSet::default(),
            module_dirs: default_module_dirs(),
        }
    }
}

impl ScaffoldConfig {
    /// Load the configuration for a project root, falling back to defaults
    /// when no configuration file exists.
    pub fn discover(project_root: &Path) -> TemplateResult<Self> {
        for name in CONFIG_FILES {
            let path = project_root.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }

        debug!("No configuration file in {:?}, using defaults", project_root);
        Ok(Self::default())
    }

    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> TemplateResult<Self> {
        if !path.exists() {
            return Err(TemplateError::ConfigNotFound(path.to_path_buf()));
        }

        debug!("Loading configuration from {:?}", path);
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;

        let errors = config.validate();
        if !errors.is_empty() {
            return Err(TemplateError::InvalidConfig {
                path: path.to_path_buf(),
                message: errors.join("; "),
            });
        }

        Ok(config)
    }

    /// Parse configuration from YAML. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> TemplateResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.anchors.validate();

        if self.source_root.as_os_str().is_empty() {
            errors.push("source_root must not be empty".to_string());
        }
        if self.manifest.as_os_str().is_empty() {
            errors.push("manifest must not be empty".to_string());
        }

        errors
    }

    /// Absolute source root for a project.
    pub fn source_root_in(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.source_root)
    }

    /// Absolute manifest path for a project.
    pub fn manifest_in(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.manifest)
    }
}
