//! Artifact kinds and where they live inside a module.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::names::NameForms;

/// File extension of every generated artifact and barrel.
pub const EXTENSION: &str = "ts";

/// Barrel file name (without extension).
pub const BARREL_STEM: &str = "index";

/// One kind of generated file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Model,
    CreateDto,
    UpdateDto,
    ServiceInterface,
    ServiceImpl,
    Controller,
    Routes,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::CreateDto => "create-dto",
            ArtifactKind::UpdateDto => "update-dto",
            ArtifactKind::ServiceInterface => "service-interface",
            ArtifactKind::ServiceImpl => "service-impl",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Routes => "routes",
        }
    }

    /// Every kind in generation order. `CreateDto` precedes `UpdateDto`
    /// because the update schema imports the create schema.
    pub fn all() -> Vec<Self> {
        vec![
            ArtifactKind::Model,
            ArtifactKind::CreateDto,
            ArtifactKind::UpdateDto,
            ArtifactKind::ServiceInterface,
            ArtifactKind::ServiceImpl,
            ArtifactKind::Controller,
            ArtifactKind::Routes,
        ]
    }

    /// Module subdirectory holding this kind.
    pub fn directory(&self) -> &'static str {
        match self {
            ArtifactKind::Model => "models",
            ArtifactKind::CreateDto | ArtifactKind::UpdateDto => "dtos",
            ArtifactKind::ServiceInterface | ArtifactKind::ServiceImpl => "services",
            ArtifactKind::Controller => "controllers",
            ArtifactKind::Routes => "routes",
        }
    }

    /// File name without extension, e.g. `create-publisher.dto`.
    pub fn file_stem(&self, forms: &NameForms) -> String {
        let k = &forms.kebab;
        match self {
            ArtifactKind::Model => format!("{k}.model"),
            ArtifactKind::CreateDto => format!("create-{k}.dto"),
            ArtifactKind::UpdateDto => format!("update-{k}.dto"),
            ArtifactKind::ServiceInterface => format!("{k}.service"),
            ArtifactKind::ServiceImpl => format!("{k}.service.impl"),
            ArtifactKind::Controller => format!("{k}.controller"),
            ArtifactKind::Routes => format!("{k}.routes"),
        }
    }

    /// Re-export line the directory barrel carries for this artifact.
    pub fn export_line(&self, forms: &NameForms) -> String {
        format!("export * from './{}';", self.file_stem(forms))
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Paths of one owning module under the project's source root.
#[derive(Debug, Clone)]
pub struct ModuleLayout {
    root: PathBuf,
}

impl ModuleLayout {
    pub fn new(source_root: impl AsRef<Path>, module: &str) -> Self {
        Self {
            root: source_root.as_ref().join(module),
        }
    }

    /// The module directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn directory(&self, kind: ArtifactKind) -> PathBuf {
        self.root.join(kind.directory())
    }

    pub fn artifact_path(&self, kind: ArtifactKind, forms: &NameForms) -> PathBuf {
        self.directory(kind)
            .join(format!("{}.{}", kind.file_stem(forms), EXTENSION))
    }

    pub fn barrel_path(&self, kind: ArtifactKind) -> PathBuf {
        self.directory(kind)
            .join(format!("{}.{}", BARREL_STEM, EXTENSION))
    }
}

/// A rendered artifact ready to be written.
#[derive(Debug, Clone)]
pub struct ArtifactDescriptor {
    pub kind: ArtifactKind,
    pub target_path: PathBuf,
    pub rendered_content: String,
    pub barrel_directory: PathBuf,
    pub export_line: String,
}

impl ArtifactDescriptor {
    /// Path of the barrel that must re-export this artifact.
    pub fn barrel_path(&self) -> PathBuf {
        self.barrel_directory
            .join(format!("{}.{}", BARREL_STEM, EXTENSION))
    }
}
