//! Scaffold orchestration.
//!
//! One [`Scaffolder::run`] call scaffolds one resource, step by step:
//! optional module creation, manifest preflight, artifact writes, barrel
//! merges and finally manifest injection. Every step is idempotent, so a
//! failed run is recovered by running it again.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use vslice_templates::{
    ArtifactDescriptor, ArtifactKind, ResourceSpec, ScaffoldConfig, TemplateRenderer,
};

use crate::barrel::{BarrelMerger, ExportReport, MergeOutcome};
use crate::error::CoreResult;
use crate::manifest::{FragmentOutcome, InjectionReport, ManifestInjector};
use crate::module::{ModuleBootstrapper, ModuleOutcome};
use crate::writer::{FileWriter, WriteOutcome};

/// What to scaffold.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub resource: ResourceSpec,
    /// Create the owning module skeleton first.
    pub create_module: bool,
    /// Only generate the data model (no DTOs, services, controller, routes
    /// or manifest registration).
    pub model_only: bool,
}

impl ScaffoldRequest {
    pub fn new(resource: ResourceSpec) -> Self {
        Self {
            resource,
            create_module: false,
            model_only: false,
        }
    }

    pub fn create_module(mut self, create_module: bool) -> Self {
        self.create_module = create_module;
        self
    }

    pub fn model_only(mut self, model_only: bool) -> Self {
        self.model_only = model_only;
        self
    }

    /// Artifact kinds this request generates, in generation order.
    pub fn kinds(&self) -> Vec<ArtifactKind> {
        if self.model_only {
            vec![ArtifactKind::Model]
        } else {
            ArtifactKind::all()
        }
    }
}

/// Outcome for one generated artifact.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactReport {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Record of one scaffold run.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    pub resource: String,
    pub module: String,
    pub module_outcome: Option<ModuleOutcome>,
    pub artifacts: Vec<ArtifactReport>,
    pub exports: Vec<ExportReport>,
    pub manifest: Option<InjectionReport>,
    /// The run stopped after module creation found an existing module.
    pub halted: bool,
}

impl ScaffoldReport {
    fn new(request: &ScaffoldRequest) -> Self {
        Self {
            resource: request.resource.raw_name().to_string(),
            module: request.resource.owner_module().to_string(),
            module_outcome: None,
            artifacts: Vec::new(),
            exports: Vec::new(),
            manifest: None,
            halted: false,
        }
    }

    /// True when the run changed nothing on disk.
    pub fn is_noop(&self) -> bool {
        self.module_outcome != Some(ModuleOutcome::Created)
            && self
                .artifacts
                .iter()
                .all(|a| a.outcome == WriteOutcome::SkippedExisting)
            && self
                .exports
                .iter()
                .all(|e| e.outcome == MergeOutcome::AlreadyPresent)
            && self.manifest.as_ref().map_or(true, |m| {
                m.fragments
                    .iter()
                    .all(|f| f.outcome == FragmentOutcome::AlreadyPresent)
            })
    }

    pub fn created_artifacts(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| a.outcome == WriteOutcome::Created)
            .count()
    }
}

/// Scaffolds resources into one project.
pub struct Scaffolder {
    config: ScaffoldConfig,
    project_root: PathBuf,
    renderer: TemplateRenderer,
}

impl Scaffolder {
    pub fn new(config: ScaffoldConfig, project_root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            project_root: project_root.into(),
            renderer: TemplateRenderer::new(),
        }
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn source_root(&self) -> PathBuf {
        self.config.source_root_in(&self.project_root)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.config.manifest_in(&self.project_root)
    }

    pub fn bootstrapper(&self) -> ModuleBootstrapper {
        ModuleBootstrapper::new(self.source_root(), self.config.module_dirs.clone())
    }

    pub fn injector(&self) -> ManifestInjector {
        ManifestInjector::new(self.config.anchors.clone(), self.config.import_order)
    }

    /// Scaffold one resource.
    pub fn run(&self, request: &ScaffoldRequest) -> CoreResult<ScaffoldReport> {
        let resource = &request.resource;
        let mut report = ScaffoldReport::new(request);
        info!(
            "Scaffolding {} in module {}",
            resource.raw_name(),
            resource.owner_module()
        );

        if request.create_module {
            let outcome = self.bootstrapper().create(resource.owner_module())?;
            report.module_outcome = Some(outcome);
            if outcome == ModuleOutcome::AlreadyExists {
                report.halted = true;
                return Ok(report);
            }
        }

        // Anchor problems abort the run before any artifact is written.
        let injector = self.injector();
        if !request.model_only {
            injector.preflight(&self.manifest_path(), resource)?;
        }

        let descriptors = self
            .renderer
            .describe(resource, &self.source_root(), &request.kinds());

        for descriptor in &descriptors {
            let outcome =
                FileWriter::write_if_absent(&descriptor.target_path, &descriptor.rendered_content)?;
            report.artifacts.push(ArtifactReport {
                kind: descriptor.kind,
                path: descriptor.target_path.clone(),
                outcome,
            });
        }

        for (barrel, lines) in barrel_batches(&descriptors) {
            debug!("Merging {} export(s) into {:?}", lines.len(), barrel);
            report
                .exports
                .extend(BarrelMerger::ensure_exports(&barrel, &lines)?);
        }

        if !request.model_only {
            report.manifest = Some(injector.inject(&self.manifest_path(), resource)?);
        }

        Ok(report)
    }
}

/// Group export lines by barrel, preserving first-seen order.
fn barrel_batches(descriptors: &[ArtifactDescriptor]) -> Vec<(PathBuf, Vec<String>)> {
    let mut batches: Vec<(PathBuf, Vec<String>)> = Vec::new();

    for descriptor in descriptors {
        let barrel = descriptor.barrel_path();
        match batches.iter_mut().find(|(path, _)| *path == barrel) {
            Some((_, lines)) => lines.push(descriptor.export_line.clone()),
            None => batches.push((barrel, vec![descriptor.export_line.clone()])),
        }
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kinds() {
        let resource = ResourceSpec::new("Publisher", "books").unwrap();
        assert_eq!(ScaffoldRequest::new(resource.clone()).kinds().len(), 7);
        assert_eq!(
            ScaffoldRequest::new(resource).model_only(true).kinds(),
            vec![ArtifactKind::Model]
        );
    }

    #[test]
    fn test_barrel_batches_group_by_directory() {
        let resource = ResourceSpec::new("Publisher", "books").unwrap();
        let descriptors =
            TemplateRenderer::new().describe(&resource, Path::new("src"), &ArtifactKind::all());

        let batches = barrel_batches(&descriptors);

        assert_eq!(batches.len(), 5);
        assert_eq!(batches[1].0, PathBuf::from("src/books/dtos/index.ts"));
        assert_eq!(
            batches[1].1,
            vec![
                "export * from './create-publisher.dto';".to_string(),
                "export * from './update-publisher.dto';".to_string(),
            ]
        );
        assert_eq!(batches[2].1.len(), 2);
    }
}
