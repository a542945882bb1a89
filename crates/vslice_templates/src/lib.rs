//! # vslice_templates
//!
//! Naming, templates and configuration for vslice.
//!
//! This crate turns a resource name into the text of every artifact in a
//! vertical slice, without touching the filesystem:
//!
//! - Casing variants shared by all artifacts ([`NameForms`])
//! - Artifact kinds and their paths inside a module ([`ArtifactKind`], [`ModuleLayout`])
//! - Artifact bodies ([`TemplateRenderer`])
//! - Composition-root registration lines ([`RegistrationFragments`])
//! - Project configuration ([`ScaffoldConfig`])
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//! use vslice_templates::{ArtifactKind, ResourceSpec, TemplateRenderer};
//!
//! let resource = ResourceSpec::new("Publisher", "books").unwrap();
//! let renderer = TemplateRenderer::new();
//! let artifacts = renderer.describe(&resource, Path::new("src"), &ArtifactKind::all());
//!
//! assert_eq!(artifacts.len(), 7);
//! assert!(artifacts[0].rendered_content.contains("PublisherModel"));
//! ```

pub mod artifact;
pub mod config;
pub mod error;
pub mod fragments;
pub mod names;
pub mod renderer;
pub mod resource;

pub use artifact::{ArtifactDescriptor, ArtifactKind, ModuleLayout, BARREL_STEM, EXTENSION};
pub use config::{AnchorSet, ScaffoldConfig, CONFIG_FILES};
pub use error::{TemplateError, TemplateResult};
pub use fragments::{ImportOrder, RegistrationFragments, Section};
pub use names::NameForms;
pub use renderer::TemplateRenderer;
pub use resource::{validate_module_name, validate_resource_name, ResourceSpec};
