//! # vslice_core
//!
//! File-system side of vslice: writes the artifacts rendered by
//! `vslice_templates` and merges registrations into shared files.
//!
//! # Architecture
//!
//! - **Writer**: create-only artifact files
//! - **Barrels**: per-directory `index.ts` re-exports, one line per artifact
//! - **Manifest**: composition-root registrations inserted above anchor lines
//! - **Modules**: directory skeletons for new owning modules
//! - **Engine**: runs the steps above for one resource
//!
//! All writes are sequential and unlocked; concurrent runs against the same
//! project are not supported.
//!
//! # Example
//!
//! ```rust,no_run
//! use vslice_core::{ScaffoldRequest, Scaffolder};
//! use vslice_templates::{ResourceSpec, ScaffoldConfig};
//!
//! let scaffolder = Scaffolder::new(ScaffoldConfig::default(), ".");
//! let resource = ResourceSpec::new("Publisher", "books")?;
//! let report = scaffolder.run(&ScaffoldRequest::new(resource))?;
//! assert!(!report.halted);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod barrel;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod module;
pub mod writer;

pub use barrel::{BarrelMerger, ExportReport, MergeOutcome};
pub use engine::{ArtifactReport, ScaffoldReport, ScaffoldRequest, Scaffolder};
pub use error::{CoreError, CoreResult};
pub use manifest::{
    CompositionManifest, FragmentOutcome, FragmentReport, InjectionReport, ManifestInjector,
    ManifestSummary,
};
pub use module::{ModuleBootstrapper, ModuleOutcome};
pub use writer::{FileWriter, WriteOutcome};
