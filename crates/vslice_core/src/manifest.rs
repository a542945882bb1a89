//! Composition-root manifest editing.
//!
//! The manifest is hand-written text with four anchor lines. It is parsed
//! into a [`CompositionManifest`] that knows where each anchor sits, so
//! fragments are inserted directly above their anchor and anchor positions
//! stay correct as lines are added.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use vslice_templates::{AnchorSet, ImportOrder, RegistrationFragments, ResourceSpec, Section};

use crate::error::{CoreError, CoreResult};

/// Result of inserting one fragment.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FragmentOutcome {
    Inserted,
    AlreadyPresent,
}

/// Outcome for one fragment.
#[derive(Debug, Clone, Serialize)]
pub struct FragmentReport {
    pub section: Section,
    pub fragment: String,
    pub outcome: FragmentOutcome,
}

/// Outcome of injecting one resource into the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct InjectionReport {
    pub path: PathBuf,
    pub fragments: Vec<FragmentReport>,
    /// Whether the manifest file was rewritten.
    pub written: bool,
}

impl InjectionReport {
    pub fn inserted(&self) -> usize {
        self.fragments
            .iter()
            .filter(|f| f.outcome == FragmentOutcome::Inserted)
            .count()
    }
}

/// A parsed manifest.
#[derive(Debug, Clone)]
pub struct CompositionManifest {
    path: PathBuf,
    lines: Vec<String>,
    crlf: bool,
    anchors: BTreeMap<Section, usize>,
}

impl CompositionManifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path, anchors: &AnchorSet) -> CoreResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CoreError::ManifestNotFound(path.to_path_buf()))
            }
            Err(e) => return Err(CoreError::file_io(path, e)),
        };
        Self::parse(path, &content, anchors)
    }

    /// Parse manifest text. Every anchor must appear on exactly one line.
    pub fn parse(path: &Path, content: &str, anchors: &AnchorSet) -> CoreResult<Self> {
        let crlf = content.contains("\r\n");
        let lines: Vec<String> = content
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();

        let mut positions = BTreeMap::new();
        for section in Section::all() {
            let sentinel = anchors.sentinel(section);
            let hits: Vec<usize> = lines
                .iter()
                .enumerate()
                .filter(|(_, l)| l.contains(sentinel))
                .map(|(i, _)| i)
                .collect();

            match hits.as_slice() {
                [] => {
                    return Err(CoreError::AnchorNotFound {
                        anchor: sentinel.to_string(),
                        path: path.to_path_buf(),
                    })
                }
                [index] => {
                    debug!("Anchor '{}' at line {}", sentinel, index + 1);
                    positions.insert(section, *index);
                }
                many => {
                    return Err(CoreError::DuplicateAnchor {
                        anchor: sentinel.to_string(),
                        path: path.to_path_buf(),
                        count: many.len(),
                    })
                }
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            lines,
            crlf,
            anchors: positions,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Zero-based line index of a section's anchor.
    pub fn anchor_line(&self, section: Section) -> usize {
        self.anchors.get(&section).copied().unwrap_or(0)
    }

    /// Whether a line with exactly this trimmed text exists.
    pub fn contains(&self, fragment: &str) -> bool {
        let wanted = fragment.trim();
        self.lines.iter().any(|l| l.trim() == wanted)
    }

    /// Insert a fragment directly above its section anchor, unless present.
    pub fn insert(&mut self, section: Section, fragment: &str) -> FragmentOutcome {
        if self.contains(fragment) {
            return FragmentOutcome::AlreadyPresent;
        }

        let index = self.anchor_line(section);
        self.lines.insert(index, fragment.to_string());
        for position in self.anchors.values_mut() {
            if *position >= index {
                *position += 1;
            }
        }
        FragmentOutcome::Inserted
    }

    /// Lines of a section: everything after the previous anchor (in file
    /// order) up to, but excluding, this section's anchor.
    pub fn section_lines(&self, section: Section) -> &[String] {
        let end = self.anchor_line(section);
        let start = self
            .anchors
            .values()
            .filter(|&&p| p < end)
            .max()
            .map(|p| p + 1)
            .unwrap_or(0);
        &self.lines[start..end]
    }

    /// Serialize back to text, preserving the original line ending.
    pub fn render(&self) -> String {
        self.lines.join(if self.crlf { "\r\n" } else { "\n" })
    }

    /// Overwrite the manifest file.
    pub fn save(&self) -> CoreResult<()> {
        fs::write(&self.path, self.render()).map_err(|e| CoreError::file_io(&self.path, e))
    }
}

/// Summary of a manifest check.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestSummary {
    pub path: PathBuf,
    /// One-based anchor line per section.
    pub anchor_lines: BTreeMap<Section, usize>,
    /// Registration-looking lines per section (non-blank, not comments).
    pub entries: BTreeMap<Section, usize>,
}

/// Registers resources in the composition-root manifest.
pub struct ManifestInjector {
    anchors: AnchorSet,
    import_order: ImportOrder,
}

impl ManifestInjector {
    pub fn new(anchors: AnchorSet, import_order: ImportOrder) -> Self {
        Self {
            anchors,
            import_order,
        }
    }

    /// Parse the manifest without modifying it.
    pub fn check(&self, path: &Path) -> CoreResult<ManifestSummary> {
        let manifest = CompositionManifest::load(path, &self.anchors)?;

        let mut anchor_lines = BTreeMap::new();
        let mut entries = BTreeMap::new();
        for section in Section::all() {
            anchor_lines.insert(section, manifest.anchor_line(section) + 1);
            let count = manifest
                .section_lines(section)
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty() && !l.starts_with("//"))
                .filter(|l| match section {
                    Section::Imports => l.starts_with("import "),
                    _ => l.contains(": as"),
                })
                .count();
            entries.insert(section, count);
        }

        Ok(ManifestSummary {
            path: path.to_path_buf(),
            anchor_lines,
            entries,
        })
    }

    /// Registration lines of a resource. A line containing any anchor
    /// sentinel is refused: once written it would make that anchor ambiguous
    /// for every later run.
    pub fn fragments_for(&self, resource: &ResourceSpec) -> CoreResult<RegistrationFragments> {
        let fragments = RegistrationFragments::for_resource(resource);

        for (section, fragment) in fragments.ordered(self.import_order) {
            for anchor_section in Section::all() {
                let sentinel = self.anchors.sentinel(anchor_section);
                if fragment.contains(sentinel) {
                    return Err(CoreError::FragmentContainsAnchor {
                        anchor: sentinel.to_string(),
                        section: section.to_string(),
                        fragment: fragment.trim().to_string(),
                    });
                }
            }
        }

        Ok(fragments)
    }

    /// Check the manifest and the resource's fragments without writing.
    pub fn preflight(&self, path: &Path, resource: &ResourceSpec) -> CoreResult<ManifestSummary> {
        self.fragments_for(resource)?;
        self.check(path)
    }

    /// Insert every registration line of a resource.
    pub fn inject(&self, path: &Path, resource: &ResourceSpec) -> CoreResult<InjectionReport> {
        let fragments = self.fragments_for(resource)?;
        let mut manifest = CompositionManifest::load(path, &self.anchors)?;

        let reports: Vec<FragmentReport> = fragments
            .ordered(self.import_order)
            .into_iter()
            .map(|(section, fragment)| {
                let outcome = manifest.insert(section, fragment);
                if outcome == FragmentOutcome::Inserted {
                    debug!("Inserted into {} section: {}", section, fragment.trim());
                }
                FragmentReport {
                    section,
                    fragment: fragment.to_string(),
                    outcome,
                }
            })
            .collect();

        let written = reports.iter().any(|r| r.outcome == FragmentOutcome::Inserted);
        if written {
            manifest.save()?;
            info!("Registered {} in {:?}", resource.raw_name(), path);
        } else {
            debug!("{} already registered in {:?}", resource.raw_name(), path);
        }

        Ok(InjectionReport {
            path: path.to_path_buf(),
            fragments: reports,
            written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MANIFEST: &str = "import { asClass, asValue, createContainer } from 'awilix';
// imports-end

export const diContainer = createContainer();

diContainer.register({
    // models-end
    // services-end
    // controllers-end
});
";

    fn parse(content: &str) -> CoreResult<CompositionManifest> {
        CompositionManifest::parse(Path::new("di-container.ts"), content, &AnchorSet::default())
    }

    #[test]
    fn test_parse_locates_anchors() {
        let manifest = parse(MANIFEST).unwrap();
        assert_eq!(manifest.anchor_line(Section::Imports), 1);
        assert_eq!(manifest.anchor_line(Section::Models), 6);
        assert_eq!(manifest.anchor_line(Section::Controllers), 8);
        assert_eq!(manifest.render(), MANIFEST);
    }

    #[test]
    fn test_missing_anchor_is_fatal() {
        let err = parse(&MANIFEST.replace("// services-end\n", "")).unwrap_err();
        match err {
            CoreError::AnchorNotFound { anchor, .. } => assert_eq!(anchor, "services-end"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_anchor_is_fatal() {
        let content = MANIFEST.replace("// imports-end", "// imports-end\n// imports-end");
        let err = parse(&content).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateAnchor { count: 2, .. }));
    }

    #[test]
    fn test_insert_shifts_later_anchors() {
        let mut manifest = parse(MANIFEST).unwrap();
        let models_before = manifest.anchor_line(Section::Models);

        let outcome = manifest.insert(Section::Imports, "import { X } from 'x';");

        assert_eq!(outcome, FragmentOutcome::Inserted);
        assert_eq!(manifest.anchor_line(Section::Imports), 2);
        assert_eq!(manifest.anchor_line(Section::Models), models_before + 1);
        assert_eq!(
            manifest.section_lines(Section::Imports).last().unwrap(),
            "import { X } from 'x';"
        );
        assert_eq!(
            manifest.insert(Section::Imports, "import { X } from 'x';"),
            FragmentOutcome::AlreadyPresent
        );
    }

    #[test]
    fn test_crlf_is_preserved() {
        let content = MANIFEST.replace('\n', "\r\n");
        let mut manifest = parse(&content).unwrap();
        manifest.insert(Section::Models, "    xModel: asValue(XModel),");

        let rendered = manifest.render();
        assert!(rendered.contains("    xModel: asValue(XModel),\r\n    // models-end\r\n"));
        assert!(!rendered.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_inject_declared_order() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("di-container.ts");
        fs::write(&path, MANIFEST).unwrap();

        let injector = ManifestInjector::new(AnchorSet::default(), ImportOrder::Declared);
        let resource = ResourceSpec::new("Publisher", "books").unwrap();
        let report = injector.inject(&path, &resource).unwrap();

        assert!(report.written);
        assert_eq!(report.inserted(), 6);

        let content = fs::read_to_string(&path).unwrap();
        let model = content.find("import { PublisherModel }").unwrap();
        let service = content.find("import { PublisherServiceImpl }").unwrap();
        let controller = content.find("import { PublisherController }").unwrap();
        let anchor = content.find("// imports-end").unwrap();
        assert!(model < service && service < controller && controller < anchor);

        assert!(content.contains(
            "    publisherModel: asValue(PublisherModel),\n    // models-end"
        ));
        assert!(content.contains(
            "    publisherService: asClass(PublisherServiceImpl),\n    // services-end"
        ));
        assert!(content.contains(
            "    publisherController: asClass(PublisherController),\n    // controllers-end"
        ));
    }

    #[test]
    fn test_inject_reversed_order() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("di-container.ts");
        fs::write(&path, MANIFEST).unwrap();

        let injector = ManifestInjector::new(AnchorSet::default(), ImportOrder::Reversed);
        let resource = ResourceSpec::new("Candy", "candies").unwrap();
        injector.inject(&path, &resource).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let model = content.find("import { CandyModel }").unwrap();
        let controller = content.find("import { CandyController }").unwrap();
        assert!(controller < model);
    }

    #[test]
    fn test_inject_twice_changes_nothing() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("di-container.ts");
        fs::write(&path, MANIFEST).unwrap();

        let injector = ManifestInjector::new(AnchorSet::default(), ImportOrder::Declared);
        let resource = ResourceSpec::new("Publisher", "books").unwrap();
        injector.inject(&path, &resource).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        let report = injector.inject(&path, &resource).unwrap();

        assert!(!report.written);
        assert!(report
            .fragments
            .iter()
            .all(|f| f.outcome == FragmentOutcome::AlreadyPresent));
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_check_counts_entries() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("di-container.ts");
        fs::write(&path, MANIFEST).unwrap();

        let injector = ManifestInjector::new(AnchorSet::default(), ImportOrder::Declared);
        let summary = injector.check(&path).unwrap();
        assert_eq!(summary.entries[&Section::Imports], 1);
        assert_eq!(summary.entries[&Section::Models], 0);

        injector
            .inject(&path, &ResourceSpec::new("Candy", "candies").unwrap())
            .unwrap();
        let summary = injector.check(&path).unwrap();
        assert_eq!(summary.entries[&Section::Imports], 4);
        assert_eq!(summary.entries[&Section::Models], 1);
        assert_eq!(summary.entries[&Section::Services], 1);
        assert_eq!(summary.entries[&Section::Controllers], 1);
    }

    #[test]
    fn test_module_name_containing_anchor_is_refused() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("di-container.ts");
        fs::write(&path, MANIFEST).unwrap();

        let injector = ManifestInjector::new(AnchorSet::default(), ImportOrder::Declared);
        let resource = ResourceSpec::new("Publisher", "models-end").unwrap();

        let err = injector.inject(&path, &resource).unwrap_err();

        match &err {
            CoreError::FragmentContainsAnchor { anchor, section, .. } => {
                assert_eq!(anchor, "models-end");
                assert_eq!(section, "imports");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.is_manifest_precondition());
        assert_eq!(fs::read_to_string(&path).unwrap(), MANIFEST);
        assert!(injector.preflight(&path, &resource).is_err());
    }

    #[test]
    fn test_custom_anchor_matching_generated_text_is_refused() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("di-container.ts");
        let anchors = AnchorSet {
            controllers_end: "Controller".to_string(),
            ..AnchorSet::default()
        };
        fs::write(&path, MANIFEST.replace("controllers-end", "Controller")).unwrap();

        let injector = ManifestInjector::new(anchors, ImportOrder::Declared);
        assert!(injector.check(&path).is_ok());

        let resource = ResourceSpec::new("Candy", "candies").unwrap();
        let err = injector.preflight(&path, &resource).unwrap_err();
        assert!(matches!(err, CoreError::FragmentContainsAnchor { .. }));
    }

    #[test]
    fn test_missing_manifest() {
        let temp = tempdir().unwrap();
        let injector = ManifestInjector::new(AnchorSet::default(), ImportOrder::Declared);
        let err = injector.check(&temp.path().join("missing.ts")).unwrap_err();
        assert!(matches!(err, CoreError::ManifestNotFound(_)));
        assert!(err.is_manifest_precondition());
    }
}
