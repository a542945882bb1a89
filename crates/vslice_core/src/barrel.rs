//! Directory barrel (`index.ts`) maintenance.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};

/// Result of ensuring one export line.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MergeOutcome {
    CreatedFile,
    AppendedLine,
    AlreadyPresent,
}

/// Outcome for one export line of a barrel.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub line: String,
    pub outcome: MergeOutcome,
}

/// Keeps barrel files exporting every generated artifact exactly once.
///
/// Presence is decided per line: a line matches when its trimmed text equals
/// the export line, so an unrelated line that merely contains the export
/// text does not count.
pub struct BarrelMerger;

impl BarrelMerger {
    /// Ensure a single export line.
    pub fn ensure_export(path: &Path, line: &str) -> CoreResult<MergeOutcome> {
        let reports = Self::ensure_exports(path, &[line.to_string()])?;
        Ok(reports
            .into_iter()
            .next()
            .map(|r| r.outcome)
            .unwrap_or(MergeOutcome::AlreadyPresent))
    }

    /// Ensure every line of a batch. A missing barrel is created with the
    /// whole batch in one write.
    pub fn ensure_exports(path: &Path, lines: &[String]) -> CoreResult<Vec<ExportReport>> {
        let existing = match fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(CoreError::file_io(path, e)),
        };

        match existing {
            None => Self::create(path, lines),
            Some(content) => Self::append_missing(path, content, lines),
        }
    }

    fn create(path: &Path, lines: &[String]) -> CoreResult<Vec<ExportReport>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CoreError::file_io(parent, e))?;
        }

        let mut batch: Vec<&str> = Vec::new();
        for line in lines {
            if !batch.contains(&line.as_str()) {
                batch.push(line);
            }
        }

        let mut content = batch.join("\n");
        content.push('\n');
        fs::write(path, content).map_err(|e| CoreError::file_io(path, e))?;
        info!("Created barrel {:?} with {} export(s)", path, batch.len());

        Ok(lines
            .iter()
            .enumerate()
            .map(|(i, line)| ExportReport {
                path: path.to_path_buf(),
                line: line.clone(),
                // A duplicate inside the batch was written once, by its first occurrence.
                outcome: if lines[..i].contains(line) {
                    MergeOutcome::AlreadyPresent
                } else {
                    MergeOutcome::CreatedFile
                },
            })
            .collect())
    }

    fn append_missing(
        path: &Path,
        mut content: String,
        lines: &[String],
    ) -> CoreResult<Vec<ExportReport>> {
        let mut present: HashSet<String> = content.lines().map(|l| l.trim().to_string()).collect();
        let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };
        let mut reports = Vec::with_capacity(lines.len());
        let mut changed = false;

        for line in lines {
            let wanted = line.trim();
            let outcome = if present.contains(wanted) {
                debug!("Barrel {:?} already exports '{}'", path, wanted);
                MergeOutcome::AlreadyPresent
            } else {
                if !content.is_empty() && !content.ends_with('\n') {
                    content.push_str(eol);
                }
                content.push_str(wanted);
                content.push_str(eol);
                present.insert(wanted.to_string());
                changed = true;
                info!("Appended '{}' to {:?}", wanted, path);
                MergeOutcome::AppendedLine
            };

            reports.push(ExportReport {
                path: path.to_path_buf(),
                line: line.clone(),
                outcome,
            });
        }

        if changed {
            fs::write(path, content).map_err(|e| CoreError::file_io(path, e))?;
        }

        Ok(reports)
    }
}
