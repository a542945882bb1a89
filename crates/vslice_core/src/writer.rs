//! Create-only file writing.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};

/// Result of a create-only write.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    Created,
    SkippedExisting,
}

/// Writes files that do not exist yet and never touches files that do.
///
/// Idempotence is presence-only: an existing file is kept even if its
/// content no longer matches the template, so manual edits survive re-runs.
/// Content is staged in a temporary file next to the target and moved into
/// place only once complete, so a failed write leaves no partial artifact.
pub struct FileWriter;

impl FileWriter {
    /// Create `path` with `content` unless it already exists.
    pub fn write_if_absent(path: &Path, content: &str) -> CoreResult<WriteOutcome> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| CoreError::file_io(dir, e))?;

        if path.exists() {
            debug!("Skipped existing file {:?}", path);
            return Ok(WriteOutcome::SkippedExisting);
        }

        let mut staged = NamedTempFile::new_in(dir).map_err(|e| CoreError::file_io(dir, e))?;
        staged
            .write_all(content.as_bytes())
            .and_then(|_| staged.flush())
            .map_err(|e| CoreError::file_io(path, e))?;

        match staged.persist_noclobber(path) {
            Ok(_) => {
                info!("Created {:?}", path);
                Ok(WriteOutcome::Created)
            }
            // The staged file is removed when the error drops it.
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                debug!("Skipped existing file {:?}", path);
                Ok(WriteOutcome::SkippedExisting)
            }
            Err(e) => Err(CoreError::file_io(path, e.error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_missing_file_and_parents() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("books/models/publisher.model.ts");

        let outcome = FileWriter::write_if_absent(&path, "export {};\n").unwrap();

        assert_eq!(outcome, WriteOutcome::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "export {};\n");
    }

    #[test]
    fn test_never_overwrites_existing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("publisher.model.ts");
        fs::write(&path, "// edited by hand\n").unwrap();

        let outcome = FileWriter::write_if_absent(&path, "generated\n").unwrap();

        assert_eq!(outcome, WriteOutcome::SkippedExisting);
        assert_eq!(fs::read_to_string(&path).unwrap(), "// edited by hand\n");
    }

    #[test]
    fn test_existing_empty_file_is_kept() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("empty.ts");
        fs::write(&path, "").unwrap();

        let outcome = FileWriter::write_if_absent(&path, "content").unwrap();

        assert_eq!(outcome, WriteOutcome::SkippedExisting);
        assert!(fs::read_to_string(&path).unwrap().is_empty());
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_no_staging_files_left_behind() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("publisher.model.ts");

        FileWriter::write_if_absent(&path, "first\n").unwrap();
        FileWriter::write_if_absent(&path, "second\n").unwrap();

        assert_eq!(entries(temp.path()), vec!["publisher.model.ts".to_string()]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_refused_move_discards_staged_content() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("publisher.model.ts");
        // A dangling link is not `exists()`, so the write is staged and the
        // final no-clobber move is what refuses it.
        std::os::unix::fs::symlink(temp.path().join("missing"), &path).unwrap();

        let outcome = FileWriter::write_if_absent(&path, "generated\n").unwrap();

        assert_eq!(outcome, WriteOutcome::SkippedExisting);
        assert_eq!(entries(temp.path()), vec!["publisher.model.ts".to_string()]);
        assert!(!temp.path().join("missing").exists());
    }
}
