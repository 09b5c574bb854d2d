//! Artifact selection for plugin output directories.
//!
//! The descriptor-emission plugin is expected to leave exactly one file in
//! the scratch directory, but protoc controls the file's name and may create
//! nested directories. The selection rule is a named policy rather than
//! inline scan logic so it can be tested and replaced.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Trait for selecting the output artifact from a plugin output directory
pub trait ArtifactPolicy: Send + Sync {
    /// Picks the artifact within `dir`, or fails if none qualifies
    fn select(&self, dir: &Path) -> Result<PathBuf>;
}

/// Default policy: the first regular file among the directory's immediate
/// entries.
///
/// Subdirectories are skipped, never descended into. "First" follows the
/// platform's directory iteration order, which is not guaranteed to be
/// stable; the plugin contract of emitting a single file makes the order
/// irrelevant in practice.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFile;

impl ArtifactPolicy for FirstFile {
    fn select(&self, dir: &Path) -> Result<PathBuf> {
        let entries = std::fs::read_dir(dir).map_err(|e| Error::file_read(dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| Error::file_read(dir, e))?;
            let file_type = entry.file_type().map_err(|e| Error::file_read(entry.path(), e))?;
            if file_type.is_dir() {
                continue;
            }
            return Ok(entry.path());
        }

        Err(Error::no_output_artifact(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_directory_has_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = FirstFile.select(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NoOutputArtifact { .. }));
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_subdirectories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::create_dir(dir.path().join("deeper")).unwrap();

        let err = FirstFile.select(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NoOutputArtifact { .. }));
    }

    #[test]
    fn test_file_is_selected_over_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("request.bin"), b"payload").unwrap();

        let selected = FirstFile.select(dir.path()).unwrap();
        assert_eq!(selected, dir.path().join("request.bin"));
    }

    #[test]
    fn test_missing_directory_is_a_read_error() {
        let err = FirstFile
            .select(Path::new("/nonexistent/girder-scratch"))
            .unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
