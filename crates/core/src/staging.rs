//! Copies classified artifacts into their staging directory.

use jpackstage_api::{Category, OutputLayout, ResolvedArtifact, Result, StageError, StagingResult};
use std::io;
use std::path::Path;
use tracing::{debug, error, info};

/// Places artifacts as `<category dir>/<file name>`, overwriting stale copies.
///
/// The copy goes straight to the target path; a crash mid-copy leaves that
/// file in an undefined state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StagingWriter;

impl StagingWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn stage(
        &self,
        artifact: &ResolvedArtifact,
        category: Category,
        layout: &OutputLayout,
    ) -> Result<StagingResult> {
        let mut result = StagingResult {
            coordinates: artifact.coordinates.clone(),
            category,
            source: artifact.path.clone(),
            target: None,
            bytes: 0,
        };

        let Some(dir) = layout.dir_for(category) else {
            debug!("No directory for {} artifacts, not staging {}", category, artifact);
            return Ok(result);
        };

        let Some(file_name) = artifact.file_name() else {
            return Err(StageError::Staging {
                artifact: artifact.to_string(),
                source_path: artifact.path.clone(),
                target_path: dir.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "artifact path has no file name"),
            });
        };
        let target = dir.join(file_name);

        // Copying a file onto itself truncates it
        if same_file(&artifact.path, &target) {
            debug!("{} is already staged at {}", artifact, target.display());
            result.bytes = std::fs::metadata(&target).map(|m| m.len()).unwrap_or(0);
            result.target = Some(target);
            return Ok(result);
        }

        match std::fs::copy(&artifact.path, &target) {
            Ok(bytes) => {
                info!("copy jar {} to {}", artifact.path.display(), target.display());
                result.target = Some(target);
                result.bytes = bytes;
                Ok(result)
            }
            Err(source) => {
                error!(
                    "Failure during copying of {} to {}: {}",
                    artifact.path.display(),
                    target.display(),
                    source
                );
                Err(StageError::Staging {
                    artifact: artifact.to_string(),
                    source_path: artifact.path.clone(),
                    target_path: target,
                    source,
                })
            }
        }
    }
}

#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpackstage_api::ArtifactCoordinates;
    use std::fs;
    use tempfile::tempdir;

    fn artifact_at(path: &Path) -> ResolvedArtifact {
        ResolvedArtifact::from_path(ArtifactCoordinates::new("g", "lib-a", "1.0"), path.to_path_buf())
    }

    #[test]
    fn test_copy_overwrites_stale_target() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("lib-a.jar");
        fs::write(&source, b"fresh").unwrap();
        let jar_dir = temp.path().join("jar");
        fs::create_dir(&jar_dir).unwrap();
        fs::write(jar_dir.join("lib-a.jar"), b"stale content that is longer").unwrap();

        let layout = OutputLayout::new(None, None, Some(jar_dir.clone()));
        let result = StagingWriter
            .stage(&artifact_at(&source), Category::ClasspathJar, &layout)
            .unwrap();

        assert_eq!(result.target, Some(jar_dir.join("lib-a.jar")));
        assert_eq!(result.bytes, 5);
        assert_eq!(fs::read(jar_dir.join("lib-a.jar")).unwrap(), b"fresh");
    }

    #[test]
    fn test_absent_directory_is_a_no_op() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("lib-a.jar");
        fs::write(&source, b"x").unwrap();

        let layout = OutputLayout::new(Some(temp.path().join("jmods")), None, None);
        let result = StagingWriter
            .stage(&artifact_at(&source), Category::AutomaticModule, &layout)
            .unwrap();

        assert!(!result.is_staged());
        assert!(!temp.path().join("jmods").exists());
    }

    #[test]
    fn test_copy_failure_names_both_paths() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("lib-a.jar");
        fs::write(&source, b"x").unwrap();
        // Target directory was never created
        let missing = temp.path().join("missing");

        let layout = OutputLayout::new(Some(missing.clone()), None, None);
        let err = StagingWriter
            .stage(&artifact_at(&source), Category::NamedModule, &layout)
            .unwrap_err();

        match err {
            StageError::Staging {
                source_path,
                target_path,
                ..
            } => {
                assert_eq!(source_path, source);
                assert_eq!(target_path, missing.join("lib-a.jar"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_source_already_in_target_dir_is_left_intact() {
        let temp = tempdir().unwrap();
        let jar_dir = temp.path().join("jar");
        fs::create_dir(&jar_dir).unwrap();
        let source = jar_dir.join("lib-a.jar");
        fs::write(&source, b"jar bytes").unwrap();

        let layout = OutputLayout::new(None, None, Some(jar_dir.clone()));
        let result = StagingWriter
            .stage(&artifact_at(&source), Category::ClasspathJar, &layout)
            .unwrap();

        assert_eq!(result.target, Some(source.clone()));
        assert_eq!(result.bytes, 9);
        assert_eq!(fs::read(&source).unwrap(), b"jar bytes");
    }

    #[test]
    fn test_same_file_through_other_path() {
        let temp = tempdir().unwrap();
        let jar_dir = temp.path().join("jar");
        fs::create_dir(&jar_dir).unwrap();
        fs::write(jar_dir.join("lib-a.jar"), b"jar bytes").unwrap();
        let source = temp.path().join("jar/../jar/lib-a.jar");

        let layout = OutputLayout::new(None, None, Some(jar_dir.clone()));
        StagingWriter
            .stage(&artifact_at(&source), Category::ClasspathJar, &layout)
            .unwrap();

        assert_eq!(fs::read(jar_dir.join("lib-a.jar")).unwrap(), b"jar bytes");
    }
}
