use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Identity of an artifact in the build's dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub classifier: Option<String>,
    pub extension: String,
}

impl ArtifactCoordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: Some(version.into()),
            classifier: None,
            extension: "jar".to_string(),
        }
    }

    /// Coordinates for a jar that only has a file name to go by.
    pub fn local(artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: String::new(),
            artifact_id: artifact_id.into(),
            version: None,
            classifier: None,
            extension: "jar".to_string(),
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }
}

impl fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        if let Some(classifier) = &self.classifier {
            if self.version.is_none() {
                f.write_str(":")?;
            }
            write!(f, ":{}", classifier)?;
        }
        Ok(())
    }
}

impl FromStr for ArtifactCoordinates {
    type Err = String;

    /// Parses `groupId:artifactId[:version[:classifier]]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(format!(
                "invalid coordinates '{}', expected groupId:artifactId[:version[:classifier]]",
                s
            ));
        }
        if parts[1].is_empty() {
            return Err(format!("invalid coordinates '{}': empty artifactId", s));
        }

        let non_empty = |p: Option<&&str>| p.filter(|v| !v.is_empty()).map(|v| v.to_string());

        Ok(Self {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version: non_empty(parts.get(2)),
            classifier: non_empty(parts.get(3)),
            extension: "jar".to_string(),
        })
    }
}

/// A dependency as handed over by the resolver. Immutable for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub coordinates: ArtifactCoordinates,
    pub path: PathBuf,
    /// Whether `path` pointed at a regular file when the graph was resolved.
    pub regular_file: bool,
}

impl ResolvedArtifact {
    pub fn new(coordinates: ArtifactCoordinates, path: PathBuf, regular_file: bool) -> Self {
        Self {
            coordinates,
            path,
            regular_file,
        }
    }

    /// Builds the artifact and probes the filesystem for the regular-file flag.
    pub fn from_path(coordinates: ArtifactCoordinates, path: PathBuf) -> Self {
        let regular_file = path.is_file();
        Self::new(coordinates, path, regular_file)
    }

    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ResolvedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.coordinates.fmt(f)
    }
}
