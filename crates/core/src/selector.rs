//! Artifact selectors for the exclusion and forced-classpath lists.

use jpackstage_api::{ArtifactCoordinates, StageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ANY: &str = "*";

/// `groupId:artifactId[:version[:classifier]]`, any field may be `*`.
/// Omitted trailing fields match anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactSelector {
    group_id: String,
    artifact_id: String,
    version: Option<String>,
    classifier: Option<String>,
}

impl ArtifactSelector {
    pub fn matches(&self, coordinates: &ArtifactCoordinates) -> bool {
        field_matches(&self.group_id, &coordinates.group_id)
            && field_matches(&self.artifact_id, &coordinates.artifact_id)
            && optional_matches(self.version.as_deref(), coordinates.version.as_deref())
            && optional_matches(self.classifier.as_deref(), coordinates.classifier.as_deref())
    }
}

fn field_matches(pattern: &str, value: &str) -> bool {
    pattern == ANY || pattern == value
}

fn optional_matches(pattern: Option<&str>, value: Option<&str>) -> bool {
    match pattern {
        None | Some(ANY) => true,
        Some(p) => value == Some(p),
    }
}

impl FromStr for ArtifactSelector {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(StageError::config(format!(
                "artifact selector '{}' must look like groupId:artifactId[:version[:classifier]]",
                s
            )));
        }
        if parts[0].is_empty() || parts[1].is_empty() {
            return Err(StageError::config(format!(
                "artifact selector '{}' needs a groupId and an artifactId (use * for any)",
                s
            )));
        }

        let optional = |i: usize| {
            parts
                .get(i)
                .filter(|p| !p.is_empty())
                .map(|p| p.to_string())
        };

        Ok(Self {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version: optional(2),
            classifier: optional(3),
        })
    }
}

impl TryFrom<String> for ArtifactSelector {
    type Error = StageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArtifactSelector> for String {
    fn from(selector: ArtifactSelector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for ArtifactSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        match (&self.version, &self.classifier) {
            (Some(v), Some(c)) => write!(f, ":{}:{}", v, c),
            (Some(v), None) => write!(f, ":{}", v),
            (None, Some(c)) => write!(f, ":*:{}", c),
            (None, None) => Ok(()),
        }
    }
}

/// Exclusion and forced-classpath lists applied before classification.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub excluded: Vec<ArtifactSelector>,
    pub classpath: Vec<ArtifactSelector>,
}

impl Overrides {
    pub fn new(excluded: Vec<ArtifactSelector>, classpath: Vec<ArtifactSelector>) -> Self {
        Self {
            excluded,
            classpath,
        }
    }

    pub fn is_excluded(&self, coordinates: &ArtifactCoordinates) -> bool {
        self.excluded.iter().any(|s| s.matches(coordinates))
    }

    pub fn is_forced_classpath(&self, coordinates: &ArtifactCoordinates) -> bool {
        self.classpath.iter().any(|s| s.matches(coordinates))
    }
}
