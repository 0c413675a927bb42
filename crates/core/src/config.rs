//! Collect step configuration.
//!
//! Loaded from a JSON file; every field is optional. Command-line flags are
//! applied on top by the caller.

use crate::selector::{ArtifactSelector, Overrides};
use jpackstage_api::{Category, ClassificationPolicy, OutputLayout, Result, StageError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectConfig {
    /// Base for the default staging directories
    pub build_dir: PathBuf,
    pub modules_dir: Option<PathBuf>,
    pub automatic_dir: Option<PathBuf>,
    pub classpath_dir: Option<PathBuf>,
    /// Categories that are classified but not staged
    pub disabled: Vec<Category>,
    pub only_named_are_automatic: bool,
    pub excluded: Vec<ArtifactSelector>,
    pub classpath: Vec<ArtifactSelector>,
    pub skip: bool,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("target"),
            modules_dir: None,
            automatic_dir: None,
            classpath_dir: None,
            disabled: Vec::new(),
            only_named_are_automatic: ClassificationPolicy::default().only_named_are_automatic,
            excluded: Vec::new(),
            classpath: Vec::new(),
            skip: false,
        }
    }
}

impl CollectConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StageError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| StageError::config(format!("{}: {}", path.display(), e)))
    }

    fn staging_root(&self) -> PathBuf {
        self.build_dir.join("jpacktool")
    }

    fn dir(&self, category: Category) -> Option<PathBuf> {
        if self.disabled.contains(&category) {
            return None;
        }
        let (explicit, default_name) = match category {
            Category::NamedModule => (&self.modules_dir, "jmods"),
            Category::AutomaticModule => (&self.automatic_dir, "autojar"),
            Category::ClasspathJar => (&self.classpath_dir, "jar"),
        };
        Some(
            explicit
                .clone()
                .unwrap_or_else(|| self.staging_root().join(default_name)),
        )
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(
            self.dir(Category::NamedModule),
            self.dir(Category::AutomaticModule),
            self.dir(Category::ClasspathJar),
        )
    }

    pub fn policy(&self) -> ClassificationPolicy {
        ClassificationPolicy {
            only_named_are_automatic: self.only_named_are_automatic,
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides::new(self.excluded.clone(), self.classpath.clone())
    }
}
