use super::{ArtifactCoordinates, Category};
use std::path::{Path, PathBuf};

/// The three staging directories. `None` means "do not stage this category".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputLayout {
    pub modules: Option<PathBuf>,
    pub automatic: Option<PathBuf>,
    pub classpath: Option<PathBuf>,
}

impl OutputLayout {
    pub fn new(
        modules: Option<PathBuf>,
        automatic: Option<PathBuf>,
        classpath: Option<PathBuf>,
    ) -> Self {
        Self {
            modules,
            automatic,
            classpath,
        }
    }

    pub fn dir_for(&self, category: Category) -> Option<&Path> {
        match category {
            Category::NamedModule => self.modules.as_deref(),
            Category::AutomaticModule => self.automatic.as_deref(),
            Category::ClasspathJar => self.classpath.as_deref(),
        }
    }

    /// Configured directories together with their category.
    pub fn configured(&self) -> impl Iterator<Item = (Category, &Path)> + '_ {
        Category::ALL
            .into_iter()
            .filter_map(|category| self.dir_for(category).map(|dir| (category, dir)))
    }
}

/// Outcome of staging a single artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingResult {
    pub coordinates: ArtifactCoordinates,
    pub category: Category,
    pub source: PathBuf,
    /// `None` when the category's directory is absent from the layout.
    pub target: Option<PathBuf>,
    pub bytes: u64,
}

impl StagingResult {
    pub fn is_staged(&self) -> bool {
        self.target.is_some()
    }
}
