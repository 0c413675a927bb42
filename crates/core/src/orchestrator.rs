//! Drives one collect run: prepare directories, walk, stage.

use crate::classify::Classify;
use crate::selector::Overrides;
use crate::staging::StagingWriter;
use crate::walker::{DependencyWalker, WalkStats};
use jpackstage_api::{
    ArtifactCoordinates, DependencyResolver, OutputLayout, Result, StageError, StagingResult,
};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Result of a successful run.
#[derive(Debug, Clone, Default)]
pub struct CollectReport {
    pub results: Vec<StagingResult>,
    pub stats: WalkStats,
}

impl CollectReport {
    pub fn staged(&self) -> usize {
        self.results.iter().filter(|r| r.is_staged()).count()
    }

    pub fn not_staged(&self) -> usize {
        self.results.len() - self.staged()
    }
}

/// Owns the graph source and classification strategy of a collect run.
///
/// Fails fast: the first error from the resolver, the classifier or a copy
/// aborts the run. Files staged before the failure are left in place.
pub struct CollectionOrchestrator<C> {
    resolver: Box<dyn DependencyResolver>,
    classifier: C,
    overrides: Overrides,
    writer: StagingWriter,
}

impl<C: Classify> CollectionOrchestrator<C> {
    pub fn new(resolver: Box<dyn DependencyResolver>, classifier: C, overrides: Overrides) -> Self {
        Self {
            resolver,
            classifier,
            overrides,
            writer: StagingWriter::new(),
        }
    }

    pub fn run(&self, layout: &OutputLayout) -> Result<CollectReport> {
        ensure_directories(layout)?;

        let mut walker =
            DependencyWalker::new(self.resolver.as_ref(), &self.classifier, &self.overrides)
                .inspect_err(|e| error!("{}", e))?;

        let mut results = Vec::new();
        let mut targets: HashMap<PathBuf, ArtifactCoordinates> = HashMap::new();

        for item in walker.by_ref() {
            let classified = item.inspect_err(|e| error!("{}", e))?;
            let result = self
                .writer
                .stage(&classified.artifact, classified.category, layout)?;

            if let Some(target) = &result.target {
                if let Some(previous) = targets.insert(target.clone(), result.coordinates.clone()) {
                    warn!(
                        "{} overwrote {} staged by {} in the same run",
                        result.coordinates,
                        target.display(),
                        previous
                    );
                }
            }
            results.push(result);
        }

        let report = CollectReport {
            results,
            stats: walker.stats(),
        };
        info!(
            "Collected {} artifacts: {} staged, {} without output directory, {} excluded, {} demoted to classpath",
            report.results.len(),
            report.staged(),
            report.not_staged(),
            report.stats.excluded,
            report.stats.demoted
        );
        Ok(report)
    }
}

/// Creates every configured directory, including missing parents.
pub fn ensure_directories(layout: &OutputLayout) -> Result<()> {
    for (category, dir) in layout.configured() {
        if dir.is_dir() {
            continue;
        }
        std::fs::create_dir_all(dir).map_err(|source| {
            error!("directory can not be created: {}", dir.display());
            StageError::DirectoryCreation {
                path: dir.to_path_buf(),
                source,
            }
        })?;
        info!("Created {} directory {}", category, dir.display());
    }
    Ok(())
}
