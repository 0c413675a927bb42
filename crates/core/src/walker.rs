//! Single pass over the resolved dependency graph.
//!
//! Order of checks per node: exclusion, regular file, forced classpath,
//! descriptor lookup for deferred nodes, then the classification strategy.
//! Nodes come out in the resolver's traversal order.

use crate::classify::Classify;
use crate::selector::Overrides;
use jpackstage_api::{
    Category, DependencyResolver, DescriptorState, ModuleDescriptor, NodeIter, ResolvedArtifact,
    ResolvedNode, Result, StageError,
};
use tracing::debug;

/// How an artifact ended up in its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Classified,
    /// Automatic per the module system, demoted for lack of a manifest name
    Demoted,
    ForcedClasspath,
}

#[derive(Debug, Clone)]
pub struct ClassifiedArtifact {
    pub artifact: ResolvedArtifact,
    pub descriptor: Option<ModuleDescriptor>,
    pub category: Category,
    pub origin: Origin,
}

/// Counters of a walk, complete once the walker is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub visited: usize,
    pub excluded: usize,
    pub not_regular: usize,
    pub forced_classpath: usize,
    pub demoted: usize,
}

pub struct DependencyWalker<'a, C> {
    nodes: NodeIter<'a>,
    /// Answers deferred descriptor lookups
    resolver: Option<&'a dyn DependencyResolver>,
    classifier: &'a C,
    overrides: &'a Overrides,
    stats: WalkStats,
    done: bool,
}

impl<'a, C: Classify> DependencyWalker<'a, C> {
    /// Starts the walk. A resolver that cannot produce the graph fails here.
    pub fn new(
        resolver: &'a dyn DependencyResolver,
        classifier: &'a C,
        overrides: &'a Overrides,
    ) -> Result<Self> {
        debug!("Walking dependency graph from {}", resolver.name());
        let mut walker = Self::over(resolver.resolve()?, classifier, overrides);
        walker.resolver = Some(resolver);
        Ok(walker)
    }

    /// Walks a bare node stream. Deferred descriptors cannot be looked up
    /// and fail the walk.
    pub fn over(nodes: NodeIter<'a>, classifier: &'a C, overrides: &'a Overrides) -> Self {
        Self {
            nodes,
            resolver: None,
            classifier,
            overrides,
            stats: WalkStats::default(),
            done: false,
        }
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    fn descriptor_of(
        &self,
        artifact: &ResolvedArtifact,
        state: DescriptorState,
    ) -> Result<Option<ModuleDescriptor>> {
        match state {
            DescriptorState::Known(descriptor) => Ok(descriptor),
            DescriptorState::Deferred => match self.resolver {
                Some(resolver) => resolver.describe(artifact),
                None => Err(StageError::graph(format!(
                    "no resolver to describe {}",
                    artifact
                ))),
            },
        }
    }
}

impl<C: Classify> Iterator for DependencyWalker<'_, C> {
    type Item = Result<ClassifiedArtifact>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let node = match self.nodes.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(node)) => node,
            };
            self.stats.visited += 1;
            let ResolvedNode {
                artifact,
                descriptor: state,
            } = node;

            if self.overrides.is_excluded(&artifact.coordinates) {
                debug!("Excluding {}", artifact);
                self.stats.excluded += 1;
                continue;
            }

            if !artifact.regular_file {
                debug!(
                    "Skipping {}: {} is not a regular file",
                    artifact,
                    artifact.path.display()
                );
                self.stats.not_regular += 1;
                continue;
            }

            if self.overrides.is_forced_classpath(&artifact.coordinates) {
                self.stats.forced_classpath += 1;
                return Some(Ok(ClassifiedArtifact {
                    descriptor: match state {
                        DescriptorState::Known(descriptor) => descriptor,
                        DescriptorState::Deferred => None,
                    },
                    artifact,
                    category: Category::ClasspathJar,
                    origin: Origin::ForcedClasspath,
                }));
            }

            let descriptor = match self.descriptor_of(&artifact, state) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            return match self.classifier.classify(&artifact, descriptor.as_ref()) {
                Ok(classification) => {
                    let origin = if classification.demoted {
                        self.stats.demoted += 1;
                        Origin::Demoted
                    } else {
                        Origin::Classified
                    };
                    Some(Ok(ClassifiedArtifact {
                        artifact,
                        descriptor,
                        category: classification.category,
                        origin,
                    }))
                }
                Err(e) => {
                    self.done = true;
                    Some(Err(e))
                }
            };
        }
    }
}
