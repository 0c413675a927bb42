//! Boundary to the build system's dependency graph.

use crate::error::{Result, StageError};
use crate::models::{ModuleDescriptor, ResolvedArtifact};

/// Module information of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorState {
    /// `None` when the artifact carries no module information at all.
    Known(Option<ModuleDescriptor>),
    /// Not looked up yet; ask the resolver through
    /// [`DependencyResolver::describe`] once the node is actually needed.
    Deferred,
}

/// One node of a resolved dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNode {
    pub artifact: ResolvedArtifact,
    pub descriptor: DescriptorState,
}

impl ResolvedNode {
    pub fn new(artifact: ResolvedArtifact, descriptor: Option<ModuleDescriptor>) -> Self {
        Self {
            artifact,
            descriptor: DescriptorState::Known(descriptor),
        }
    }

    pub fn deferred(artifact: ResolvedArtifact) -> Self {
        Self {
            artifact,
            descriptor: DescriptorState::Deferred,
        }
    }
}

pub type NodeIter<'a> = Box<dyn Iterator<Item = Result<ResolvedNode>> + 'a>;

/// Produces the resolved artifacts of a build in graph traversal order.
///
/// Implementations stream nodes lazily. Failing to start the walk, or any
/// individual node failing to resolve, is reported as
/// [`StageError::GraphResolution`](crate::StageError::GraphResolution).
pub trait DependencyResolver {
    fn resolve(&self) -> Result<NodeIter<'_>>;

    /// Looks up the descriptor of a node handed out as
    /// [`DescriptorState::Deferred`]. Only called for nodes that are neither
    /// excluded nor skipped, so unwanted jars are never opened.
    fn describe(&self, artifact: &ResolvedArtifact) -> Result<Option<ModuleDescriptor>> {
        Err(StageError::graph(format!(
            "{} cannot describe {}",
            self.name(),
            artifact
        )))
    }

    /// Resolver name (for logging)
    fn name(&self) -> &str;
}
