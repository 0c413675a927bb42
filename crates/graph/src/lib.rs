//! Dependency graph resolvers.
//!
//! The build system normally hands over its resolved artifacts; these
//! resolvers read them from a JSON listing or from a library directory.

pub mod directory;
pub mod listing;

pub use directory::DirectoryResolver;
pub use listing::ListingResolver;

use jpackstage_api::{ModuleDescriptor, ModuleIntrospector, ResolvedArtifact, Result, StageError};

fn introspect(
    introspector: &dyn ModuleIntrospector,
    artifact: &ResolvedArtifact,
) -> Result<Option<ModuleDescriptor>> {
    introspector.describe(&artifact.path).map_err(|e| {
        StageError::graph(format!(
            "cannot determine module descriptor of {} ({}): {}",
            artifact,
            artifact.path.display(),
            e
        ))
    })
}
