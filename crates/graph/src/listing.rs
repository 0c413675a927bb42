//! Resolver backed by a JSON listing produced by the build.
//!
//! ```json
//! {
//!   "artifacts": [
//!     { "coordinates": "org.slf4j:slf4j-api:2.0.9", "path": "libs/slf4j-api-2.0.9.jar" },
//!     { "coordinates": "com.example:app-core:1.0", "path": "/abs/app-core.jar", "module": "explicit" }
//!   ]
//! }
//! ```

use jpackstage_api::{
    ArtifactCoordinates, DependencyResolver, ModuleDescriptor, ModuleIntrospector, NodeIter,
    ResolvedArtifact, ResolvedNode, Result, StageError,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Listing {
    artifacts: Vec<ListingEntry>,
}

#[derive(Debug, Deserialize)]
struct ListingEntry {
    coordinates: String,
    path: PathBuf,
    #[serde(default)]
    module: Option<DeclaredModule>,
    #[serde(default)]
    module_name: Option<String>,
}

/// Module information the build already knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DeclaredModule {
    Explicit,
    Automatic,
    #[serde(rename = "none")]
    Plain,
}

pub struct ListingResolver {
    listing: PathBuf,
    introspector: Arc<dyn ModuleIntrospector>,
}

impl ListingResolver {
    pub fn new(listing: PathBuf, introspector: Arc<dyn ModuleIntrospector>) -> Self {
        Self {
            listing,
            introspector,
        }
    }

    fn load(&self) -> Result<Vec<(ArtifactCoordinates, ListingEntry)>> {
        let content = std::fs::read_to_string(&self.listing).map_err(|e| {
            StageError::graph(format!(
                "cannot read dependency listing {}: {}",
                self.listing.display(),
                e
            ))
        })?;
        let listing: Listing = serde_json::from_str(&content).map_err(|e| {
            StageError::graph(format!(
                "malformed dependency listing {}: {}",
                self.listing.display(),
                e
            ))
        })?;

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(listing.artifacts.len());
        for entry in listing.artifacts {
            let coordinates: ArtifactCoordinates =
                entry.coordinates.parse().map_err(StageError::graph)?;
            if !seen.insert(coordinates.clone()) {
                return Err(StageError::graph(format!(
                    "artifact {} is listed more than once in {}",
                    coordinates,
                    self.listing.display()
                )));
            }
            entries.push((coordinates, entry));
        }
        Ok(entries)
    }

    fn base_dir(&self) -> &Path {
        self.listing.parent().unwrap_or(Path::new("."))
    }

    fn to_node(
        &self,
        coordinates: ArtifactCoordinates,
        entry: ListingEntry,
    ) -> ResolvedNode {
        let path = if entry.path.is_absolute() {
            entry.path
        } else {
            self.base_dir().join(entry.path)
        };
        let artifact = ResolvedArtifact::from_path(coordinates, path);

        match entry.module {
            Some(DeclaredModule::Explicit) => ResolvedNode::new(
                artifact,
                Some(ModuleDescriptor::declared(entry.module_name, false)),
            ),
            Some(DeclaredModule::Automatic) => ResolvedNode::new(
                artifact,
                Some(ModuleDescriptor::declared(entry.module_name, true)),
            ),
            Some(DeclaredModule::Plain) => ResolvedNode::new(artifact, None),
            // Left to the introspector, and only if the artifact is wanted
            None => ResolvedNode::deferred(artifact),
        }
    }
}

impl DependencyResolver for ListingResolver {
    fn resolve(&self) -> Result<NodeIter<'_>> {
        let entries = self.load()?;
        debug!(
            "Dependency listing {} holds {} artifacts",
            self.listing.display(),
            entries.len()
        );
        Ok(Box::new(
            entries
                .into_iter()
                .map(move |(coordinates, entry)| Ok(self.to_node(coordinates, entry))),
        ))
    }

    fn describe(&self, artifact: &ResolvedArtifact) -> Result<Option<ModuleDescriptor>> {
        crate::introspect(self.introspector.as_ref(), artifact)
    }

    fn name(&self) -> &str {
        "Dependency Listing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpackstage_api::DescriptorState;
    use std::io;

    struct NoModules;

    impl ModuleIntrospector for NoModules {
        fn describe(&self, _path: &Path) -> io::Result<Option<ModuleDescriptor>> {
            Ok(None)
        }
    }

    fn resolver_for(json: &str) -> (tempfile::TempDir, ListingResolver) {
        let dir = tempfile::tempdir().unwrap();
        let listing = dir.path().join("deps.json");
        std::fs::write(&listing, json).unwrap();
        (dir, ListingResolver::new(listing, Arc::new(NoModules)))
    }

    #[test]
    fn test_relative_paths_and_declared_modules() {
        let (dir, resolver) = resolver_for(
            r#"{"artifacts": [
                {"coordinates": "com.example:lib-c:1.0", "path": "lib-c.jar", "module": "explicit"},
                {"coordinates": "com.example:lib-a:1.0", "path": "lib-a.jar"}
            ]}"#,
        );
        std::fs::write(dir.path().join("lib-c.jar"), b"jar").unwrap();

        let nodes: Vec<_> = resolver
            .resolve()
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].artifact.path, dir.path().join("lib-c.jar"));
        assert!(nodes[0].artifact.regular_file);
        assert_eq!(
            nodes[0].descriptor,
            DescriptorState::Known(Some(ModuleDescriptor::declared(None, false)))
        );
        assert!(!nodes[1].artifact.regular_file);
        assert_eq!(nodes[1].descriptor, DescriptorState::Deferred);
        assert_eq!(resolver.describe(&nodes[1].artifact).unwrap(), None);
    }

    #[test]
    fn test_duplicate_coordinates() {
        let (_dir, resolver) = resolver_for(
            r#"{"artifacts": [
                {"coordinates": "g:a:1", "path": "a.jar"},
                {"coordinates": "g:a:1", "path": "b.jar"}
            ]}"#,
        );
        let err = resolver.resolve().err().unwrap();
        assert!(matches!(err, StageError::GraphResolution(_)));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_malformed_listing() {
        let (_dir, resolver) = resolver_for(r#"{"artifacts": [{"path": "a.jar"}]}"#);
        assert!(matches!(
            resolver.resolve().err().unwrap(),
            StageError::GraphResolution(_)
        ));
    }

    #[test]
    fn test_missing_listing() {
        let resolver = ListingResolver::new(PathBuf::from("/nonexistent/deps.json"), Arc::new(NoModules));
        assert!(matches!(
            resolver.resolve().err().unwrap(),
            StageError::GraphResolution(_)
        ));
    }
}
