use jpackstage_api::{DependencyResolver, ToolLocator};
use jpackstage_core::logging::LogOptions;
use jpackstage_core::{ArtifactClassifier, CollectConfig, CollectionOrchestrator};
use jpackstage_graph::{DirectoryResolver, ListingResolver};
use jpackstage_java::{JarInspector, JdkToolLocator};
use std::path::PathBuf;
use std::sync::Arc;

/// Where the resolved dependency graph comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySource {
    /// JSON listing written by the build
    Listing(PathBuf),
    /// Flat `lib/` directory or a Maven repository layout
    Directory(PathBuf),
}

pub fn build_resolver(source: DependencySource) -> Box<dyn DependencyResolver> {
    let introspector = Arc::new(JarInspector);
    match source {
        DependencySource::Listing(path) => Box::new(ListingResolver::new(path, introspector)),
        DependencySource::Directory(path) => Box::new(DirectoryResolver::new(path, introspector)),
    }
}

/// Assembles the standard collector: jar inspection for module descriptors
/// and manifests, policy and overrides taken from `config`.
pub fn build_default_collector(
    config: &CollectConfig,
    source: DependencySource,
) -> CollectionOrchestrator<ArtifactClassifier<JarInspector>> {
    let resolver = build_resolver(source);
    tracing::debug!("Using {} as dependency source", resolver.name());
    CollectionOrchestrator::new(
        resolver,
        ArtifactClassifier::new(config.policy(), JarInspector),
        config.overrides(),
    )
}

pub fn build_tool_locator(jdk_home: Option<PathBuf>) -> Box<dyn ToolLocator> {
    Box::new(JdkToolLocator::new().with_jdk_home(jdk_home))
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, verbose: bool) -> Option<impl Drop> {
    let mut options = LogOptions::new(component);
    options.verbose = verbose;
    Some(jpackstage_core::logging::init_logging(&options))
}
