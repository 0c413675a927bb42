//! Artifact classification.
//!
//! Decision table, first match wins:
//! 1. no descriptor -> classpath jar
//! 2. explicit descriptor -> named module
//! 3. automatic descriptor -> automatic module, unless the policy demands
//!    manifest confirmation and the jar lacks `Automatic-Module-Name`, in
//!    which case it is demoted to a classpath jar.

use jpackstage_api::{
    Category, ClassificationPolicy, ManifestReader, ModuleDescriptor, ResolvedArtifact, Result,
    StageError,
};
use tracing::debug;

/// Result of classifying one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Reported automatic by the module system but not confirmed by the manifest.
    pub demoted: bool,
}

impl From<Category> for Classification {
    fn from(category: Category) -> Self {
        Self {
            category,
            demoted: false,
        }
    }
}

/// Per-artifact classification strategy used by the dependency walker.
pub trait Classify {
    fn classify(
        &self,
        artifact: &ResolvedArtifact,
        descriptor: Option<&ModuleDescriptor>,
    ) -> Result<Classification>;
}

impl<F> Classify for F
where
    F: Fn(&ResolvedArtifact, Option<&ModuleDescriptor>) -> Result<Category>,
{
    fn classify(
        &self,
        artifact: &ResolvedArtifact,
        descriptor: Option<&ModuleDescriptor>,
    ) -> Result<Classification> {
        self(artifact, descriptor).map(Classification::from)
    }
}

/// The standard three-way classifier.
pub struct ArtifactClassifier<M> {
    policy: ClassificationPolicy,
    manifests: M,
}

impl<M: ManifestReader> ArtifactClassifier<M> {
    pub fn new(policy: ClassificationPolicy, manifests: M) -> Self {
        Self { policy, manifests }
    }

    pub fn policy(&self) -> ClassificationPolicy {
        self.policy
    }

    /// Whether the jar's own manifest declares an automatic module name.
    fn manifest_confirms(&self, artifact: &ResolvedArtifact) -> Result<bool> {
        let name = self
            .manifests
            .automatic_module_name(&artifact.path)
            .map_err(|source| StageError::ManifestRead {
                artifact: artifact.to_string(),
                path: artifact.path.clone(),
                source,
            })?;
        Ok(name.is_some_and(|n| !n.trim().is_empty()))
    }
}

impl<M: ManifestReader> Classify for ArtifactClassifier<M> {
    fn classify(
        &self,
        artifact: &ResolvedArtifact,
        descriptor: Option<&ModuleDescriptor>,
    ) -> Result<Classification> {
        let Some(descriptor) = descriptor else {
            return Ok(Category::ClasspathJar.into());
        };

        if !descriptor.is_automatic() {
            return Ok(Category::NamedModule.into());
        }

        if !self.policy.only_named_are_automatic || self.manifest_confirms(artifact)? {
            return Ok(Category::AutomaticModule.into());
        }

        debug!(
            "{} has no Automatic-Module-Name in its manifest, treating it as a classpath jar",
            artifact
        );
        Ok(Classification {
            category: Category::ClasspathJar,
            demoted: true,
        })
    }
}
