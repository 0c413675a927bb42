pub mod classify;
pub mod config;
pub mod logging;
pub mod orchestrator;
pub mod publish;
pub mod selector;
pub mod staging;
pub mod walker;

pub use classify::{ArtifactClassifier, Classification, Classify};
pub use config::CollectConfig;
pub use jpackstage_api::{Result, StageError};
pub use orchestrator::{CollectReport, CollectionOrchestrator, ensure_directories};
pub use selector::{ArtifactSelector, Overrides};
pub use staging::StagingWriter;
pub use walker::{ClassifiedArtifact, DependencyWalker, Origin, WalkStats};
