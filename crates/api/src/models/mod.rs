pub mod artifact;
pub mod layout;
pub mod module;

pub use artifact::{ArtifactCoordinates, ResolvedArtifact};
pub use layout::{OutputLayout, StagingResult};
pub use module::{Category, ClassificationPolicy, ModuleDescriptor, NameSource};
