pub mod error;
pub mod graph;
pub mod introspect;
pub mod models;
pub mod toolchain;

// Re-export commonly used types
pub use error::{Result, StageError};
pub use graph::{DependencyResolver, DescriptorState, NodeIter, ResolvedNode};
pub use introspect::{ManifestReader, ModuleIntrospector};
pub use models::*;
pub use toolchain::ToolLocator;
