pub mod jar;
pub mod jdk;
pub mod naming;

pub use jar::JarInspector;
pub use jar::manifest::Manifest;
pub use jdk::{JdkToolLocator, list_system_modules};
pub use naming::derive_automatic_module_name;
