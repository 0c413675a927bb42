//! Module-system metadata readers.

use crate::models::ModuleDescriptor;
use std::path::Path;

/// Reports what the module system would make of a jar.
pub trait ModuleIntrospector {
    /// `Ok(None)` means the artifact carries no module information and
    /// no usable module name can be derived for it.
    fn describe(&self, path: &Path) -> std::io::Result<Option<ModuleDescriptor>>;
}

/// Reads the main attributes of a jar manifest.
pub trait ManifestReader {
    /// Value of the `Automatic-Module-Name` main attribute, if declared.
    ///
    /// A jar without a manifest yields `Ok(None)`. An unreadable or corrupt
    /// jar yields an error.
    fn automatic_module_name(&self, jar: &Path) -> std::io::Result<Option<String>>;
}
