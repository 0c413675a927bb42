use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the name of an automatic module came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameSource {
    /// `Automatic-Module-Name` manifest attribute
    Manifest,
    /// Derived from the jar file name
    FileName,
}

/// Module information of an artifact as reported by the module system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: Option<String>,
    /// True when synthesized for a jar without a compiled `module-info`.
    pub automatic: bool,
    pub name_source: Option<NameSource>,
}

impl ModuleDescriptor {
    pub fn explicit(name: Option<String>) -> Self {
        Self {
            name,
            automatic: false,
            name_source: None,
        }
    }

    pub fn automatic(name: impl Into<String>, source: NameSource) -> Self {
        Self {
            name: Some(name.into()),
            automatic: true,
            name_source: Some(source),
        }
    }

    /// A descriptor reported by the build without further detail.
    pub fn declared(name: Option<String>, automatic: bool) -> Self {
        Self {
            name,
            automatic,
            name_source: None,
        }
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic
    }
}

/// The bucket an artifact is staged into. Total and mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    NamedModule,
    AutomaticModule,
    ClasspathJar,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::NamedModule,
        Category::AutomaticModule,
        Category::ClasspathJar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::NamedModule => "named-module",
            Category::AutomaticModule => "automatic-module",
            Category::ClasspathJar => "classpath-jar",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far the module system's "automatic" verdict is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationPolicy {
    /// Only jars that declare `Automatic-Module-Name` in their manifest
    /// are staged as automatic modules; the rest go to the classpath.
    pub only_named_are_automatic: bool,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            only_named_are_automatic: true,
        }
    }
}
