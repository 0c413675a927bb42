//! Resolver over a directory of jars.
//!
//! Accepts a flat `lib/` directory as well as a Maven repository layout:
//! `{group path}/{artifact}/{version}/{artifact}-{version}[-{classifier}].jar`

use jpackstage_api::{
    ArtifactCoordinates, DependencyResolver, ModuleDescriptor, ModuleIntrospector, NodeIter,
    ResolvedArtifact, ResolvedNode, StageError,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

static NAME_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<artifact>.+?)-(?P<version>\d[\w.\-+]*)$").unwrap());

pub struct DirectoryResolver {
    root: PathBuf,
    introspector: Arc<dyn ModuleIntrospector>,
}

impl DirectoryResolver {
    pub fn new(root: PathBuf, introspector: Arc<dyn ModuleIntrospector>) -> Self {
        Self { root, introspector }
    }

    /// Derive coordinates from the jar's location below the root.
    fn coordinates_for(&self, path: &Path) -> ArtifactCoordinates {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let stem = file_name.strip_suffix(".jar").unwrap_or(file_name);

        if let Some(coordinates) = self.repository_coordinates(path, stem) {
            return coordinates;
        }

        match NAME_VERSION.captures(stem) {
            Some(caps) => ArtifactCoordinates {
                group_id: String::new(),
                artifact_id: caps["artifact"].to_string(),
                version: Some(caps["version"].to_string()),
                classifier: None,
                extension: "jar".to_string(),
            },
            None => ArtifactCoordinates::local(stem),
        }
    }

    fn repository_coordinates(&self, path: &Path, stem: &str) -> Option<ArtifactCoordinates> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let components: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();

        // Expected: group.../artifact/version/file.jar
        if components.len() < 4 {
            return None;
        }
        let n = components.len();
        let artifact = &components[n - 3];
        let version = &components[n - 2];

        let rest = stem.strip_prefix(&format!("{}-{}", artifact, version))?;
        let classifier = match rest {
            "" => None,
            r => Some(r.strip_prefix('-')?.to_string()),
        };

        Some(ArtifactCoordinates {
            group_id: components[..n - 3].join("."),
            artifact_id: artifact.clone(),
            version: Some(version.clone()),
            classifier,
            extension: "jar".to_string(),
        })
    }
}

fn is_binary_jar(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    name.ends_with(".jar") && !name.ends_with("-sources.jar") && !name.ends_with("-javadoc.jar")
}

impl DependencyResolver for DirectoryResolver {
    fn resolve(&self) -> jpackstage_api::Result<NodeIter<'_>> {
        if !self.root.is_dir() {
            return Err(StageError::graph(format!(
                "library directory {} does not exist",
                self.root.display()
            )));
        }

        Ok(Box::new(
            WalkDir::new(&self.root)
                .sort_by_file_name()
                .into_iter()
                .filter(|entry| match entry {
                    Ok(e) => e.file_type().is_file() && is_binary_jar(e.path()),
                    Err(_) => true,
                })
                .map(move |entry| -> jpackstage_api::Result<ResolvedNode> {
                    let entry = entry.map_err(|e| {
                        StageError::graph(format!(
                            "cannot walk library directory {}: {}",
                            self.root.display(),
                            e
                        ))
                    })?;
                    let path = entry.into_path();
                    let coordinates = self.coordinates_for(&path);
                    Ok(ResolvedNode::deferred(ResolvedArtifact::from_path(
                        coordinates,
                        path,
                    )))
                }),
        ))
    }

    fn describe(
        &self,
        artifact: &ResolvedArtifact,
    ) -> jpackstage_api::Result<Option<ModuleDescriptor>> {
        crate::introspect(self.introspector.as_ref(), artifact)
    }

    fn name(&self) -> &str {
        "Library Directory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpackstage_api::DescriptorState;
    use std::fs;
    use std::io;

    struct NoModules;

    impl ModuleIntrospector for NoModules {
        fn describe(&self, _path: &Path) -> io::Result<Option<ModuleDescriptor>> {
            Ok(None)
        }
    }

    struct Unreadable;

    impl ModuleIntrospector for Unreadable {
        fn describe(&self, path: &Path) -> io::Result<Option<ModuleDescriptor>> {
            Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is not a zip archive", path.display()),
            ))
        }
    }

    #[test]
    fn test_repository_layout_coordinates() {
        let temp = tempfile::tempdir().unwrap();
        let resolver = DirectoryResolver::new(temp.path().to_path_buf(), Arc::new(NoModules));

        let jar = temp
            .path()
            .join("com/google/guava/guava/31.1-jre/guava-31.1-jre.jar");
        let coords = resolver.coordinates_for(&jar);
        assert_eq!(coords.group_id, "com.google.guava");
        assert_eq!(coords.artifact_id, "guava");
        assert_eq!(coords.version.as_deref(), Some("31.1-jre"));
        assert_eq!(coords.classifier, None);

        let natives = temp
            .path()
            .join("org/openjfx/javafx-base/21/javafx-base-21-linux.jar");
        let coords = resolver.coordinates_for(&natives);
        assert_eq!(coords.group_id, "org.openjfx");
        assert_eq!(coords.classifier.as_deref(), Some("linux"));
    }

    #[test]
    fn test_flat_directory_coordinates() {
        let temp = tempfile::tempdir().unwrap();
        let resolver = DirectoryResolver::new(temp.path().to_path_buf(), Arc::new(NoModules));

        let coords = resolver.coordinates_for(&temp.path().join("lib-a-1.2.3.jar"));
        assert_eq!(coords.artifact_id, "lib-a");
        assert_eq!(coords.version.as_deref(), Some("1.2.3"));

        let coords = resolver.coordinates_for(&temp.path().join("tools.jar"));
        assert_eq!(coords, ArtifactCoordinates::local("tools"));
    }

    #[test]
    fn test_walk_skips_sources_and_orders_by_name() {
        let temp = tempfile::tempdir().unwrap();
        for name in ["b.jar", "a.jar", "a-sources.jar", "a-javadoc.jar", "notes.txt"] {
            fs::write(temp.path().join(name), b"x").unwrap();
        }
        fs::create_dir(temp.path().join("classes.jar")).unwrap();

        let resolver = DirectoryResolver::new(temp.path().to_path_buf(), Arc::new(NoModules));
        let names: Vec<String> = resolver
            .resolve()
            .unwrap()
            .map(|node| node.unwrap().artifact.coordinates.artifact_id)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_walk_does_not_open_jars() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("broken-1.0.jar"), b"not a zip").unwrap();

        let resolver = DirectoryResolver::new(temp.path().to_path_buf(), Arc::new(Unreadable));
        let node = resolver.resolve().unwrap().next().unwrap().unwrap();
        assert_eq!(node.descriptor, DescriptorState::Deferred);

        assert!(matches!(
            resolver.describe(&node.artifact),
            Err(StageError::GraphResolution(_))
        ));
    }

    #[test]
    fn test_missing_directory() {
        let resolver =
            DirectoryResolver::new(PathBuf::from("/nonexistent/lib"), Arc::new(NoModules));
        assert!(matches!(
            resolver.resolve().err().unwrap(),
            StageError::GraphResolution(_)
        ));
    }
}
