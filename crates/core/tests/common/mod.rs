#![allow(dead_code)]

use jpackstage_api::{
    ArtifactCoordinates, DependencyResolver, ModuleDescriptor, NameSource, NodeIter,
    ResolvedArtifact, ResolvedNode, Result, StageError,
};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes a jar at `dir/name`. With `automatic_name` the manifest carries
/// an `Automatic-Module-Name` attribute.
pub fn write_jar(dir: &Path, name: &str, automatic_name: Option<&str>) -> PathBuf {
    let path = dir.join(name);
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    let options = zip::write::SimpleFileOptions::default();

    let mut manifest = String::from("Manifest-Version: 1.0\n");
    if let Some(module) = automatic_name {
        manifest.push_str(&format!("Automatic-Module-Name: {}\n", module));
    }
    zip.start_file("META-INF/MANIFEST.MF", options).unwrap();
    zip.write_all(manifest.as_bytes()).unwrap();

    zip.start_file(format!("{}/Main.class", name.trim_end_matches(".jar")), options)
        .unwrap();
    zip.write_all(b"\xCA\xFE\xBA\xBE").unwrap();
    zip.finish().unwrap();
    path
}

pub fn node(artifact_id: &str, path: PathBuf, descriptor: Option<ModuleDescriptor>) -> ResolvedNode {
    ResolvedNode::new(
        ResolvedArtifact::from_path(ArtifactCoordinates::new("org.example", artifact_id, "1.0"), path),
        descriptor,
    )
}

pub fn automatic(name: &str) -> Option<ModuleDescriptor> {
    Some(ModuleDescriptor::automatic(name, NameSource::FileName))
}

pub fn explicit(name: &str) -> Option<ModuleDescriptor> {
    Some(ModuleDescriptor::explicit(Some(name.to_string())))
}

/// Serves a fixed graph in traversal order.
pub struct StaticGraph {
    nodes: Vec<ResolvedNode>,
}

impl StaticGraph {
    pub fn new(nodes: Vec<ResolvedNode>) -> Self {
        Self { nodes }
    }
}

impl DependencyResolver for StaticGraph {
    fn resolve(&self) -> Result<NodeIter<'_>> {
        Ok(Box::new(self.nodes.iter().cloned().map(Ok::<ResolvedNode, StageError>)))
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// File names in `dir`, sorted; empty when the directory does not exist.
pub fn listing(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
