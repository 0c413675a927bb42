use jpackstage_api::{DependencyResolver, DescriptorState, NameSource, ResolvedNode};
use jpackstage_graph::{DirectoryResolver, ListingResolver};
use jpackstage_java::JarInspector;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

fn write_jar(path: &Path, automatic_name: Option<&str>) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    let mut manifest = String::from("Manifest-Version: 1.0\r\n");
    if let Some(name) = automatic_name {
        manifest.push_str(&format!("Automatic-Module-Name: {}\r\n", name));
    }
    zip.start_file("META-INF/MANIFEST.MF", options).unwrap();
    zip.write_all(manifest.as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn collect(resolver: &dyn DependencyResolver) -> Vec<ResolvedNode> {
    resolver
        .resolve()
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn test_maven_repository_layout() {
    let temp = tempfile::tempdir().unwrap();
    let repo = temp.path();
    write_jar(
        &repo.join("com/example/app-core/1.0/app-core-1.0.jar"),
        Some("com.example.core"),
    );
    write_jar(&repo.join("com/example/app-core/1.0/app-core-1.0-sources.jar"), None);
    write_jar(&repo.join("org/slf4j/slf4j-api/2.0.9/slf4j-api-2.0.9.jar"), None);

    let resolver = DirectoryResolver::new(repo.to_path_buf(), Arc::new(JarInspector));
    let nodes = collect(&resolver);
    assert_eq!(nodes.len(), 2);

    let core = &nodes[0];
    assert_eq!(core.artifact.coordinates.to_string(), "com.example:app-core:1.0");
    let descriptor = resolver.describe(&core.artifact).unwrap().unwrap();
    assert!(descriptor.is_automatic());
    assert_eq!(descriptor.name.as_deref(), Some("com.example.core"));
    assert_eq!(descriptor.name_source, Some(NameSource::Manifest));

    let slf4j = &nodes[1];
    assert_eq!(slf4j.artifact.coordinates.to_string(), "org.slf4j:slf4j-api:2.0.9");
    let descriptor = resolver.describe(&slf4j.artifact).unwrap().unwrap();
    assert_eq!(descriptor.name.as_deref(), Some("slf4j.api"));
    assert_eq!(descriptor.name_source, Some(NameSource::FileName));
}

#[test]
fn test_listing_falls_back_to_jar_inspection() {
    let temp = tempfile::tempdir().unwrap();
    write_jar(&temp.path().join("libs/lib-b-1.0.jar"), Some("lib.b"));
    write_jar(&temp.path().join("libs/lib-a.jar"), None);
    let listing = temp.path().join("dependencies.json");
    fs::write(
        &listing,
        r#"{
            "artifacts": [
                { "coordinates": "org.example:lib-b:1.0", "path": "libs/lib-b-1.0.jar" },
                { "coordinates": "org.example:lib-a:1.0", "path": "libs/lib-a.jar", "module": "none" }
            ]
        }"#,
    )
    .unwrap();

    let resolver = ListingResolver::new(listing, Arc::new(JarInspector));
    let nodes = collect(&resolver);
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].descriptor, DescriptorState::Deferred);
    assert_eq!(
        resolver
            .describe(&nodes[0].artifact)
            .unwrap()
            .and_then(|d| d.name),
        Some("lib.b".to_string())
    );
    assert!(nodes[0].artifact.regular_file);
    assert_eq!(nodes[1].descriptor, DescriptorState::Known(None));
}

#[test]
fn test_corrupt_jar_fails_only_when_described() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("broken-1.0.jar"), b"not a zip").unwrap();
    write_jar(&temp.path().join("lib-a-1.0.jar"), None);

    let resolver = DirectoryResolver::new(temp.path().to_path_buf(), Arc::new(JarInspector));
    let nodes = collect(&resolver);
    assert_eq!(nodes.len(), 2);
    assert!(resolver.describe(&nodes[0].artifact).is_err());
    assert!(resolver.describe(&nodes[1].artifact).is_ok());
}
