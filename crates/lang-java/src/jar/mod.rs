//! Jar inspection: manifest and module descriptor discovery.

pub mod descriptor;
pub mod manifest;

use crate::naming::derive_automatic_module_name;
use jpackstage_api::{ManifestReader, ModuleDescriptor, ModuleIntrospector, NameSource};
use manifest::{MANIFEST_PATH, Manifest};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

/// Reads module-system metadata straight out of jar files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JarInspector;

impl JarInspector {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> io::Result<ZipArchive<File>> {
        let file = File::open(path)?;
        ZipArchive::new(file).map_err(zip_to_io)
    }

    /// Main manifest of the jar, `None` if it has no manifest entry.
    pub fn read_manifest(&self, path: &Path) -> io::Result<Option<Manifest>> {
        let mut archive = Self::open(path)?;
        Self::manifest_from(&mut archive)
    }

    fn manifest_from(archive: &mut ZipArchive<File>) -> io::Result<Option<Manifest>> {
        let name = if archive.index_for_name(MANIFEST_PATH).is_some() {
            MANIFEST_PATH.to_string()
        } else {
            // Some tools write the entry with odd casing
            match archive
                .file_names()
                .find(|n| n.eq_ignore_ascii_case(MANIFEST_PATH))
            {
                Some(n) => n.to_string(),
                None => return Ok(None),
            }
        };

        let bytes = read_entry(archive, &name)?;
        Ok(Some(Manifest::parse(&bytes)))
    }
}

impl ModuleIntrospector for JarInspector {
    fn describe(&self, path: &Path) -> io::Result<Option<ModuleDescriptor>> {
        if !path.is_file() {
            return Ok(None);
        }

        let mut archive = Self::open(path)?;
        let manifest = Self::manifest_from(&mut archive)?;
        let multi_release = manifest.as_ref().is_some_and(Manifest::is_multi_release);

        if let Some(entry) = descriptor::find_module_info(&archive, multi_release) {
            let bytes = read_entry(&mut archive, &entry)?;
            descriptor::verify_module_info(&bytes).map_err(|reason| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{} in {}: {}", entry, path.display(), reason),
                )
            })?;
            debug!("{} carries explicit descriptor {}", path.display(), entry);
            return Ok(Some(ModuleDescriptor::explicit(None)));
        }

        if let Some(name) = manifest.as_ref().and_then(Manifest::automatic_module_name) {
            return Ok(Some(ModuleDescriptor::automatic(name, NameSource::Manifest)));
        }

        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        Ok(derive_automatic_module_name(file_name)
            .map(|name| ModuleDescriptor::automatic(name, NameSource::FileName)))
    }
}

impl ManifestReader for JarInspector {
    fn automatic_module_name(&self, jar: &Path) -> io::Result<Option<String>> {
        Ok(self
            .read_manifest(jar)?
            .and_then(|m| m.automatic_module_name().map(str::to_string)))
    }
}

fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> io::Result<Vec<u8>> {
    let mut entry = archive.by_name(name).map_err(zip_to_io)?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}

pub(crate) fn zip_to_io(err: ZipError) -> io::Error {
    match err {
        ZipError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}
