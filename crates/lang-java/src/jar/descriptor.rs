//! Compiled module descriptor (`module-info.class`) detection.

use ristretto_classfile::{ClassAccessFlags, ClassFile};
use std::fs::File;
use std::io::Cursor;
use zip::ZipArchive;

pub const MODULE_INFO: &str = "module-info.class";
const VERSIONS_PREFIX: &str = "META-INF/versions/";

/// Entry name of the descriptor the module system would pick up.
///
/// The root entry wins; versioned entries are only honored for multi-release
/// jars, the highest release first.
pub fn find_module_info(archive: &ZipArchive<File>, multi_release: bool) -> Option<String> {
    if archive.index_for_name(MODULE_INFO).is_some() {
        return Some(MODULE_INFO.to_string());
    }
    if !multi_release {
        return None;
    }

    archive
        .file_names()
        .filter_map(|name| {
            let release = name
                .strip_prefix(VERSIONS_PREFIX)?
                .strip_suffix(MODULE_INFO)?
                .strip_suffix('/')?;
            release.parse::<u32>().ok().map(|r| (r, name))
        })
        .max_by_key(|(release, _)| *release)
        .map(|(_, name)| name.to_string())
}

/// Checks that the class bytes really declare a module.
pub fn verify_module_info(bytes: &[u8]) -> Result<(), String> {
    let class = ClassFile::from_bytes(&mut Cursor::new(bytes.to_vec()))
        .map_err(|e| format!("malformed class file: {e:?}"))?;

    if class.access_flags.contains(ClassAccessFlags::MODULE) {
        Ok(())
    } else {
        Err("class is not a module descriptor".to_string())
    }
}
