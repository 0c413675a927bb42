use jpackstage_api::{Result, StageError};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

/// Zips the tree under `dir_to_zip` into `<output_dir>/<final_name>.zip`.
///
/// Entry names are relative to `dir_to_zip` and use `/` separators.
pub fn create_zip_archive(dir_to_zip: &Path, output_dir: &Path, final_name: &str) -> Result<PathBuf> {
    if final_name.trim().is_empty() {
        return Err(StageError::config("archive name must not be empty"));
    }
    if !dir_to_zip.is_dir() {
        return Err(StageError::config(format!(
            "{} is not a directory",
            dir_to_zip.display()
        )));
    }

    let archive = output_dir.join(format!("{}.zip", final_name));
    write_archive(dir_to_zip, output_dir, &archive).map_err(|source| StageError::Publish {
        path: archive.clone(),
        source,
    })?;

    info!("Created archive {} from {}", archive.display(), dir_to_zip.display());
    Ok(archive)
}

fn write_archive(dir_to_zip: &Path, output_dir: &Path, archive: &Path) -> io::Result<()> {
    std::fs::create_dir_all(output_dir)?;
    let mut zip = zip::ZipWriter::new(File::create(archive)?);
    let options = SimpleFileOptions::default();

    for entry in WalkDir::new(dir_to_zip).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::other)?;
        let path = entry.path();
        // The archive may be written inside the tree it packs
        if path == archive {
            continue;
        }

        let relative = path
            .strip_prefix(dir_to_zip)
            .map_err(io::Error::other)?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", relative), options)
                .map_err(zip_to_io)?;
        } else {
            zip.start_file(relative, options).map_err(zip_to_io)?;
            io::copy(&mut File::open(path)?, &mut zip)?;
        }
    }

    zip.finish().map_err(zip_to_io)?;
    Ok(())
}

fn zip_to_io(err: zip::result::ZipError) -> io::Error {
    match err {
        zip::result::ZipError::Io(e) => e,
        other => io::Error::other(other),
    }
}
