use std::path::Path;

pub fn run(dir: &Path, output: &Path, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let archive = jpackstage_core::publish::create_zip_archive(dir, output, name)?;
    println!("{}", archive.display());
    Ok(())
}
