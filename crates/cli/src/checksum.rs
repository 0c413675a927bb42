use std::path::Path;

pub fn run(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let out = jpackstage_core::publish::publish_sha256(file)?;
    println!("{}", out.display());
    Ok(())
}
