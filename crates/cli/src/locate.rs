use std::path::PathBuf;

pub fn run(tool: &str, jdk_home: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let locator = jpackstage_runtime::build_tool_locator(jdk_home);
    let path = locator.locate(tool)?;
    println!("{}", path.display());
    Ok(())
}
