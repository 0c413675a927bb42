use std::path::PathBuf;
use tracing::info;

pub fn run(jdk_home: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let java = jpackstage_runtime::build_tool_locator(jdk_home).locate("java")?;
    info!("Listing system modules of {}", java.display());

    for module in jpackstage_java::list_system_modules(&java)? {
        println!("{}", module);
    }
    Ok(())
}
