//! JDK tool location.
//!
//! Finds toolchain executables from:
//! - an explicit JDK home (toolchain override)
//! - JAVA_HOME environment variable
//! - Common installation paths
//! - SDKMAN

use jpackstage_api::{Result, StageError, ToolLocator};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Locates `java`, `jlink`, `jpackage` and friends inside a JDK.
#[derive(Debug, Clone)]
pub struct JdkToolLocator {
    jdk_home: Option<PathBuf>,
    java_home_env: Option<PathBuf>,
    search_roots: Vec<PathBuf>,
}

impl JdkToolLocator {
    pub fn new() -> Self {
        Self {
            jdk_home: None,
            java_home_env: std::env::var_os("JAVA_HOME")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            search_roots: default_search_roots(),
        }
    }

    /// Pins the JDK; tools missing from it are not looked up elsewhere.
    pub fn with_jdk_home(mut self, jdk_home: Option<PathBuf>) -> Self {
        self.jdk_home = jdk_home;
        self
    }

    /// Create with explicit lookup locations (for testing)
    pub fn with_locations(java_home_env: Option<PathBuf>, search_roots: Vec<PathBuf>) -> Self {
        Self {
            jdk_home: None,
            java_home_env,
            search_roots,
        }
    }

    fn tool_in(home: &Path, tool: &str) -> Option<PathBuf> {
        let exe = home.join("bin").join(executable_name(tool));
        if exe.is_file() { Some(exe) } else { None }
    }

    fn search(&self, tool: &str) -> Option<PathBuf> {
        for root in &self.search_roots {
            if !root.is_dir() {
                continue;
            }

            // If root itself is a JDK (e.g. Homebrew symlink)
            if let Some(exe) = Self::tool_in(root, tool) {
                return Some(exe);
            }

            // If root is a parent directory containing multiple SDKs
            let Ok(entries) = std::fs::read_dir(root) else {
                continue;
            };
            let mut candidates: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
            candidates.sort();
            for mut sdk_path in candidates.into_iter().rev() {
                if cfg!(target_os = "macos") && sdk_path.join("Contents/Home").exists() {
                    sdk_path.push("Contents/Home");
                }
                if let Some(exe) = Self::tool_in(&sdk_path, tool) {
                    return Some(exe);
                }
            }
        }
        None
    }
}

impl Default for JdkToolLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolLocator for JdkToolLocator {
    fn locate(&self, tool: &str) -> Result<PathBuf> {
        if let Some(home) = &self.jdk_home {
            return Self::tool_in(home, tool).ok_or_else(|| StageError::ToolNotFound {
                tool: tool.to_string(),
                reason: format!(
                    "'{}' doesn't exist or is not a file",
                    home.join("bin").join(executable_name(tool)).display()
                ),
            });
        }

        if let Some(java_home) = &self.java_home_env {
            if let Some(exe) = Self::tool_in(java_home, tool) {
                debug!("Found {} via JAVA_HOME: {}", tool, exe.display());
                return Ok(exe);
            }
        }

        if let Some(exe) = self.search(tool) {
            debug!("Found {} in installation paths: {}", tool, exe.display());
            return Ok(exe);
        }

        let reason = match &self.java_home_env {
            Some(home) => format!(
                "not found in JAVA_HOME={} or any known JDK installation",
                home.display()
            ),
            None => "the environment variable JAVA_HOME is not set and no JDK installation was found"
                .to_string(),
        };
        Err(StageError::ToolNotFound {
            tool: tool.to_string(),
            reason,
        })
    }
}

fn executable_name(tool: &str) -> String {
    if cfg!(windows) && !tool.contains('.') {
        format!("{}.exe", tool)
    } else {
        tool.to_string()
    }
}

fn default_search_roots() -> Vec<PathBuf> {
    let mut search_roots = Vec::new();

    #[cfg(target_os = "macos")]
    {
        search_roots.push(PathBuf::from("/Library/Java/JavaVirtualMachines/"));
        search_roots.push(PathBuf::from("/opt/homebrew/opt/openjdk/"));
        search_roots.push(PathBuf::from("/usr/local/opt/openjdk/"));
    }
    #[cfg(target_os = "linux")]
    {
        search_roots.push(PathBuf::from("/usr/lib/jvm/"));
    }
    #[cfg(target_os = "windows")]
    {
        search_roots.push(PathBuf::from("C:\\Program Files\\Java\\"));
    }

    // SDKMAN
    if let Some(mut sdkman) = dirs::home_dir() {
        sdkman.push(".sdkman/candidates/java/");
        search_roots.push(sdkman);
    }

    search_roots
}

/// Modules of the JDK's run-time image, as reported by `java --list-modules`.
pub fn list_system_modules(java: &Path) -> Result<Vec<String>> {
    let output = Command::new(java).arg("--list-modules").output()?;
    if !output.status.success() {
        return Err(StageError::Io(std::io::Error::other(format!(
            "{} --list-modules exited with {}: {}",
            java.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ))));
    }
    Ok(parse_module_list(&String::from_utf8_lossy(&output.stdout)))
}

/// One module per line, `name@version`; the version is dropped.
pub fn parse_module_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.find('@') {
            Some(i) if i > 0 => line[..i].to_string(),
            _ => line.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_jdk(root: &Path, tools: &[&str]) {
        let bin = root.join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        for tool in tools {
            std::fs::File::create(bin.join(executable_name(tool))).unwrap();
        }
    }

    #[test]
    fn test_explicit_jdk_home() {
        let temp = tempfile::tempdir().unwrap();
        fake_jdk(temp.path(), &["jlink"]);

        let locator = JdkToolLocator::with_locations(None, vec![])
            .with_jdk_home(Some(temp.path().to_path_buf()));
        let exe = locator.locate("jlink").unwrap();
        assert_eq!(exe, temp.path().join("bin").join(executable_name("jlink")));

        let err = locator.locate("jpackage").unwrap_err();
        assert!(matches!(err, StageError::ToolNotFound { ref tool, .. } if tool == "jpackage"));
    }

    #[test]
    fn test_java_home_before_search_roots() {
        let home = tempfile::tempdir().unwrap();
        let roots = tempfile::tempdir().unwrap();
        fake_jdk(home.path(), &["java"]);
        fake_jdk(&roots.path().join("jdk-21"), &["java"]);

        let locator = JdkToolLocator::with_locations(
            Some(home.path().to_path_buf()),
            vec![roots.path().to_path_buf()],
        );
        assert!(locator.locate("java").unwrap().starts_with(home.path()));
    }

    #[test]
    fn test_search_roots_prefer_newest_install() {
        let roots = tempfile::tempdir().unwrap();
        fake_jdk(&roots.path().join("jdk-17"), &["jpackage"]);
        fake_jdk(&roots.path().join("jdk-21"), &["jpackage"]);

        let locator = JdkToolLocator::with_locations(None, vec![roots.path().to_path_buf()]);
        let exe = locator.locate("jpackage").unwrap();
        assert!(exe.starts_with(roots.path().join("jdk-21")));
    }

    #[test]
    fn test_not_found() {
        let locator = JdkToolLocator::with_locations(None, vec![]);
        let err = locator.locate("jlink").unwrap_err();
        assert!(err.to_string().contains("JAVA_HOME is not set"));
    }

    #[test]
    fn test_parse_module_list() {
        let out = "java.base@21.0.2\njava.logging@21.0.2\n\njdk.jfr\n";
        assert_eq!(
            parse_module_list(out),
            vec!["java.base", "java.logging", "jdk.jfr"]
        );
    }
}
