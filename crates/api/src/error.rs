use std::path::PathBuf;

/// Every failure the collect step can surface. All of them are fatal for
/// the invocation that produced them.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("Dependency graph resolution failed: {0}")]
    GraphResolution(String),

    #[error("Error reading manifest of {artifact} ({}): {source}", .path.display())]
    ManifestRead {
        artifact: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory can not be created: {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failure during copying of {artifact} from {} to {}: {source}", .source_path.display(), .target_path.display())]
    Staging {
        artifact: String,
        source_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The {tool} executable could not be located: {reason}")]
    ToolNotFound { tool: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Publishing {} failed: {source}", .path.display())]
    Publish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StageError {
    pub fn graph(message: impl Into<String>) -> Self {
        StageError::GraphResolution(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        StageError::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, StageError>;
