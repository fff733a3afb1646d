use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiskpartError {
    #[error("Failed to write command script: {0}")]
    ScriptFile(#[from] std::io::Error),

    #[error("Failed to run {}: {source}", .utility.display())]
    Spawn {
        utility: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Utility reported an error: {0}")]
    Utility(String),
}

impl DiskpartError {
    /// Wraps captured stderr. Only non-empty stderr counts as a failure.
    pub fn from_stderr(stderr: &str) -> Option<Self> {
        if stderr.is_empty() {
            None
        } else {
            Some(DiskpartError::Utility(stderr.trim_end().to_string()))
        }
    }
}
