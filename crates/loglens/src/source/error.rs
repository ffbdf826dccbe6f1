use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// File acquisition failures, each distinguishable by the caller.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Log file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported file type: {} (expected a text log)", .0.display())]
    UnsupportedExtension(PathBuf),
    #[error("Log file is empty: {}", .0.display())]
    Empty(PathBuf),
    #[error("Could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            SourceError::NotFound(path)
            | SourceError::UnsupportedExtension(path)
            | SourceError::Empty(path)
            | SourceError::Unreadable { path, .. } => path,
        }
    }
}
