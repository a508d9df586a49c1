//! Persistence-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing durable storage.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Home directory could not be located
    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// Storage directory could not be created
    #[error("Failed to create storage directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Snapshot could not be serialized
    #[error("Failed to serialize snapshot: {0}")]
    SerializationFailed(String),

    /// Storage entry could not be written
    #[error("Failed to write storage entry {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_error_display() {
        let error = PersistError::HomeDirectoryNotFound;
        assert!(error.to_string().contains("Home directory"));

        let error = PersistError::SerializationFailed("bad value".to_string());
        assert!(error.to_string().contains("serialize"));

        let error = PersistError::WriteFailed {
            path: PathBuf::from("/tmp/pulse/ui-state.yml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.to_string().contains("ui-state.yml"));
    }
}
