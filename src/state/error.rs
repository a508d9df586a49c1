//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Board list has not been loaded yet
    #[error("No boards loaded in state")]
    #[allow(dead_code)]
    NoBoardsLoaded,

    /// Board not found in state
    #[error("Board not found: {gid}")]
    #[allow(dead_code)]
    BoardNotFound { gid: String },

    /// Generic state error
    #[error("State error: {0}")]
    #[allow(dead_code)]
    Other(String),
}
