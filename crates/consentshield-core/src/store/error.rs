//! Error types for session storage.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("session not found: {session_id}")]
    NotFound { session_id: String },

    /// A session with this id was already started.
    #[error("session already exists: {session_id}")]
    AlreadyExists { session_id: String },

    /// The compare-and-set from pending to completed lost.
    #[error("session already completed: {session_id}")]
    AlreadyCompleted { session_id: String },

    #[error("session store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_already_completed(&self) -> bool {
        matches!(self, Self::AlreadyCompleted { .. })
    }

    /// Suggested exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => 4,
            Self::AlreadyExists { .. } | Self::AlreadyCompleted { .. } => 3,
            Self::Poisoned => 2,
        }
    }
}
