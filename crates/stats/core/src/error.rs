//! Error types and classification for the stat crate.
//!
//! Missing data is never an error here: lookups return fallbacks or `Option`.
//! Errors are reserved for rejected registry mutations.

use crate::id::StatId;

/// Severity classification for stat errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The caller can recover by choosing another operation (e.g. update instead of register).
    Recoverable,
    /// The input data is malformed and was rejected.
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all stat-core errors.
pub trait StatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Errors surfaced by [`crate::StatRepository`] mutations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("stat {id} is already registered; use update to modify it")]
    Duplicate { id: StatId },

    #[error("stat {id} is not registered")]
    NotFound { id: StatId },

    #[error("stat {id} has an invalid range: min {min} is greater than max {max}")]
    InvalidRange { id: StatId, min: f32, max: f32 },
}

impl StatError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Duplicate { .. } | Self::NotFound { .. } => ErrorSeverity::Recoverable,
            Self::InvalidRange { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate { .. } => "REPOSITORY_DUPLICATE",
            Self::NotFound { .. } => "REPOSITORY_NOT_FOUND",
            Self::InvalidRange { .. } => "REPOSITORY_INVALID_RANGE",
        }
    }
}

impl RepositoryError {
    /// The stat id the error refers to.
    pub const fn id(&self) -> StatId {
        match self {
            Self::Duplicate { id } | Self::NotFound { id } | Self::InvalidRange { id, .. } => *id,
        }
    }
}

pub type Result<T> = core::result::Result<T, RepositoryError>;
