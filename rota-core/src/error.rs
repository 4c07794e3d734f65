//! Error types for Reviewer Rota

use std::fmt;

use thiserror::Error;

/// Result type alias for Reviewer Rota operations
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Team,
    PullRequest,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Team => write!(f, "team"),
            EntityKind::PullRequest => write!(f, "pull request"),
        }
    }
}

/// Error type for Reviewer Rota operations
#[derive(Error, Debug)]
pub enum Error {
    /// Referenced entity does not exist
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    /// Duplicate identifier on creation
    #[error("{kind} '{id}' already exists")]
    AlreadyExists { kind: EntityKind, id: String },

    /// Reassignment attempted on a merged pull request
    #[error("cannot reassign on merged pull request '{0}'")]
    PrMerged(String),

    /// The reviewer named for replacement is not assigned
    #[error("reviewer '{reviewer}' is not assigned to pull request '{pr}'")]
    NotAssigned { pr: String, reviewer: String },

    /// No eligible replacement exists in the team
    #[error("no active replacement candidate in team for pull request '{0}'")]
    NoCandidate(String),

    /// Store could not be reached
    #[error("repository connection error: {0}")]
    Connection(String),

    /// Store query failed
    #[error("error during query execution: {0}")]
    QueryExecution(String),

    /// Request data failed validation
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn already_exists(kind: EntityKind, id: impl Into<String>) -> Self {
        Error::AlreadyExists {
            kind,
            id: id.into(),
        }
    }

    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "NOT_FOUND",
            Error::AlreadyExists {
                kind: EntityKind::Team,
                ..
            } => "TEAM_EXISTS",
            Error::AlreadyExists {
                kind: EntityKind::PullRequest,
                ..
            } => "PR_EXISTS",
            Error::AlreadyExists { .. } => "ALREADY_EXISTS",
            Error::PrMerged(_) => "PR_MERGED",
            Error::NotAssigned { .. } => "NOT_ASSIGNED",
            Error::NoCandidate(_) => "NO_CANDIDATE",
            Error::InvalidInput(_) => "INVALID_REQUEST",
            Error::Connection(_) | Error::QueryExecution(_) | Error::Config(_) | Error::Io(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Whether the error comes from the store or the environment rather than
    /// from the caller's request
    pub fn is_internal(&self) -> bool {
        self.code() == "INTERNAL_ERROR"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_distinguish_duplicate_kinds() {
        assert_eq!(
            Error::already_exists(EntityKind::Team, "backend").code(),
            "TEAM_EXISTS"
        );
        assert_eq!(
            Error::already_exists(EntityKind::PullRequest, "pr-1").code(),
            "PR_EXISTS"
        );
    }

    #[test]
    fn test_store_failures_are_internal() {
        assert!(Error::Connection("refused".into()).is_internal());
        assert!(Error::QueryExecution("syntax".into()).is_internal());
        assert!(!Error::NoCandidate("pr-1".into()).is_internal());
        assert!(!Error::not_found(EntityKind::User, "u1").is_internal());
    }

    #[test]
    fn test_display() {
        let err = Error::NotAssigned {
            pr: "pr-1".into(),
            reviewer: "u9".into(),
        };
        assert_eq!(
            err.to_string(),
            "reviewer 'u9' is not assigned to pull request 'pr-1'"
        );
        assert_eq!(
            Error::not_found(EntityKind::PullRequest, "pr-2").to_string(),
            "pull request 'pr-2' not found"
        );
    }
}
