//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent catalog rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0} doesn't exist")]
    CourseNotFound(String),

    #[error("can not delete {id}: it is a prerequisite to {}", dependents.join(", "))]
    DependencyConflict { id: String, dependents: Vec<String> },

    #[error("course id must not be empty")]
    EmptyCourseId,

    #[error("malformed course row: {0}")]
    MalformedRow(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
