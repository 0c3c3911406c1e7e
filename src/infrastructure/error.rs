//! Errors raised outside the catalog itself: terminal sessions and process setup

use thiserror::Error;

use crate::application::ApplicationError;

/// Catalog failures plus I/O on the process boundary.
///
/// Course file reads are not in here: they fail inside the catalog service and
/// arrive as [`ApplicationError::OperationFailed`].
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Reading the menu input, writing its output or resolving the working directory
    #[error("{step} failed: {source}")]
    Io {
        step: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn io(step: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            step: step.into(),
            source,
        }
    }
}
