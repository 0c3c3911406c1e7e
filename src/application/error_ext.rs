//! Attach the course file path to I/O failures

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Turn an I/O error into [`ApplicationError::OperationFailed`] whose
    /// context reads `"<action>: <path>"`, keeping the I/O error as source.
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{action}: {}", path.display()),
            source: Box::new(e),
        })
    }
}
