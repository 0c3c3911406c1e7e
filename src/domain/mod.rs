//! Domain layer: entities and the course tree
//!
//! This layer is independent of external concerns (no files, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod tree;

pub use entities::{Course, IdCase, FIELD_SEPARATOR};
pub use error::{DomainError, DomainResult};
pub use tree::{CourseTree, InOrder};
