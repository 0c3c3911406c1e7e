//! Course advising catalog.
//!
//! Courses live in an unbalanced binary search tree keyed by course id
//! ([`domain::CourseTree`]). A course cannot be deleted while another course
//! lists it as a prerequisite.
//!
//! Layers, innermost first: `domain` (records and the tree), `application`
//! (catalog service: CSV ingestion, validated add/delete), `infrastructure`
//! (filesystem boundary, wiring) and `cli` (arguments, menu, output).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
