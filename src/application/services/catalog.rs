//! Course catalog service
//!
//! Owns the course tree and implements the two ways records get into it:
//! CSV ingestion and interactive add. Both normalize ids with the configured
//! [`IdCase`] so lookups typed by a user match what was loaded from disk.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Course, CourseTree, DomainError, IdCase, InOrder};
use crate::infrastructure::traits::FileSystem;

/// A course as entered by a user, before normalization and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddCourse {
    pub id: String,
    pub name: String,
    pub prereq1: Option<String>,
    pub prereq2: Option<String>,
}

/// A CSV row that could not be turned into a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number in the source
    pub line_number: usize,
    pub line: String,
    pub reason: DomainError,
}

/// Outcome of loading a course file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows inserted into the tree
    pub loaded: usize,
    pub rejected: Vec<RejectedRow>,
}

/// Service managing the in-memory course catalog.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    id_case: IdCase,
    tree: CourseTree,
}

impl CatalogService {
    /// Create a service with an empty catalog.
    pub fn new(fs: Arc<dyn FileSystem>, id_case: IdCase) -> Self {
        Self {
            fs,
            id_case,
            tree: CourseTree::new(),
        }
    }

    pub fn id_case(&self) -> IdCase {
        self.id_case
    }

    /// Apply the configured case convention to a user-supplied id.
    pub fn normalize(&self, id: &str) -> String {
        self.id_case.normalize(id)
    }

    pub fn tree(&self) -> &CourseTree {
        &self.tree
    }

    /// Courses in ascending id order.
    pub fn courses(&self) -> InOrder<'_> {
        self.tree.iter()
    }

    /// Load courses from a CSV file, appending to the current catalog.
    ///
    /// Malformed rows are reported and skipped; only an unreadable file is an error.
    #[instrument(skip(self))]
    pub fn load_file(&mut self, path: &Path) -> ApplicationResult<LoadReport> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("course file not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read course file", path)?;

        let report = self.load_str(&content);
        info!(
            "loaded {} course(s) from {}, rejected {}",
            report.loaded,
            path.display(),
            report.rejected.len()
        );
        Ok(report)
    }

    /// Load courses from CSV text: one `id,name[,prereq1[,prereq2]]` row per line.
    pub fn load_str(&mut self, content: &str) -> LoadReport {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut report = LoadReport::default();

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Course::parse_row(line) {
                Ok(course) => {
                    let course = self.normalize_course(course);
                    self.tree.insert(course);
                    report.loaded += 1;
                }
                Err(reason) => {
                    warn!("line {}: {}", index + 1, reason);
                    report.rejected.push(RejectedRow {
                        line_number: index + 1,
                        line: line.to_string(),
                        reason,
                    });
                }
            }
        }
        report
    }

    /// Look up a course by a user-supplied id.
    ///
    /// Returns the empty-id sentinel when the course is absent.
    pub fn find(&self, id: &str) -> Course {
        self.tree.search(&self.normalize(id))
    }

    /// Add a course entered interactively.
    ///
    /// The id must be non-empty and every given prerequisite must already be
    /// in the catalog. Nothing is inserted when a check fails.
    #[instrument(skip(self), fields(id = %request.id))]
    pub fn add_course(&mut self, request: AddCourse) -> ApplicationResult<Course> {
        let id = self.normalize(&request.id);
        if id.is_empty() {
            return Err(DomainError::EmptyCourseId.into());
        }

        let prereq1 = self.resolve_prerequisite(request.prereq1.as_deref())?;
        let prereq2 = self.resolve_prerequisite(request.prereq2.as_deref())?;

        if self.tree.contains(&id) {
            // Duplicates are stored as a second node, never merged
            warn!("{id} already exists, adding a second record");
        }

        let course = Course::new(id, request.name.trim())
            .with_prerequisites(prereq1.as_deref(), prereq2.as_deref());
        self.tree.insert(course.clone());
        debug!("added {}", course.id);
        Ok(course)
    }

    /// Delete a course by a user-supplied id, refusing while other courses
    /// still list it as a prerequisite.
    #[instrument(skip(self))]
    pub fn remove_course(&mut self, id: &str) -> ApplicationResult<Course> {
        let id = self.normalize(id);
        let removed = self.tree.try_delete(&id)?;
        info!("{} has been successfully deleted", removed.id);
        Ok(removed)
    }

    /// Courses that list `id` as a prerequisite.
    pub fn dependents(&self, id: &str) -> Vec<&Course> {
        self.tree.dependents(&self.normalize(id))
    }

    /// Normalize an optional prerequisite and check that it exists.
    fn resolve_prerequisite(&self, prereq: Option<&str>) -> ApplicationResult<Option<String>> {
        let Some(prereq) = prereq.map(|p| self.normalize(p)).filter(|p| !p.is_empty()) else {
            return Ok(None);
        };
        if self.tree.contains(&prereq) {
            Ok(Some(prereq))
        } else {
            Err(ApplicationError::UnresolvedPrerequisite { id: prereq })
        }
    }

    fn normalize_course(&self, course: Course) -> Course {
        let Course {
            id,
            name,
            prereq1,
            prereq2,
        } = course;
        let prereq1 = prereq1.map(|p| self.normalize(&p));
        let prereq2 = prereq2.map(|p| self.normalize(&p));
        Course::new(self.normalize(&id), name)
            .with_prerequisites(prereq1.as_deref(), prereq2.as_deref())
    }
}
