//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// CSV field separator for course rows.
pub const FIELD_SEPARATOR: char = ',';

/// A course record.
///
/// `id` is the ordering key of the catalog tree. Prerequisites are weak
/// references: they name other courses by id and own nothing.
///
/// `Course::default()` has an empty id and is the "not found" sentinel
/// returned by [`CourseTree::search`](crate::domain::CourseTree::search).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub prereq1: Option<String>,
    pub prereq2: Option<String>,
}

impl Course {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prereq1: None,
            prereq2: None,
        }
    }

    /// Builder-style helper setting both prerequisite slots.
    ///
    /// Empty strings are stored as `None`.
    pub fn with_prerequisites(mut self, prereq1: Option<&str>, prereq2: Option<&str>) -> Self {
        self.prereq1 = non_empty(prereq1);
        self.prereq2 = non_empty(prereq2);
        self
    }

    /// True for the empty-id "not found" record.
    pub fn is_sentinel(&self) -> bool {
        self.id.is_empty()
    }

    /// Present prerequisite ids, in slot order.
    pub fn prerequisites(&self) -> impl Iterator<Item = &str> {
        self.prereq1
            .as_deref()
            .into_iter()
            .chain(self.prereq2.as_deref())
    }

    /// True if either prerequisite slot names `id`.
    pub fn lists_prerequisite(&self, id: &str) -> bool {
        self.prereq1.as_deref() == Some(id) || self.prereq2.as_deref() == Some(id)
    }

    /// Parse one CSV row: `id,name[,prereq1[,prereq2]]`.
    ///
    /// Fields are trimmed. Id and name are required; empty prerequisite
    /// fields become `None` and anything after the fourth field is ignored.
    pub fn parse_row(line: &str) -> DomainResult<Self> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();

        let id = fields.first().copied().unwrap_or_default();
        let name = fields.get(1).copied().unwrap_or_default();
        if id.is_empty() || name.is_empty() {
            return Err(DomainError::MalformedRow(format!(
                "expected at least id and name, got {} field(s)",
                fields.iter().filter(|f| !f.is_empty()).count()
            )));
        }

        Ok(Course::new(id, name).with_prerequisites(fields.get(2).copied(), fields.get(3).copied()))
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.id, self.name)
    }
}

/// Case convention applied to course ids before they reach the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdCase {
    #[default]
    Upper,
    Lower,
    /// Keep ids exactly as entered
    Preserve,
}

impl IdCase {
    /// Trim and case-fold an id (ASCII only).
    pub fn normalize(self, id: &str) -> String {
        let id = id.trim();
        match self {
            IdCase::Upper => id.to_ascii_uppercase(),
            IdCase::Lower => id.to_ascii_lowercase(),
            IdCase::Preserve => id.to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
