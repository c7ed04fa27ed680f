//! transport::subject
//!
//! Subject naming for the messaging transport.
//!
//! Subjects follow a fixed dot-delimited hierarchy:
//!
//! ```text
//! weft.<project>.<category>.<operation>[.<id>]
//! ```
//!
//! The messaging server routes requests by subject equality, so the same
//! inputs must always produce byte-identical subjects.

use std::fmt;

use thiserror::Error;

/// Root token of every subject.
pub const SUBJECT_ROOT: &str = "weft";

/// Errors from subject construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubjectError {
    #[error("invalid {kind} '{value}': subject tokens must be non-empty and contain no '.', '*', '>' or whitespace")]
    InvalidToken { kind: &'static str, value: String },
}

/// Entity categories addressed by subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Work,
    Agents,
    Targets,
    Spinup,
    Stats,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Agents => "agents",
            Category::Targets => "targets",
            Category::Spinup => "spinup",
            Category::Stats => "stats",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds subjects for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectNamer {
    project: String,
}

impl SubjectNamer {
    /// Create a namer for `project`.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::InvalidToken` if the project id would change
    /// the subject hierarchy.
    pub fn new(project: impl Into<String>) -> Result<Self, SubjectError> {
        let project = project.into();
        check_token("project id", &project)?;
        Ok(Self { project })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Subject for an operation on a category, optionally scoped to one entity.
    pub fn subject(
        &self,
        category: Category,
        operation: &str,
        id: Option<&str>,
    ) -> Result<String, SubjectError> {
        check_token("operation", operation)?;

        let mut subject = format!(
            "{}.{}.{}.{}",
            SUBJECT_ROOT,
            self.project,
            category.as_str(),
            operation
        );
        if let Some(id) = id {
            check_token("entity id", id)?;
            subject.push('.');
            subject.push_str(id);
        }
        Ok(subject)
    }
}

fn check_token(kind: &'static str, value: &str) -> Result<(), SubjectError> {
    let invalid = value.is_empty()
        || value
            .chars()
            .any(|c| c == '.' || c == '*' || c == '>' || c.is_whitespace());
    if invalid {
        Err(SubjectError::InvalidToken {
            kind,
            value: value.to_string(),
        })
    } else {
        Ok(())
    }
}
