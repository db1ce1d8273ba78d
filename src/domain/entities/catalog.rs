//! Catalog entities: categories, disciplines and teachers.

use serde::{Deserialize, Serialize};

/// An exam category such as "Midterm" or "Final".
///
/// Categories form a stable catalog fetched independently from the exams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    /// Creates a new Category instance.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A subject taught by one or more teachers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    pub id: i64,
    pub name: String,
}

impl Discipline {
    /// Creates a new Discipline instance.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An instructor.
///
/// The display hierarchy groups by `name`; see
/// [`crate::domain::aggregation`] for the consequences when two teachers share one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
}

impl Teacher {
    /// Creates a new Teacher instance.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
