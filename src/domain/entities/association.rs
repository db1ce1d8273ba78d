//! Association record: one teacher + discipline pairing with its exams.

use serde::{Deserialize, Serialize};

use super::catalog::{Discipline, Teacher};
use super::exam::Exam;

/// A teacher × discipline pairing together with the exams filed under it.
///
/// The API names the exam list `tests`; `exams` only ever holds exams that
/// belong to this pairing, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationRecord {
    pub id: i64,
    pub teacher: Teacher,
    pub discipline: Discipline,
    #[serde(rename = "tests", default)]
    pub exams: Vec<Exam>,
}

impl AssociationRecord {
    /// Creates a new AssociationRecord instance.
    pub fn new(id: i64, teacher: Teacher, discipline: Discipline, exams: Vec<Exam>) -> Self {
        Self {
            id,
            teacher,
            discipline,
            exams,
        }
    }

    /// Returns true if the record belongs to a teacher with the given name.
    pub fn is_taught_by(&self, teacher_name: &str) -> bool {
        self.teacher.name == teacher_name
    }

    /// Returns true if any exam of the record has the given category.
    pub fn has_category(&self, category_id: i64) -> bool {
        self.exams.iter().any(|exam| exam.category.id == category_id)
    }
}
