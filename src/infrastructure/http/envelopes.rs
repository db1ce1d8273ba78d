//! Response envelopes of the exam API.

use serde::Deserialize;

use crate::domain::entities::{AssociationRecord, Category, Discipline, Teacher};

#[derive(Debug, Deserialize)]
pub(super) struct CategoriesEnvelope {
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DisciplinesEnvelope {
    pub disciplines: Vec<Discipline>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TeachersEnvelope {
    pub teachers: Vec<Teacher>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TestsEnvelope {
    pub tests: Vec<AssociationRecord>,
}
