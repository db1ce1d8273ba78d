//! Core domain entities representing the exam repository data model.
//!
//! Entities are plain data structures deserialized from the exam API. They carry
//! no business logic; derivations live in [`crate::domain::aggregation`].
//!
//! # Entity Types
//!
//! - [`Category`] - Exam category (e.g. "Midterm", "Final")
//! - [`Discipline`] - Subject an exam belongs to
//! - [`Teacher`] - Instructor who administered an exam
//! - [`Exam`] - A single uploaded exam, the leaf shown to users
//! - [`AssociationRecord`] - One teacher + discipline pairing with its exams
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! [`NewExam`] is the payload sent when registering an exam.
//!
//! All wire names are camelCase, matching the API JSON.

pub mod association;
pub mod catalog;
pub mod exam;

pub use association::AssociationRecord;
pub use catalog::{Category, Discipline, Teacher};
pub use exam::{Exam, NewExam};
