//! Derivation of the instructor → category → exam display hierarchy.
//!
//! Everything here is a pure function over borrowed association records and
//! categories. Nothing is cached or mutated, so callers can re-derive the
//! hierarchy on every render.
//!
//! # Grouping Key
//!
//! Teachers are grouped by **name**. Records of two distinct teachers that
//! share a display name are merged into one group.
//!
//! # Ordering
//!
//! - Instructors: order of first appearance across the records
//! - Categories: order of the category catalog
//! - Exams: record order, then order inside each record

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::entities::{AssociationRecord, Category, Exam};
use crate::utils::OrderedSet;

/// Unique teacher names in order of first appearance.
pub fn distinct_teacher_names(records: &[AssociationRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.teacher.name.clone())
        .collect::<OrderedSet<_>>()
        .into_vec()
}

/// Categories for which the teacher has at least one exam.
///
/// Returns a subsequence of `categories`; a category id listed twice in the
/// catalog is only returned once.
pub fn categories_with_exams<'a>(
    teacher_name: &str,
    records: &[AssociationRecord],
    categories: &'a [Category],
) -> Vec<&'a Category> {
    let mut emitted = OrderedSet::new();

    categories
        .iter()
        .filter(|category| {
            records
                .iter()
                .any(|record| record.is_taught_by(teacher_name) && record.has_category(category.id))
        })
        .filter(|category| emitted.insert(category.id))
        .collect()
}

/// Exams of the teacher filed under the category.
///
/// Empty when nothing matches.
pub fn exams_for<'a>(
    teacher_name: &str,
    category_id: i64,
    records: &'a [AssociationRecord],
) -> Vec<&'a Exam> {
    records
        .iter()
        .filter(|record| record.is_taught_by(teacher_name))
        .flat_map(|record| record.exams.iter())
        .filter(|exam| exam.category.id == category_id)
        .collect()
}

/// An exam as displayed, with the discipline of the record it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamEntry {
    pub exam: Exam,
    pub discipline_name: String,
}

impl ExamEntry {
    /// Display label, e.g. `"P1 2021 (Math)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.exam.name, self.discipline_name)
    }
}

/// One category section under an instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub exams: Vec<ExamEntry>,
}

/// Top level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructorGroup {
    pub name: String,
    pub categories: Vec<CategoryGroup>,
}

impl InstructorGroup {
    pub fn exam_count(&self) -> usize {
        self.categories.iter().map(|group| group.exams.len()).sum()
    }
}

type CategoryBuckets<'a> = HashMap<i64, Vec<(&'a Exam, &'a str)>>;

/// `teacher name → category id → (exam, discipline name)` built in one pass.
struct TeacherIndex<'a> {
    teachers: OrderedSet<&'a str>,
    buckets: HashMap<&'a str, CategoryBuckets<'a>>,
}

impl<'a> TeacherIndex<'a> {
    fn build(records: &'a [AssociationRecord]) -> Self {
        let mut teachers = OrderedSet::new();
        let mut buckets: HashMap<&'a str, CategoryBuckets<'a>> = HashMap::new();

        for record in records {
            let teacher = record.teacher.name.as_str();
            teachers.insert(teacher);

            let by_category = buckets.entry(teacher).or_default();
            for exam in &record.exams {
                by_category
                    .entry(exam.category.id)
                    .or_default()
                    .push((exam, record.discipline.name.as_str()));
            }
        }

        Self { teachers, buckets }
    }

    fn entries(&self, teacher: &str, category_id: i64) -> &[(&'a Exam, &'a str)] {
        self.buckets
            .get(teacher)
            .and_then(|by_category| by_category.get(&category_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Builds the full display hierarchy.
///
/// Agrees with [`distinct_teacher_names`], [`categories_with_exams`] and
/// [`exams_for`] but indexes the records once instead of filtering them per
/// teacher and category. Instructors whose records hold no exam of a listed
/// category still appear, with no category sections.
pub fn build_hierarchy(
    records: &[AssociationRecord],
    categories: &[Category],
) -> Vec<InstructorGroup> {
    let index = TeacherIndex::build(records);

    index
        .teachers
        .iter()
        .map(|&teacher| {
            let mut emitted = OrderedSet::new();
            let groups = categories
                .iter()
                .filter_map(|category| {
                    let entries = index.entries(teacher, category.id);
                    if entries.is_empty() || !emitted.insert(category.id) {
                        return None;
                    }
                    Some(CategoryGroup {
                        category: category.clone(),
                        exams: entries
                            .iter()
                            .map(|(exam, discipline)| ExamEntry {
                                exam: (*exam).clone(),
                                discipline_name: (*discipline).to_string(),
                            })
                            .collect(),
                    })
                })
                .collect();

            InstructorGroup {
                name: teacher.to_string(),
                categories: groups,
            }
        })
        .collect()
}
