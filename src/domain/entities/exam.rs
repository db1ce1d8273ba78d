//! Exam entity, the leaf unit shown to users.

use serde::{Deserialize, Serialize};

use super::catalog::Category;

/// An uploaded exam.
///
/// `category` is mandatory: every exam inside an association record carries
/// one, which is what the aggregation relies on. `views` is only ever bumped
/// by the server in response to [`crate::application::services::ViewCounter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: i64,
    pub name: String,
    pub pdf_url: String,
    #[serde(default)]
    pub views: u64,
    pub category: Category,
}

impl Exam {
    /// Creates a new Exam instance.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        pdf_url: impl Into<String>,
        views: u64,
        category: Category,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            pdf_url: pdf_url.into(),
            views,
            category,
        }
    }
}

/// Payload for registering a new exam.
///
/// Built from a validated [`crate::application::services::ExamDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExam {
    pub name: String,
    pub pdf_url: String,
    pub category_id: i64,
    pub discipline_id: i64,
    pub teacher_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exam_deserialize_camel_case() {
        let exam: Exam = serde_json::from_value(json!({
            "id": 1,
            "name": "P1 2021",
            "pdfUrl": "https://exams.test/p1.pdf",
            "views": 4,
            "category": { "id": 10, "name": "Midterm" }
        }))
        .unwrap();

        assert_eq!(exam.pdf_url, "https://exams.test/p1.pdf");
        assert_eq!(exam.views, 4);
        assert_eq!(exam.category.id, 10);
    }

    #[test]
    fn test_exam_views_default_to_zero() {
        let exam: Exam = serde_json::from_value(json!({
            "id": 2,
            "name": "Final",
            "pdfUrl": "https://exams.test/f.pdf",
            "category": { "id": 20, "name": "Final" }
        }))
        .unwrap();

        assert_eq!(exam.views, 0);
    }

    #[test]
    fn test_exam_without_category_is_rejected() {
        let result = serde_json::from_value::<Exam>(json!({
            "id": 3,
            "name": "Orphan",
            "pdfUrl": "https://exams.test/o.pdf",
            "views": 0
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_new_exam_serializes_camel_case() {
        let new_exam = NewExam {
            name: "P2".to_string(),
            pdf_url: "https://exams.test/p2.pdf".to_string(),
            category_id: 10,
            discipline_id: 7,
            teacher_id: 3,
        };

        let value = serde_json::to_value(&new_exam).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "P2",
                "pdfUrl": "https://exams.test/p2.pdf",
                "categoryId": 10,
                "disciplineId": 7,
                "teacherId": 3
            })
        );
    }
}
