//! Remote exam API operations.

use crate::domain::auth::AuthToken;
use crate::domain::entities::{AssociationRecord, Category, Discipline, NewExam, Teacher};
use crate::error::AppError;
use async_trait::async_trait;

/// Operations offered by the exam repository backend.
///
/// Every call requires a token; callers holding an
/// [`crate::domain::auth::AuthContext`] without one skip the call entirely.
///
/// # Errors
///
/// Every method returns [`AppError::Server`] when the backend answers with an
/// error status and [`AppError::Transport`] when no usable response arrives.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpExamApi`] - JSON over HTTP
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExamApi: Send + Sync {
    /// Lists the full category catalog.
    async fn get_categories(&self, token: &AuthToken) -> Result<Vec<Category>, AppError>;

    /// Lists all disciplines.
    async fn get_disciplines(&self, token: &AuthToken) -> Result<Vec<Discipline>, AppError>;

    /// Lists teachers who teach the given discipline.
    async fn get_teachers_by_discipline(
        &self,
        token: &AuthToken,
        discipline_id: i64,
    ) -> Result<Vec<Teacher>, AppError>;

    /// Lists association records, filtered by teacher name when `query` is
    /// non-empty.
    async fn get_tests_by_teacher(
        &self,
        token: &AuthToken,
        query: &str,
    ) -> Result<Vec<AssociationRecord>, AppError>;

    /// Increments the view count of an exam.
    async fn add_view(&self, token: &AuthToken, exam_id: i64) -> Result<(), AppError>;

    /// Registers a new exam.
    async fn create_test(&self, token: &AuthToken, new_exam: NewExam) -> Result<(), AppError>;
}
