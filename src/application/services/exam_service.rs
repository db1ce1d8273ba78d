//! Exam registration.

use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::Validate;

use crate::application::AlertSender;
use crate::domain::auth::AuthContext;
use crate::domain::entities::NewExam;
use crate::domain::repositories::ExamApi;
use crate::error::AppError;

/// Alert text after a successful registration.
pub const CREATED_MESSAGE: &str = "Exam registered successfully!";

/// Registration form state.
///
/// Ids of 0 mean "not selected". Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ExamDraft {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub pdf_url: String,
    #[validate(range(min = 1))]
    pub category_id: i64,
    #[validate(range(min = 1))]
    pub discipline_id: i64,
    #[validate(range(min = 1))]
    pub teacher_id: i64,
}

impl ExamDraft {
    /// Selects a discipline.
    ///
    /// The teacher list depends on the discipline, so any selected teacher is
    /// cleared.
    pub fn select_discipline(&mut self, discipline_id: i64) {
        self.discipline_id = discipline_id;
        self.teacher_id = 0;
    }

    /// Checks that every field is filled in.
    pub fn check(&self) -> Result<NewExam, AppError> {
        if let Err(errors) = self.validate() {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|field| field.to_string())
                .collect();
            fields.sort();
            return Err(AppError::validation(fields));
        }

        Ok(NewExam {
            name: self.name.clone(),
            pdf_url: self.pdf_url.clone(),
            category_id: self.category_id,
            discipline_id: self.discipline_id,
            teacher_id: self.teacher_id,
        })
    }
}

/// Result of [`ExamService::submit`], after the alert has been published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Created,
    Rejected(String),
    /// No credential; nothing was sent and no alert shown.
    Skipped,
}

/// Service for registering new exams.
pub struct ExamService<A: ExamApi + ?Sized> {
    api: Arc<A>,
    alerts: AlertSender,
}

impl<A: ExamApi + ?Sized> ExamService<A> {
    /// Creates a new exam service.
    pub fn new(api: Arc<A>, alerts: AlertSender) -> Self {
        Self { api, alerts }
    }

    /// Validates the draft and registers the exam.
    ///
    /// Validation runs before the credential check, so an incomplete form is
    /// reported even without a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] without contacting the API if any field
    /// is empty, otherwise whatever the API call returns.
    pub async fn create_exam(
        &self,
        ctx: &AuthContext,
        draft: &ExamDraft,
    ) -> Result<Option<()>, AppError> {
        let new_exam = draft.check()?;

        let Some(token) = ctx.token() else {
            debug!("No token, exam not submitted");
            return Ok(None);
        };

        self.api.create_test(token, new_exam).await?;
        info!(name = %draft.name, "Exam registered");
        Ok(Some(()))
    }

    /// Submits the draft and publishes the outcome as an alert.
    pub async fn submit(&self, ctx: &AuthContext, draft: &ExamDraft) -> Submission {
        match self.create_exam(ctx, draft).await {
            Ok(Some(())) => {
                self.alerts.success(CREATED_MESSAGE);
                Submission::Created
            }
            Ok(None) => Submission::Skipped,
            Err(e) => {
                warn!(error = %e, "Exam submission failed");
                self.alerts.report(&e);
                Submission::Rejected(e.user_message().to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Alert, alert_channel};
    use crate::domain::repositories::MockExamApi;
    use crate::error::VALIDATION_MESSAGE;

    fn complete_draft() -> ExamDraft {
        ExamDraft {
            name: "P1 2021".to_string(),
            pdf_url: "https://exams.test/p1.pdf".to_string(),
            category_id: 10,
            discipline_id: 7,
            teacher_id: 3,
        }
    }

    #[test]
    fn test_select_discipline_clears_teacher() {
        let mut draft = complete_draft();

        draft.select_discipline(8);

        assert_eq!(draft.discipline_id, 8);
        assert_eq!(draft.teacher_id, 0);
    }

    #[test]
    fn test_check_lists_missing_fields() {
        let draft = ExamDraft {
            name: "P1".to_string(),
            category_id: 10,
            ..Default::default()
        };

        match draft.check() {
            Err(AppError::Validation { fields, message }) => {
                assert_eq!(fields, vec!["discipline_id", "pdf_url", "teacher_id"]);
                assert_eq!(message, VALIDATION_MESSAGE);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_exam_success() {
        let mut mock_api = MockExamApi::new();
        mock_api
            .expect_create_test()
            .withf(|token, new_exam| {
                token.as_str() == "tok"
                    && new_exam.name == "P1 2021"
                    && new_exam.teacher_id == 3
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let (alerts, _rx) = alert_channel();
        let service = ExamService::new(Arc::new(mock_api), alerts);

        let result = service
            .create_exam(&AuthContext::with_token("tok"), &complete_draft())
            .await;

        assert_eq!(result.unwrap(), Some(()));
    }

    #[tokio::test]
    async fn test_incomplete_draft_is_never_sent() {
        let mut mock_api = MockExamApi::new();
        mock_api.expect_create_test().never();

        let (alerts, mut rx) = alert_channel();
        let service = ExamService::new(Arc::new(mock_api), alerts);
        let draft = ExamDraft {
            pdf_url: String::new(),
            ..complete_draft()
        };

        let submission = service
            .submit(&AuthContext::with_token("tok"), &draft)
            .await;

        assert_eq!(submission, Submission::Rejected(VALIDATION_MESSAGE.to_string()));
        assert_eq!(rx.try_recv().unwrap(), Alert::error(VALIDATION_MESSAGE));
    }

    #[tokio::test]
    async fn test_validation_runs_before_token_check() {
        let mock_api = MockExamApi::new();
        let (alerts, _rx) = alert_channel();
        let service = ExamService::new(Arc::new(mock_api), alerts);

        let result = service
            .create_exam(&AuthContext::anonymous(), &ExamDraft::default())
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_submit_without_token_is_silent() {
        let mut mock_api = MockExamApi::new();
        mock_api.expect_create_test().never();

        let (alerts, mut rx) = alert_channel();
        let service = ExamService::new(Arc::new(mock_api), alerts);

        let submission = service
            .submit(&AuthContext::anonymous(), &complete_draft())
            .await;

        assert_eq!(submission, Submission::Skipped);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_submit_success_publishes_alert() {
        let mut mock_api = MockExamApi::new();
        mock_api.expect_create_test().returning(|_, _| Ok(()));

        let (alerts, mut rx) = alert_channel();
        let service = ExamService::new(Arc::new(mock_api), alerts);

        let submission = service
            .submit(&AuthContext::with_token("tok"), &complete_draft())
            .await;

        assert_eq!(submission, Submission::Created);
        assert_eq!(rx.try_recv().unwrap(), Alert::success(CREATED_MESSAGE));
    }

    #[tokio::test]
    async fn test_submit_shows_server_message_verbatim() {
        let mut mock_api = MockExamApi::new();
        mock_api
            .expect_create_test()
            .returning(|_, _| Err(AppError::server(409, "Exam already registered")));

        let (alerts, mut rx) = alert_channel();
        let service = ExamService::new(Arc::new(mock_api), alerts);

        service
            .submit(&AuthContext::with_token("tok"), &complete_draft())
            .await;

        assert_eq!(rx.try_recv().unwrap(), Alert::error("Exam already registered"));
    }

    #[tokio::test]
    async fn test_submit_transport_error_uses_generic_message() {
        let mut mock_api = MockExamApi::new();
        mock_api
            .expect_create_test()
            .returning(|_, _| Err(AppError::transport("connection reset")));

        let (alerts, mut rx) = alert_channel();
        let service = ExamService::new(Arc::new(mock_api), alerts);

        service
            .submit(&AuthContext::with_token("tok"), &complete_draft())
            .await;

        assert_eq!(
            rx.try_recv().unwrap(),
            Alert::error(crate::error::TRANSPORT_MESSAGE)
        );
    }
}
