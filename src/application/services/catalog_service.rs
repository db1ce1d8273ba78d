//! Catalog lookups backing the exam registration form.

use std::sync::Arc;

use tracing::debug;

use crate::domain::auth::AuthContext;
use crate::domain::entities::{Category, Discipline, Teacher};
use crate::domain::repositories::ExamApi;
use crate::error::AppError;

/// Options offered by the registration form before a discipline is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormOptions {
    pub categories: Vec<Category>,
    pub disciplines: Vec<Discipline>,
}

/// Service for reading the category, discipline and teacher catalogs.
///
/// Every method returns `Ok(None)` when the context carries no token.
pub struct CatalogService<A: ExamApi + ?Sized> {
    api: Arc<A>,
}

impl<A: ExamApi + ?Sized> CatalogService<A> {
    /// Creates a new catalog service.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Loads categories and disciplines concurrently.
    pub async fn load_form_options(
        &self,
        ctx: &AuthContext,
    ) -> Result<Option<FormOptions>, AppError> {
        let Some(token) = ctx.token() else {
            debug!("No token, skipping form options");
            return Ok(None);
        };

        let (categories, disciplines) = tokio::try_join!(
            self.api.get_categories(token),
            self.api.get_disciplines(token)
        )?;

        Ok(Some(FormOptions {
            categories,
            disciplines,
        }))
    }

    pub async fn categories(&self, ctx: &AuthContext) -> Result<Option<Vec<Category>>, AppError> {
        match ctx.token() {
            Some(token) => self.api.get_categories(token).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn disciplines(
        &self,
        ctx: &AuthContext,
    ) -> Result<Option<Vec<Discipline>>, AppError> {
        match ctx.token() {
            Some(token) => self.api.get_disciplines(token).await.map(Some),
            None => Ok(None),
        }
    }

    /// Teachers who can be picked once a discipline is selected.
    pub async fn teachers_for_discipline(
        &self,
        ctx: &AuthContext,
        discipline_id: i64,
    ) -> Result<Option<Vec<Teacher>>, AppError> {
        match ctx.token() {
            Some(token) => self
                .api
                .get_teachers_by_discipline(token, discipline_id)
                .await
                .map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockExamApi;

    #[tokio::test]
    async fn test_load_form_options() {
        let mut mock_api = MockExamApi::new();
        mock_api
            .expect_get_categories()
            .times(1)
            .returning(|_| Ok(vec![Category::new(10, "Midterm")]));
        mock_api
            .expect_get_disciplines()
            .times(1)
            .returning(|_| Ok(vec![Discipline::new(7, "Math")]));

        let service = CatalogService::new(Arc::new(mock_api));

        let options = service
            .load_form_options(&AuthContext::with_token("tok"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(options.categories, vec![Category::new(10, "Midterm")]);
        assert_eq!(options.disciplines, vec![Discipline::new(7, "Math")]);
    }

    #[tokio::test]
    async fn test_load_form_options_without_token() {
        let mut mock_api = MockExamApi::new();
        mock_api.expect_get_categories().never();
        mock_api.expect_get_disciplines().never();

        let service = CatalogService::new(Arc::new(mock_api));

        let options = service
            .load_form_options(&AuthContext::anonymous())
            .await
            .unwrap();

        assert!(options.is_none());
    }

    #[tokio::test]
    async fn test_load_form_options_propagates_server_error() {
        let mut mock_api = MockExamApi::new();
        mock_api
            .expect_get_categories()
            .returning(|_| Err(AppError::server(401, "Invalid token")));
        mock_api.expect_get_disciplines().returning(|_| Ok(vec![]));

        let service = CatalogService::new(Arc::new(mock_api));

        let result = service
            .load_form_options(&AuthContext::with_token("tok"))
            .await;

        assert!(matches!(result, Err(AppError::Server { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_teachers_for_discipline() {
        let mut mock_api = MockExamApi::new();
        mock_api
            .expect_get_teachers_by_discipline()
            .withf(|_, id| *id == 7)
            .times(1)
            .returning(|_, _| Ok(vec![Teacher::new(3, "Alice")]));

        let service = CatalogService::new(Arc::new(mock_api));

        let teachers = service
            .teachers_for_discipline(&AuthContext::with_token("tok"), 7)
            .await
            .unwrap();

        assert_eq!(teachers, Some(vec![Teacher::new(3, "Alice")]));
    }
}
