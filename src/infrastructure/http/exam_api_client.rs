//! reqwest-backed client for the exam API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::envelopes::{CategoriesEnvelope, DisciplinesEnvelope, TeachersEnvelope, TestsEnvelope};
use crate::domain::auth::AuthToken;
use crate::domain::entities::{AssociationRecord, Category, Discipline, NewExam, Teacher};
use crate::domain::repositories::ExamApi;
use crate::error::AppError;

/// Exam API client speaking JSON over HTTP.
///
/// # Endpoints
///
/// | Operation | Request |
/// |---|---|
/// | categories | `GET /categories` |
/// | disciplines | `GET /disciplines` |
/// | teachers of a discipline | `GET /teachers/{discipline_id}` |
/// | association records | `GET /tests/teachers?teacher={query}` |
/// | view | `PATCH /tests/{id}/view` |
/// | create | `POST /tests` |
///
/// Requests carry `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct HttpExamApi {
    client: Client,
    base_url: String,
}

impl HttpExamApi {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = check_status(request.send().await?).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::transport(format!("Invalid response body: {}", e)))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<(), AppError> {
        check_status(request.send().await?).await?;
        Ok(())
    }
}

/// Turns an error status into [`AppError::Server`] carrying the body text.
async fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), body = %body, "API error response");

    if body.trim().is_empty() {
        let reason = status.canonical_reason().unwrap_or("Request failed");
        return Err(AppError::server(status.as_u16(), reason));
    }

    Err(AppError::from_response_body(status.as_u16(), &body))
}

#[async_trait]
impl ExamApi for HttpExamApi {
    async fn get_categories(&self, token: &AuthToken) -> Result<Vec<Category>, AppError> {
        let request = self
            .client
            .get(self.url("categories"))
            .bearer_auth(token.as_str());

        let envelope: CategoriesEnvelope = self.fetch(request).await?;
        Ok(envelope.categories)
    }

    async fn get_disciplines(&self, token: &AuthToken) -> Result<Vec<Discipline>, AppError> {
        let request = self
            .client
            .get(self.url("disciplines"))
            .bearer_auth(token.as_str());

        let envelope: DisciplinesEnvelope = self.fetch(request).await?;
        Ok(envelope.disciplines)
    }

    async fn get_teachers_by_discipline(
        &self,
        token: &AuthToken,
        discipline_id: i64,
    ) -> Result<Vec<Teacher>, AppError> {
        let request = self
            .client
            .get(self.url(&format!("teachers/{}", discipline_id)))
            .bearer_auth(token.as_str());

        let envelope: TeachersEnvelope = self.fetch(request).await?;
        Ok(envelope.teachers)
    }

    async fn get_tests_by_teacher(
        &self,
        token: &AuthToken,
        query: &str,
    ) -> Result<Vec<AssociationRecord>, AppError> {
        let mut request = self
            .client
            .get(self.url("tests/teachers"))
            .bearer_auth(token.as_str());
        if !query.is_empty() {
            request = request.query(&[("teacher", query)]);
        }

        let envelope: TestsEnvelope = self.fetch(request).await?;
        Ok(envelope.tests)
    }

    async fn add_view(&self, token: &AuthToken, exam_id: i64) -> Result<(), AppError> {
        let request = self
            .client
            .patch(self.url(&format!("tests/{}/view", exam_id)))
            .bearer_auth(token.as_str());

        self.execute(request).await
    }

    async fn create_test(&self, token: &AuthToken, new_exam: NewExam) -> Result<(), AppError> {
        let request = self
            .client
            .post(self.url("tests"))
            .bearer_auth(token.as_str())
            .json(&new_exam);

        self.execute(request).await
    }
}
