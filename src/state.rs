//! Wiring of the API client, services and background workers.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::services::{
    CatalogService, ExamService, SearchController, ViewCounter,
};
use crate::application::{Alert, alert_channel};
use crate::config::Config;
use crate::domain::auth::AuthContext;
use crate::domain::record_store::RecordStore;
use crate::domain::view_worker::run_view_worker;
use crate::infrastructure::http::HttpExamApi;

/// Everything a front-end needs, built from one [`Config`].
pub struct AppState {
    pub auth: AuthContext,
    pub search: SearchController<HttpExamApi>,
    pub views: ViewCounter,
    pub catalog: CatalogService<HttpExamApi>,
    pub exams: ExamService<HttpExamApi>,
    view_worker: JoinHandle<()>,
}

impl AppState {
    /// Builds the services and spawns the view worker.
    ///
    /// Must be called inside a tokio runtime. Returns the receiving end of
    /// the alert channel alongside the state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn build(config: &Config) -> Result<(Self, mpsc::UnboundedReceiver<Alert>)> {
        let api = Arc::new(HttpExamApi::new(&config.api_url, config.http_timeout())?);
        let (alerts, alert_rx) = alert_channel();

        let (view_tx, view_rx) = mpsc::channel(config.view_queue_capacity);
        let view_worker = tokio::spawn(run_view_worker(view_rx, api.clone(), alerts.clone()));
        tracing::debug!("View worker started");

        let state = Self {
            auth: config.auth_context(),
            search: SearchController::new(
                api.clone(),
                RecordStore::new(),
                alerts.clone(),
                config.search_config(),
            ),
            views: ViewCounter::new(view_tx),
            catalog: CatalogService::new(api.clone()),
            exams: ExamService::new(api, alerts),
            view_worker,
        };

        Ok((state, alert_rx))
    }

    /// Drops the services and waits until queued views are delivered.
    pub async fn shutdown(self) {
        let Self {
            views, view_worker, ..
        } = self;
        drop(views);

        if let Err(e) = view_worker.await {
            tracing::error!("View worker failed: {}", e);
        }
    }
}
