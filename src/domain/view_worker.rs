//! Background worker that delivers view events to the exam API.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::application::AlertSender;
use crate::domain::repositories::ExamApi;
use crate::domain::view_event::ViewEvent;

/// Processes view events until every sender is dropped.
///
/// Each event is delivered once. A failure is reported as an alert and the
/// worker moves on; nothing is retried.
pub async fn run_view_worker<A>(mut rx: mpsc::Receiver<ViewEvent>, api: Arc<A>, alerts: AlertSender)
where
    A: ExamApi + ?Sized,
{
    while let Some(ev) = rx.recv().await {
        match api.add_view(&ev.token, ev.exam_id).await {
            Ok(()) => debug!(exam_id = ev.exam_id, "View recorded"),
            Err(e) => {
                warn!(exam_id = ev.exam_id, error = %e, "Failed to record view");
                alerts.report(&e);
            }
        }
    }

    debug!("View worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::alert_channel;
    use crate::domain::auth::AuthToken;
    use crate::domain::repositories::MockExamApi;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_worker_delivers_events_in_order() {
        let mut mock_api = MockExamApi::new();
        let mut seq = mockall::Sequence::new();
        mock_api
            .expect_add_view()
            .withf(|token, id| token.as_str() == "tok" && *id == 1)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        mock_api
            .expect_add_view()
            .withf(|_, id| *id == 2)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let (alerts, mut alert_rx) = alert_channel();
        let (tx, rx) = mpsc::channel(8);
        let token = AuthToken::new("tok").unwrap();
        tx.send(ViewEvent::new(1, token.clone())).await.unwrap();
        tx.send(ViewEvent::new(2, token)).await.unwrap();
        drop(tx);

        run_view_worker(rx, Arc::new(mock_api), alerts).await;

        assert!(alert_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_worker_reports_failures_without_retry() {
        let mut mock_api = MockExamApi::new();
        mock_api
            .expect_add_view()
            .times(1)
            .returning(|_, _| Err(AppError::server(404, "Exam not found")));

        let (alerts, mut alert_rx) = alert_channel();
        let (tx, rx) = mpsc::channel(8);
        tx.send(ViewEvent::new(9, AuthToken::new("tok").unwrap()))
            .await
            .unwrap();
        drop(tx);

        run_view_worker(rx, Arc::new(mock_api), alerts).await;

        let alert = alert_rx.try_recv().unwrap();
        assert!(alert.is_error());
        assert_eq!(alert.text, "Exam not found");
        assert!(alert_rx.try_recv().is_err());
    }
}
