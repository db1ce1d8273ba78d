//! Fire-and-forget view counting.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::domain::auth::AuthContext;
use crate::domain::entities::Exam;
use crate::domain::view_event::ViewEvent;

/// Outcome of [`ViewCounter::record_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewDispatch {
    /// Handed to the background worker.
    Queued,
    /// No credential; nothing was sent.
    Skipped,
    /// Queue full or worker gone; the view is lost.
    Dropped,
}

/// Records exam views without delaying navigation.
///
/// Events are pushed onto a bounded channel consumed by
/// [`crate::domain::view_worker::run_view_worker`]. This never awaits.
#[derive(Debug, Clone)]
pub struct ViewCounter {
    tx: mpsc::Sender<ViewEvent>,
}

impl ViewCounter {
    pub fn new(tx: mpsc::Sender<ViewEvent>) -> Self {
        Self { tx }
    }

    /// Queues a view of `exam_id`.
    pub fn record_view(&self, ctx: &AuthContext, exam_id: i64) -> ViewDispatch {
        let Some(token) = ctx.token() else {
            debug!(exam_id, "No token, view not recorded");
            return ViewDispatch::Skipped;
        };

        match self.tx.try_send(ViewEvent::new(exam_id, token.clone())) {
            Ok(()) => ViewDispatch::Queued,
            Err(TrySendError::Full(_)) => {
                warn!(exam_id, "View queue full, dropping view");
                ViewDispatch::Dropped
            }
            Err(TrySendError::Closed(_)) => {
                warn!(exam_id, "View worker stopped, dropping view");
                ViewDispatch::Dropped
            }
        }
    }

    /// Records a view and returns the URL to navigate to.
    ///
    /// Navigation proceeds whatever happens to the view.
    pub fn open_exam<'a>(&self, ctx: &AuthContext, exam: &'a Exam) -> &'a str {
        self.record_view(ctx, exam.id);
        &exam.pdf_url
    }
}
