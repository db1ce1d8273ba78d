//! View event model for asynchronous view counting.

use crate::domain::auth::AuthToken;

/// A request to bump an exam's view count.
///
/// Created when a user opens an exam and handed to the background worker
/// through a channel, so opening the exam never waits for the API.
///
/// # Usage Flow
///
/// 1. Created by [`crate::application::services::ViewCounter::record_view`]
/// 2. Sent to channel (non-blocking)
/// 3. Processed by [`crate::domain::view_worker::run_view_worker`]
#[derive(Debug, Clone)]
pub struct ViewEvent {
    pub exam_id: i64,
    pub token: AuthToken,
}

impl ViewEvent {
    pub fn new(exam_id: i64, token: AuthToken) -> Self {
        Self { exam_id, token }
    }
}
