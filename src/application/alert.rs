//! User-visible alerts.
//!
//! Component boundaries (search controller, view worker, exam submission)
//! turn their outcome into exactly one [`Alert`] published through an
//! [`AlertSender`]. The front-end drains the matching receiver.

use tokio::sync::mpsc;
use tracing::warn;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

impl Alert {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }
}

impl From<&AppError> for Alert {
    fn from(e: &AppError) -> Self {
        Self::error(e.user_message())
    }
}

/// Publishing side of the alert channel.
#[derive(Debug, Clone)]
pub struct AlertSender {
    tx: mpsc::UnboundedSender<Alert>,
}

impl AlertSender {
    pub fn publish(&self, alert: Alert) {
        if self.tx.send(alert).is_err() {
            warn!("Alert dropped: no receiver");
        }
    }

    pub fn report(&self, error: &AppError) {
        self.publish(Alert::from(error));
    }

    pub fn success(&self, text: impl Into<String>) {
        self.publish(Alert::success(text));
    }
}

/// Creates a connected alert sender and receiver.
pub fn alert_channel() -> (AlertSender, mpsc::UnboundedReceiver<Alert>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (AlertSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_uses_user_message() {
        let (alerts, mut rx) = alert_channel();

        alerts.report(&AppError::transport("timed out"));

        let alert = rx.try_recv().unwrap();
        assert!(alert.is_error());
        assert_eq!(alert.text, crate::error::TRANSPORT_MESSAGE);
    }

    #[test]
    fn test_success_alert() {
        let (alerts, mut rx) = alert_channel();

        alerts.success("Saved");

        assert_eq!(rx.try_recv().unwrap(), Alert::success("Saved"));
    }

    #[test]
    fn test_publish_without_receiver_does_not_panic() {
        let (alerts, rx) = alert_channel();
        drop(rx);

        alerts.publish(Alert::error("lost"));
    }
}
