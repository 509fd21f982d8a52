//! Transient Notification Channel
//!
//! A single slot holding the latest notice. A notice counts as dismissed once it is
//! older than the dismiss delay, so no timer has to run. Raising a notice replaces
//! whatever was shown before.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use super::events::{DashboardEvent, EventBus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Slot {
    notice: Notice,
    shown_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    slot: Arc<RwLock<Option<Slot>>>,
    dismiss_after: Duration,
    events: EventBus,
}

impl Notifier {
    pub fn new(dismiss_after: Duration, events: EventBus) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            dismiss_after,
            events,
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    pub fn raise(&self, kind: NoticeKind, message: impl Into<String>) {
        let notice = Notice {
            kind,
            message: message.into(),
            raised_at: Utc::now(),
        };

        *self.slot.write() = Some(Slot {
            notice: notice.clone(),
            shown_at: Instant::now(),
        });
        self.events.emit(DashboardEvent::Notice { notice });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.raise(NoticeKind::Error, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.raise(NoticeKind::Success, message);
    }

    /// Visible notice, if any
    pub fn current(&self) -> Option<Notice> {
        let slot = self.slot.read();
        slot.as_ref()
            .filter(|s| s.shown_at.elapsed() < self.dismiss_after)
            .map(|s| s.notice.clone())
    }

    /// Visible error message, if any
    pub fn current_error(&self) -> Option<String> {
        self.current()
            .filter(|n| n.kind == NoticeKind::Error)
            .map(|n| n.message)
    }

    /// Explicit dismissal by the user
    pub fn dismiss(&self) {
        *self.slot.write() = None;
    }

    /// Drops a pending error notice; other kinds stay
    pub fn clear_error(&self) {
        let mut slot = self.slot.write();
        if slot.as_ref().map_or(false, |s| s.notice.kind == NoticeKind::Error) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier(ms: u64) -> Notifier {
        Notifier::new(Duration::from_millis(ms), EventBus::default())
    }

    #[test]
    fn test_raise_replaces_previous() {
        let n = notifier(10_000);
        n.error("first");
        n.error("second");
        assert_eq!(n.current_error().as_deref(), Some("second"));
    }

    #[test]
    fn test_auto_dismiss() {
        let n = notifier(20);
        n.error("boom");
        assert!(n.current().is_some());
        std::thread::sleep(Duration::from_millis(40));
        assert!(n.current().is_none());
    }

    #[test]
    fn test_clear_error_keeps_success() {
        let n = notifier(10_000);
        n.success("done");
        n.clear_error();
        assert_eq!(n.current().map(|x| x.kind), Some(NoticeKind::Success));

        n.error("failed");
        n.clear_error();
        assert!(n.current().is_none());
    }

    #[test]
    fn test_dismiss() {
        let n = notifier(10_000);
        n.error("failed");
        n.dismiss();
        assert!(n.current_error().is_none());
    }
}
