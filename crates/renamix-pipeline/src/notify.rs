//! Toast-style user notifications.
//!
//! Outcomes of fire-and-forget operations (export, conversion, batch
//! processing) are reported through this seam instead of return values.
//! Notices are non-blocking advisories, never modal.

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Default notifier: routes notices to the tracing pipeline.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => tracing::info!(notice = message, "User notice"),
            NoticeLevel::Success => tracing::info!(notice = message, "User notice (success)"),
            NoticeLevel::Error => tracing::warn!(notice = message, "User notice (error)"),
        }
    }
}
