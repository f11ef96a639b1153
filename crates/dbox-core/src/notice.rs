//! Transient status and error messages.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Status,
    Error,
}

/// A message together with the moment it was posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    posted_at: Instant,
}

impl Notice {
    pub fn posted_at(&self) -> Instant {
        self.posted_at
    }
}

/// The latest status and the latest error, each with its own lifetime.
///
/// Posting replaces the previous message of the same kind. While an error
/// is inside its window it hides any status message.
#[derive(Debug, Clone)]
pub struct Notices {
    status: Option<Notice>,
    error: Option<Notice>,
    status_ttl: Duration,
    error_ttl: Duration,
}

impl Notices {
    pub fn new(status_ttl: Duration, error_ttl: Duration) -> Self {
        Self {
            status: None,
            error: None,
            status_ttl,
            error_ttl,
        }
    }

    pub fn with_status(self, text: impl Into<String>, now: Instant) -> Self {
        Self {
            status: Some(Notice {
                kind: NoticeKind::Status,
                text: text.into(),
                posted_at: now,
            }),
            ..self
        }
    }

    pub fn with_error(self, text: impl Into<String>, now: Instant) -> Self {
        Self {
            error: Some(Notice {
                kind: NoticeKind::Error,
                text: text.into(),
                posted_at: now,
            }),
            ..self
        }
    }

    /// The message to show at `now`, if any.
    pub fn visible(&self, now: Instant) -> Option<&Notice> {
        fn live(notice: &Option<Notice>, ttl: Duration, now: Instant) -> Option<&Notice> {
            notice
                .as_ref()
                .filter(|n| now.saturating_duration_since(n.posted_at) < ttl)
        }
        live(&self.error, self.error_ttl, now).or_else(|| live(&self.status, self.status_ttl, now))
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(Duration::from_secs(3), Duration::from_secs(5))
    }
}
