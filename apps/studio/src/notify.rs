//! Transient user-facing notices (the "toast" seam).

use std::sync::Mutex;

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    fn success(&self, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Success,
            message: message.to_string(),
        });
    }

    fn failure(&self, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Failure,
            message: message.to_string(),
        });
    }
}

/// Routes notices into the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(target: "notice", "{}", notice.message),
            NoticeLevel::Failure => warn!(target: "notice", "{}", notice.message),
        }
    }
}

/// Keeps every notice in order; handy for front ends that render in batches.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(
            &mut *self
                .notices
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notice);
    }
}
