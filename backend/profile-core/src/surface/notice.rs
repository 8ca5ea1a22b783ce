//! Transient user-facing notifications.
//!
//! The notice center is the core's only user-visible error surface:
//! creation successes, host rejections, and host-reported errors all land
//! here for the embedder to render and expire.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use log::debug;

/// Default bound on queued notices.
pub const DEFAULT_NOTICE_LIMIT: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Bounded queue of transient notices, oldest first.
///
/// Cloneable handle; all clones share the same queue. Overflow drops the
/// oldest entry rather than blocking a writer.
#[derive(Clone)]
pub struct NoticeCenter {
    queue: Arc<Mutex<VecDeque<Notice>>>,
    limit: usize,
}

impl NoticeCenter {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_NOTICE_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            limit: limit.max(1),
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    fn push(&self, level: NoticeLevel, message: String) {
        if let Ok(mut queue) = self.queue.lock() {
            if queue.len() == self.limit {
                debug!("Notice queue full, dropping oldest entry");
                queue.pop_front();
            }
            queue.push_back(Notice { level, message });
        }
    }

    /// Take all pending notices, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        match self.queue.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NoticeCenter {
    fn default() -> Self {
        Self::new()
    }
}
