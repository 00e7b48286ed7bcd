use std::fmt;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Failure,
}

/// A message shown to the person who triggered an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Failure, message: message.into() }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Pluggable user-facing notice channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: &Notice) -> anyhow::Result<()>;
}

/// Prints notices to stdout (failures to stderr).
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, notice: &Notice) -> anyhow::Result<()> {
        match notice.level {
            NoticeLevel::Failure => eprintln!("{notice}"),
            _ => println!("{notice}"),
        }
        Ok(())
    }
}

/// Discards every notice.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _notice: &Notice) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Keeps every notice in memory, in delivery order.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panic while holding the log does not lose what was recorded.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notice: &Notice) -> anyhow::Result<()> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
        Ok(())
    }
}

#[async_trait]
impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    async fn notify(&self, notice: &Notice) -> anyhow::Result<()> {
        (**self).notify(notice).await
    }
}
