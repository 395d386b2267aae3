use async_trait::async_trait;

use crate::model::BatchProgress;

/// Severity of a user-visible notice.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Sink for the human-readable notices and progress updates every terminal
/// state produces. The embedding surface (side panel, CLI, log) decides how
/// to render them.
#[async_trait]
pub trait SchedulerEvents: Send + Sync {
    async fn notice(&self, kind: NoticeKind, text: &str);
    async fn progress(&self, progress: &BatchProgress);
}

#[derive(Clone, Debug, Default)]
pub struct NoopEvents;

#[async_trait]
impl SchedulerEvents for NoopEvents {
    async fn notice(&self, _kind: NoticeKind, _text: &str) {}
    async fn progress(&self, _progress: &BatchProgress) {}
}
