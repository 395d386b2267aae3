use async_trait::async_trait;

use pagereach_core_types::{ReachError, TabId};

use crate::model::{PageQuery, PointerPhase, QueryReply, TabStatus};

/// Tab creation, teardown and status, as exposed by the host browser.
#[async_trait]
pub trait TabControlPort: Send + Sync {
    /// Open a tab on the given URL. `background` de-prioritizes the tab so
    /// opening a batch does not steal focus.
    async fn open(&self, url: &str, background: bool) -> Result<TabId, ReachError>;
    /// Close a tab. Closing an already-closed tab is not an error.
    async fn close(&self, tab: TabId) -> Result<(), ReachError>;
    async fn status(&self, tab: TabId) -> Result<TabStatus, ReachError>;
}

/// Executes a structured query inside a page's context.
#[async_trait]
pub trait PageQueryPort: Send + Sync {
    async fn run(&self, tab: TabId, query: PageQuery) -> Result<QueryReply, ReachError>;
}

/// Exclusive low-level control channel to a single tab. The caller is
/// responsible for never holding two attachments at once.
#[async_trait]
pub trait DebuggerPort: Send + Sync {
    async fn attach(&self, tab: TabId) -> Result<(), ReachError>;
    async fn detach(&self, tab: TabId) -> Result<(), ReachError>;
    async fn dispatch_pointer(
        &self,
        tab: TabId,
        phase: PointerPhase,
        x: i32,
        y: i32,
    ) -> Result<(), ReachError>;
    async fn insert_text(&self, tab: TabId, text: &str) -> Result<(), ReachError>;
}
