use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pagereach_core_types::ReachError;
use pagereach_host_ports::{DebuggerPort, PageQueryPort};

use crate::events::{EventsPort, NoopEvents};
use crate::model::{ExecCtx, MessageParams, MessageReport};
use crate::policy::MessagePolicyView;
use crate::runner::{execute, RuntimeDeps};

#[async_trait]
pub trait MessageTool: Send + Sync {
    async fn run(&self, ctx: ExecCtx, params: MessageParams)
        -> Result<MessageReport, ReachError>;
}

pub struct MessageToolBuilder {
    policy: MessagePolicyView,
    pages: Option<Arc<dyn PageQueryPort>>,
    debugger: Option<Arc<dyn DebuggerPort>>,
    events: Option<Arc<dyn EventsPort>>,
}

impl MessageToolBuilder {
    pub fn new(policy: MessagePolicyView) -> Self {
        Self {
            policy,
            pages: None,
            debugger: None,
            events: None,
        }
    }

    pub fn with_pages(mut self, port: Arc<dyn PageQueryPort>) -> Self {
        self.pages = Some(port);
        self
    }

    pub fn with_debugger(mut self, port: Arc<dyn DebuggerPort>) -> Self {
        self.debugger = Some(port);
        self
    }

    pub fn with_events(mut self, port: Arc<dyn EventsPort>) -> Self {
        self.events = Some(port);
        self
    }

    pub fn build(self) -> Arc<dyn MessageTool> {
        Arc::new(MessageToolImpl {
            policy: self.policy,
            pages: self.pages.expect("page query port is required"),
            debugger: self.debugger.expect("debugger port is required"),
            events: self.events.unwrap_or_else(|| Arc::new(NoopEvents)),
            attach_gate: Mutex::new(()),
        })
    }
}

pub struct MessageToolImpl {
    policy: MessagePolicyView,
    pages: Arc<dyn PageQueryPort>,
    debugger: Arc<dyn DebuggerPort>,
    events: Arc<dyn EventsPort>,
    attach_gate: Mutex<()>,
}

#[async_trait]
impl MessageTool for MessageToolImpl {
    async fn run(
        &self,
        ctx: ExecCtx,
        params: MessageParams,
    ) -> Result<MessageReport, ReachError> {
        let deps = RuntimeDeps {
            pages: self.pages.as_ref(),
            debugger: self.debugger.as_ref(),
            events: self.events.as_ref(),
            policy: &self.policy,
            attach_gate: &self.attach_gate,
        };
        execute(&ctx, params, deps).await
    }
}
