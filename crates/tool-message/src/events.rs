use async_trait::async_trait;

use pagereach_core_types::ActionId;

use crate::model::{FailReason, MessageReport};

#[async_trait]
pub trait EventsPort: Send + Sync {
    async fn emit_started(&self, action: &ActionId);
    async fn emit_finished(&self, action: &ActionId, report: &MessageReport);
}

/// Default sink when the embedder does not care about per-action events.
#[derive(Clone, Debug, Default)]
pub struct NoopEvents;

#[async_trait]
impl EventsPort for NoopEvents {
    async fn emit_started(&self, _action: &ActionId) {}
    async fn emit_finished(&self, _action: &ActionId, _report: &MessageReport) {}
}

pub(crate) fn reason_label(reason: &FailReason) -> &'static str {
    match reason {
        FailReason::InputNotFound => "input_not_found",
        FailReason::AttachFailed => "attach_failed",
        FailReason::DispatchFailed => "dispatch_failed",
        FailReason::SendControlNotFound => "send_control_not_found",
        FailReason::QueryFailed => "query_failed",
    }
}
