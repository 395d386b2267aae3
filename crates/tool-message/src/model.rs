use std::fmt;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use pagereach_core_types::{ActionId, TabId};

/// Execution context delivered by the scheduler.
#[derive(Clone, Debug)]
pub struct ExecCtx {
    pub action_id: ActionId,
    pub tab: TabId,
    pub cancel: CancellationToken,
}

impl ExecCtx {
    pub fn new(action_id: ActionId, tab: TabId, cancel: CancellationToken) -> Self {
        Self {
            action_id,
            tab,
            cancel,
        }
    }
}

/// Parameters for one compose-and-send run.
#[derive(Clone, Debug)]
pub struct MessageParams {
    pub text: String,
}

/// Why the protocol reported failure for one tab.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailReason {
    /// The message input region was not found; the debugger was never
    /// attached.
    InputNotFound,
    AttachFailed,
    /// A pointer or raw-text primitive failed under the debug session.
    DispatchFailed,
    SendControlNotFound,
    /// A page query failed outside the debug session.
    QueryFailed,
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FailReason::InputNotFound => "input region not found",
            FailReason::AttachFailed => "debugger attach failed",
            FailReason::DispatchFailed => "input dispatch failed",
            FailReason::SendControlNotFound => "send control not found",
            FailReason::QueryFailed => "page query failed",
        };
        f.write_str(text)
    }
}

/// Outcome of the protocol for one tab. Protocol-level failures are reported
/// here, not raised; the scheduler absorbs them into its counters.
#[derive(Clone, Debug)]
pub struct MessageReport {
    pub ok: bool,
    pub reason: Option<FailReason>,
    pub detail: Option<String>,
    pub latency_ms: u128,
}

impl MessageReport {
    pub(crate) fn success(started_at: Instant) -> Self {
        Self {
            ok: true,
            reason: None,
            detail: None,
            latency_ms: started_at.elapsed().as_millis(),
        }
    }

    pub(crate) fn failure(
        started_at: Instant,
        reason: FailReason,
        detail: Option<String>,
    ) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
            detail,
            latency_ms: started_at.elapsed().as_millis(),
        }
    }
}
