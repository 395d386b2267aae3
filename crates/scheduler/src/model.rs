use std::time::Duration;

use serde::{Deserialize, Serialize};

use pagereach_core_types::{TabHandle, Target};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerPolicy {
    /// Targets processed per batch of tabs.
    pub batch_size: usize,
    /// Pause between sequential tab opens so the host is not saturated.
    pub inter_open_delay_ms: u64,
    /// Budget for all tabs of a batch to report loaded.
    pub load_timeout_ms: u64,
    /// Pause after activating the conversation control on each tab; the
    /// composer needs this long to mount.
    pub post_composer_delay_ms: u64,
    /// Pause between message injections on consecutive tabs.
    pub inter_message_delay_ms: u64,
    /// Cooldown between batches during a full sequence.
    pub batch_cooldown_ms: u64,
    /// Accessible role of the conversation-opening control.
    pub composer_role: String,
    /// Visible text fragments of the conversation-opening control, one per
    /// locale.
    pub composer_fragments: Vec<String>,
}

impl Default for SchedulerPolicy {
    fn default() -> Self {
        Self {
            batch_size: 5,
            inter_open_delay_ms: 800,
            load_timeout_ms: 30_000,
            post_composer_delay_ms: 1200,
            inter_message_delay_ms: 4000,
            batch_cooldown_ms: 5000,
            composer_role: "button".to_string(),
            composer_fragments: vec!["Nhắn tin".to_string(), "Message".to_string()],
        }
    }
}

impl SchedulerPolicy {
    pub fn inter_open_delay(&self) -> Duration {
        Duration::from_millis(self.inter_open_delay_ms)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    pub fn post_composer_delay(&self) -> Duration {
        Duration::from_millis(self.post_composer_delay_ms)
    }

    pub fn inter_message_delay(&self) -> Duration {
        Duration::from_millis(self.inter_message_delay_ms)
    }

    pub fn batch_cooldown(&self) -> Duration {
        Duration::from_millis(self.batch_cooldown_ms)
    }
}

/// All mutable state of one outreach run. Mutated only through scheduler
/// operations; `processing` is the session-level exclusion flag.
#[derive(Debug, Default)]
pub struct OrchestrationSession {
    pub(crate) targets: Vec<Target>,
    pub(crate) cursor: usize,
    pub(crate) active_tabs: Vec<TabHandle>,
    pub(crate) processing: bool,
    pub(crate) success_count: u64,
    pub(crate) failure_count: u64,
}

impl OrchestrationSession {
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active_tabs(&self) -> &[TabHandle] {
        &self.active_tabs
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn counts(&self) -> (u64, u64) {
        (self.success_count, self.failure_count)
    }
}

/// Projection of the session state for display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub total: usize,
    pub processed: usize,
    pub remaining: usize,
    pub current_batch_number: usize,
    pub total_batches: usize,
    pub is_complete: bool,
    pub is_processing: bool,
    pub has_data: bool,
}

/// What one `advance_one_batch` call did.
#[derive(Clone, Debug)]
pub enum AdvanceOutcome {
    Opened(BatchReport),
    /// Every target has already been processed.
    Exhausted,
    /// Another mutating operation is still running; rejected, not queued.
    Busy,
}

#[derive(Clone, Debug)]
pub struct BatchReport {
    pub number: usize,
    pub total_batches: usize,
    /// Tabs actually opened; open failures are skipped, not fatal.
    pub opened: usize,
    /// Targets in the batch slice.
    pub requested: usize,
    /// False when the load wait timed out and the batch degraded.
    pub all_loaded: bool,
}

/// What a per-tab interaction pass (composer open / message send) did.
#[derive(Clone, Debug)]
pub enum InteractOutcome {
    Completed(InteractReport),
    /// No batch is currently open.
    NoActiveTabs,
    Busy,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct InteractReport {
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Clone, Debug)]
pub enum SequenceOutcome {
    Finished(SequenceReport),
    Busy,
}

#[derive(Clone, Debug)]
pub struct SequenceReport {
    pub batches: usize,
    pub succeeded: u64,
    pub failed: u64,
    pub completed: bool,
}
