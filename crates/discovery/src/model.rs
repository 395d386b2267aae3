use pagereach_core_types::{ReachError, Target};

/// Terminal outcome of one scroll session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScrollOutcome {
    /// Height stabilized, or the attempt budget was exhausted.
    Completed,
    /// External cancellation observed at a poll point.
    Stopped,
    /// The outer deadline elapsed before the feed stabilized.
    TimedOut,
    /// The page became unavailable or a host query failed.
    Erroneous,
}

#[derive(Clone, Debug)]
pub struct ScrollReport {
    pub outcome: ScrollOutcome,
    pub attempts: u32,
    pub final_height: Option<i64>,
    pub error: Option<ReachError>,
}

impl ScrollReport {
    pub(crate) fn terminal(outcome: ScrollOutcome, attempts: u32, final_height: Option<i64>) -> Self {
        Self {
            outcome,
            attempts,
            final_height,
            error: None,
        }
    }

    pub(crate) fn erroneous(attempts: u32, final_height: Option<i64>, error: ReachError) -> Self {
        Self {
            outcome: ScrollOutcome::Erroneous,
            attempts,
            final_height,
            error: Some(error),
        }
    }
}

/// Result of harvesting the feed container for profile links.
#[derive(Clone, Debug)]
pub struct Harvest {
    pub targets: Vec<Target>,
    /// The expected feed container was absent; fatal for this run only.
    pub container_missing: bool,
    /// Anchors inspected before filtering and dedup.
    pub scanned: usize,
}

impl Harvest {
    pub(crate) fn missing_container() -> Self {
        Self {
            targets: Vec::new(),
            container_missing: true,
            scanned: 0,
        }
    }
}

/// Height-observation bookkeeping for one scroll session. A height equal to
/// the previous observation extends the stable run; a new height restarts it
/// at one, so `stable_count` is the length of the current run of identical
/// observations.
#[derive(Debug, Default)]
pub(crate) struct ScrollSession {
    pub last_height: Option<i64>,
    pub stable_count: u32,
    pub attempts: u32,
}

impl ScrollSession {
    /// Record one height observation; true once the run reaches `threshold`.
    pub fn observe(&mut self, height: i64, threshold: u32) -> bool {
        if self.last_height == Some(height) {
            self.stable_count += 1;
        } else {
            self.last_height = Some(height);
            self.stable_count = 1;
        }
        self.stable_count >= threshold
    }
}
