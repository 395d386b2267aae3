//! Thin lifecycle layer over the host's tab control: background opens,
//! tolerant batch teardown, and load polling with a post-load settle so
//! client-side rendering can finish before anyone touches the page.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use pagereach_core_types::{ReachError, TabId};
use pagereach_host_ports::TabControlPort;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TabPolicy {
    /// Open tabs without focusing them.
    pub open_in_background: bool,
    /// Interval between load-status polls.
    pub poll_interval_ms: u64,
    /// Extra settle after every tab reports loaded; the host's "loaded"
    /// precedes full DOM readiness on script-heavy pages.
    pub settle_ms: u64,
}

impl Default for TabPolicy {
    fn default() -> Self {
        Self {
            open_in_background: true,
            poll_interval_ms: 500,
            settle_ms: 3000,
        }
    }
}

impl TabPolicy {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

pub struct TabLifecycle {
    controller: Arc<dyn TabControlPort>,
    policy: TabPolicy,
}

impl TabLifecycle {
    pub fn new(controller: Arc<dyn TabControlPort>, policy: TabPolicy) -> Self {
        Self { controller, policy }
    }

    pub async fn open(&self, url: &str) -> Result<TabId, ReachError> {
        self.controller
            .open(url, self.policy.open_in_background)
            .await
    }

    /// Close every tab in the list. A tab the user already closed by hand is
    /// treated as closed, not as a failure.
    pub async fn close_all(&self, tabs: &[TabId]) {
        for tab in tabs {
            if let Err(err) = self.controller.close(*tab).await {
                debug!(tab = %tab, error = %err, "tab already gone during close");
            }
        }
    }

    /// Poll until every tab reports loaded, then observe the settle delay.
    /// Returns false when the timeout elapses first; the caller proceeds in
    /// degraded mode. A status query failure counts the tab as loaded — a
    /// vanished tab must not stall the batch.
    pub async fn wait_until_loaded(&self, tabs: &[TabId], timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let mut all_loaded = true;
            for tab in tabs {
                match self.controller.status(*tab).await {
                    Ok(status) if !status.loaded => {
                        all_loaded = false;
                        break;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        debug!(tab = %tab, error = %err, "status query failed, counting tab as loaded");
                    }
                }
            }
            if all_loaded {
                sleep(self.policy.settle()).await;
                return true;
            }
            if Instant::now() >= deadline {
                warn!("tab load wait timed out, proceeding with degraded batch");
                return false;
            }
            sleep(self.policy.poll_interval()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use pagereach_host_ports::TabStatus;

    #[derive(Default)]
    struct MockController {
        next_id: AtomicI64,
        opened: Mutex<Vec<String>>,
        closed: Mutex<Vec<TabId>>,
        close_fails: bool,
        /// Per-tab number of polls before the tab reports loaded.
        polls_until_loaded: Mutex<Vec<(TabId, u32)>>,
    }

    #[async_trait]
    impl TabControlPort for MockController {
        async fn open(&self, url: &str, _background: bool) -> Result<TabId, ReachError> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(TabId(self.next_id.fetch_add(1, Ordering::SeqCst)))
        }

        async fn close(&self, tab: TabId) -> Result<(), ReachError> {
            self.closed.lock().unwrap().push(tab);
            if self.close_fails {
                Err(ReachError::host("no tab with given id"))
            } else {
                Ok(())
            }
        }

        async fn status(&self, tab: TabId) -> Result<TabStatus, ReachError> {
            let mut pending = self.polls_until_loaded.lock().unwrap();
            if let Some(entry) = pending.iter_mut().find(|(id, _)| *id == tab) {
                if entry.1 > 0 {
                    entry.1 -= 1;
                    return Ok(TabStatus { loaded: false });
                }
            }
            Ok(TabStatus { loaded: true })
        }
    }

    fn fast_policy() -> TabPolicy {
        TabPolicy {
            open_in_background: true,
            poll_interval_ms: 1,
            settle_ms: 0,
        }
    }

    #[tokio::test]
    async fn close_all_swallows_already_closed_tabs() {
        let controller = Arc::new(MockController {
            close_fails: true,
            ..MockController::default()
        });
        let tabs = TabLifecycle::new(controller.clone(), fast_policy());
        tabs.close_all(&[TabId(1), TabId(2)]).await;
        assert_eq!(controller.closed.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn wait_until_loaded_polls_to_completion() {
        let controller = Arc::new(MockController::default());
        controller
            .polls_until_loaded
            .lock()
            .unwrap()
            .push((TabId(7), 3));
        let tabs = TabLifecycle::new(controller, fast_policy());
        let loaded = tabs
            .wait_until_loaded(&[TabId(7)], Duration::from_secs(1))
            .await;
        assert!(loaded);
    }

    #[tokio::test]
    async fn wait_until_loaded_times_out_and_degrades() {
        let controller = Arc::new(MockController::default());
        controller
            .polls_until_loaded
            .lock()
            .unwrap()
            .push((TabId(7), u32::MAX));
        let tabs = TabLifecycle::new(controller, fast_policy());
        let loaded = tabs
            .wait_until_loaded(&[TabId(7)], Duration::from_millis(10))
            .await;
        assert!(!loaded);
    }
}
