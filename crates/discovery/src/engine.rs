use std::collections::HashSet;
use std::sync::Arc;

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use pagereach_core_types::{ReachError, TabId, Target, TargetFilter};
use pagereach_host_ports::{PageQuery, PageQueryPort};

use crate::model::{Harvest, ScrollOutcome, ScrollReport, ScrollSession};
use crate::policy::DiscoveryPolicy;

/// Drives one feed page to exhaustion and harvests the profile links it
/// exposed. The engine owns the scroll loop; the page only answers height
/// and link queries.
pub struct ScrollEngine {
    pages: Arc<dyn PageQueryPort>,
    policy: DiscoveryPolicy,
    filter: TargetFilter,
}

impl ScrollEngine {
    pub fn new(pages: Arc<dyn PageQueryPort>, policy: DiscoveryPolicy) -> Result<Self, ReachError> {
        let filter = TargetFilter::from_config(&policy.filter)?;
        Ok(Self {
            pages,
            policy,
            filter,
        })
    }

    /// Scroll until the document height repeats `stable_threshold` times in
    /// a row, the attempt budget runs out, the outer deadline passes, or the
    /// cancellation token fires. Every outcome is terminal; cancellation is
    /// observed cooperatively at the top of each iteration.
    #[instrument(skip_all, fields(tab = %tab))]
    pub async fn run(&self, tab: TabId, cancel: &CancellationToken) -> ScrollReport {
        let scroll = &self.policy.scroll;
        let deadline = Instant::now() + scroll.overall_timeout();
        let mut session = ScrollSession::default();

        loop {
            if cancel.is_cancelled() {
                info!(attempts = session.attempts, "scroll stopped on request");
                return ScrollReport::terminal(
                    ScrollOutcome::Stopped,
                    session.attempts,
                    session.last_height,
                );
            }
            if Instant::now() >= deadline {
                warn!(attempts = session.attempts, "scroll deadline elapsed");
                return ScrollReport::terminal(
                    ScrollOutcome::TimedOut,
                    session.attempts,
                    session.last_height,
                );
            }

            let height = match self
                .pages
                .run(tab, PageQuery::ScrollHeight)
                .await
                .and_then(|reply| reply.into_height())
            {
                Ok(height) => height,
                Err(err) => {
                    warn!(error = %err, "height poll failed, page unavailable");
                    return ScrollReport::erroneous(session.attempts, session.last_height, err);
                }
            };

            if session.observe(height, scroll.stable_threshold) {
                info!(
                    attempts = session.attempts,
                    height, "feed height stabilized"
                );
                return ScrollReport::terminal(
                    ScrollOutcome::Completed,
                    session.attempts,
                    session.last_height,
                );
            }
            debug!(
                height,
                stable = session.stable_count,
                attempt = session.attempts,
                "feed still growing"
            );

            session.attempts += 1;
            if session.attempts >= scroll.max_attempts {
                warn!(attempts = session.attempts, "scroll attempt budget spent");
                return ScrollReport::terminal(
                    ScrollOutcome::Completed,
                    session.attempts,
                    session.last_height,
                );
            }

            if let Err(err) = self
                .pages
                .run(tab, PageQuery::ScrollToBottom)
                .await
                .and_then(|reply| reply.expect_ack())
            {
                warn!(error = %err, "scroll step failed, page unavailable");
                return ScrollReport::erroneous(session.attempts, session.last_height, err);
            }

            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = sleep(scroll.scroll_delay()) => {}
            }
        }
    }

    /// Enumerate anchors in the feed container and reduce them to the
    /// deduplicated target list. A page commonly exposes the same profile
    /// twice (image anchor plus title anchor); the first occurrence wins.
    /// A missing container is reported through the marker, never an error.
    #[instrument(skip_all, fields(tab = %tab))]
    pub async fn collect_targets(&self, tab: TabId) -> Result<Harvest, ReachError> {
        let (container_found, links) = self
            .pages
            .run(
                tab,
                PageQuery::CollectLinks {
                    container_role: self.policy.container_role.clone(),
                },
            )
            .await
            .and_then(|reply| reply.into_links())?;

        if !container_found {
            warn!("feed container not found on page");
            return Ok(Harvest::missing_container());
        }

        let scanned = links.len();
        let mut seen = HashSet::new();
        let mut targets = Vec::new();
        for link in links {
            let title = link.text.trim();
            if title.is_empty() || !self.filter.accepts(&link.href) {
                continue;
            }
            let target = match Target::new(title, &link.href) {
                Ok(target) => target,
                Err(err) => {
                    debug!(href = %link.href, error = %err, "skipping unparseable link");
                    continue;
                }
            };
            if seen.insert(target.dedup_key().to_string()) {
                targets.push(target);
            }
        }

        info!(scanned, kept = targets.len(), "feed harvest finished");
        Ok(Harvest {
            targets,
            container_missing: false,
            scanned,
        })
    }
}
