use std::sync::Arc;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use pagereach_core_types::{ActionId, TabHandle, TabState, Target, TargetFilter};
use pagereach_host_ports::{PageQuery, PageQueryPort};
use pagereach_tabs::TabLifecycle;
use tool_message::{ExecCtx, MessageParams, MessageTool};

use crate::error::SchedulerError;
use crate::events::{NoticeKind, SchedulerEvents};
use crate::model::{
    AdvanceOutcome, BatchProgress, BatchReport, InteractOutcome, InteractReport,
    OrchestrationSession, SchedulerPolicy, SequenceOutcome, SequenceReport,
};

/// Drives one [`OrchestrationSession`] through batches of tabs. All host
/// interaction goes through the injected ports; operations interleave only
/// at awaits, and the session's `processing` flag rejects overlapping
/// mutating operations instead of queueing them.
pub struct BatchScheduler {
    session: OrchestrationSession,
    tabs: TabLifecycle,
    pages: Arc<dyn PageQueryPort>,
    message: Arc<dyn MessageTool>,
    events: Arc<dyn SchedulerEvents>,
    policy: SchedulerPolicy,
    filter: TargetFilter,
}

impl BatchScheduler {
    pub fn new(
        tabs: TabLifecycle,
        pages: Arc<dyn PageQueryPort>,
        message: Arc<dyn MessageTool>,
        events: Arc<dyn SchedulerEvents>,
        policy: SchedulerPolicy,
        filter: TargetFilter,
    ) -> Self {
        Self {
            session: OrchestrationSession::default(),
            tabs,
            pages,
            message,
            events,
            policy,
            filter,
        }
    }

    pub fn session(&self) -> &OrchestrationSession {
        &self.session
    }

    /// Load a fresh target list. Targets whose URL does not match the
    /// profile shape are dropped; an empty remainder leaves the session
    /// untouched and surfaces an error.
    pub async fn initialize(&mut self, targets: Vec<Target>) -> Result<usize, SchedulerError> {
        let valid: Vec<Target> = targets
            .into_iter()
            .filter(|target| self.filter.accepts(&target.url))
            .collect();
        if valid.is_empty() {
            self.events
                .notice(NoticeKind::Error, "no valid targets to process")
                .await;
            return Err(SchedulerError::NoValidTargets);
        }

        self.close_batch_inner().await;
        let accepted = valid.len();
        self.session = OrchestrationSession {
            targets: valid,
            ..OrchestrationSession::default()
        };
        info!(accepted, "session initialized");
        self.events
            .notice(
                NoticeKind::Success,
                &format!("initialized with {accepted} targets ready to process"),
            )
            .await;
        Ok(accepted)
    }

    /// Open the next slice of targets. Leftover tabs from a previous batch
    /// are closed first; per-target open failures are counted and skipped.
    #[instrument(skip_all, fields(cursor = self.session.cursor))]
    pub async fn advance_one_batch(&mut self, skip_exclusion_check: bool) -> AdvanceOutcome {
        if !skip_exclusion_check && self.session.processing {
            self.events
                .notice(NoticeKind::Error, "please wait, another operation is running")
                .await;
            return AdvanceOutcome::Busy;
        }
        if self.session.cursor >= self.session.targets.len() {
            self.events
                .notice(NoticeKind::Success, "all targets have been processed")
                .await;
            return AdvanceOutcome::Exhausted;
        }

        if !skip_exclusion_check {
            self.session.processing = true;
        }
        let report = self.advance_inner().await;
        if !skip_exclusion_check {
            self.session.processing = false;
        }
        AdvanceOutcome::Opened(report)
    }

    async fn advance_inner(&mut self) -> BatchReport {
        if !self.session.active_tabs.is_empty() {
            self.close_batch_inner().await;
        }

        let start = self.session.cursor;
        let end = (start + self.policy.batch_size).min(self.session.targets.len());
        let slice: Vec<Target> = self.session.targets[start..end].to_vec();
        let requested = slice.len();

        let mut opened = Vec::with_capacity(requested);
        for target in slice {
            match self.tabs.open(&target.url).await {
                Ok(id) => opened.push(TabHandle::opened(id, target)),
                Err(err) => {
                    warn!(url = %target.url, error = %err, "failed to open tab");
                    self.session.failure_count += 1;
                }
            }
            sleep(self.policy.inter_open_delay()).await;
        }

        self.events
            .notice(NoticeKind::Success, "waiting for all tabs to load")
            .await;
        let ids: Vec<_> = opened.iter().map(|handle| handle.id).collect();
        let all_loaded = self
            .tabs
            .wait_until_loaded(&ids, self.policy.load_timeout())
            .await;
        if all_loaded {
            for handle in &mut opened {
                handle.state = TabState::Ready;
            }
        }

        self.session.active_tabs = opened;
        self.session.cursor = end;

        let report = BatchReport {
            number: start / self.policy.batch_size + 1,
            total_batches: self.total_batches(),
            opened: self.session.active_tabs.len(),
            requested,
            all_loaded,
        };
        info!(
            batch = report.number,
            total = report.total_batches,
            opened = report.opened,
            all_loaded,
            "batch opened"
        );
        self.events
            .notice(
                NoticeKind::Success,
                &format!(
                    "opened batch {}/{} ({} tabs), progress {}/{}",
                    report.number,
                    report.total_batches,
                    report.opened,
                    end,
                    self.session.targets.len()
                ),
            )
            .await;
        let progress = self.progress();
        self.events.progress(&progress).await;
        report
    }

    /// Close every tab of the current batch. Tabs the user closed by hand
    /// are tolerated.
    pub async fn close_batch(&mut self) {
        self.close_batch_inner().await;
    }

    async fn close_batch_inner(&mut self) {
        if self.session.active_tabs.is_empty() {
            return;
        }
        let ids: Vec<_> = self.session.active_tabs.iter().map(|h| h.id).collect();
        self.tabs.close_all(&ids).await;
        self.session.active_tabs.clear();
        self.events
            .notice(NoticeKind::Success, "closed current batch tabs")
            .await;
    }

    /// Back to the first target; the active batch is torn down.
    pub async fn reset(&mut self) {
        self.session.cursor = 0;
        self.session.processing = false;
        self.close_batch_inner().await;
        self.events
            .notice(NoticeKind::Success, "reset, ready to start from the beginning")
            .await;
    }

    /// Activate the conversation-opening control on every tab of the batch.
    /// The composer must be mounted before the injection protocol can find
    /// the input region.
    pub async fn open_composers(&mut self, skip_exclusion_check: bool) -> InteractOutcome {
        if self.session.active_tabs.is_empty() {
            self.events
                .notice(NoticeKind::Error, "no tabs are open, open a batch first")
                .await;
            return InteractOutcome::NoActiveTabs;
        }
        if !skip_exclusion_check && self.session.processing {
            self.events
                .notice(NoticeKind::Error, "please wait, another operation is running")
                .await;
            return InteractOutcome::Busy;
        }

        if !skip_exclusion_check {
            self.session.processing = true;
        }
        let report = self.open_composers_inner().await;
        if !skip_exclusion_check {
            self.session.processing = false;
        }
        InteractOutcome::Completed(report)
    }

    async fn open_composers_inner(&mut self) -> InteractReport {
        let mut report = InteractReport::default();
        for index in 0..self.session.active_tabs.len() {
            let tab = self.session.active_tabs[index].id;
            self.session.active_tabs[index].state = TabState::Interacting;
            let activated = self
                .pages
                .run(
                    tab,
                    PageQuery::ActivateByText {
                        role: self.policy.composer_role.clone(),
                        fragments: self.policy.composer_fragments.clone(),
                    },
                )
                .await
                .and_then(|reply| reply.into_activated());
            match activated {
                Ok(true) => report.succeeded += 1,
                Ok(false) => {
                    debug!(tab = %tab, "conversation control not found");
                    report.failed += 1;
                }
                Err(err) => {
                    warn!(tab = %tab, error = %err, "conversation control query failed");
                    report.failed += 1;
                }
            }
            sleep(self.policy.post_composer_delay()).await;
        }
        self.events
            .notice(
                NoticeKind::Success,
                &format!(
                    "opened conversation on {}/{} tabs",
                    report.succeeded,
                    report.succeeded + report.failed
                ),
            )
            .await;
        report
    }

    /// Run the injection protocol against every tab of the batch, in
    /// target-list order. Per-tab failures are counted and skipped; they
    /// never abort the pass.
    pub async fn send_messages(
        &mut self,
        text: &str,
        skip_exclusion_check: bool,
    ) -> InteractOutcome {
        if self.session.active_tabs.is_empty() {
            self.events
                .notice(NoticeKind::Error, "no tabs are open, open a batch first")
                .await;
            return InteractOutcome::NoActiveTabs;
        }
        if !skip_exclusion_check && self.session.processing {
            self.events
                .notice(NoticeKind::Error, "please wait, another operation is running")
                .await;
            return InteractOutcome::Busy;
        }

        if !skip_exclusion_check {
            self.session.processing = true;
        }
        let report = self.send_messages_inner(text).await;
        if !skip_exclusion_check {
            self.session.processing = false;
        }
        InteractOutcome::Completed(report)
    }

    async fn send_messages_inner(&mut self, text: &str) -> InteractReport {
        let total = self.session.active_tabs.len();
        self.events
            .notice(
                NoticeKind::Success,
                &format!("sending message to {total} tabs"),
            )
            .await;

        let mut report = InteractReport::default();
        for index in 0..total {
            let tab = self.session.active_tabs[index].id;
            self.session.active_tabs[index].state = TabState::Interacting;
            let ctx = ExecCtx::new(ActionId::new(), tab, CancellationToken::new());
            let params = MessageParams {
                text: text.to_string(),
            };
            match self.message.run(ctx, params).await {
                Ok(outcome) if outcome.ok => {
                    report.succeeded += 1;
                    self.session.success_count += 1;
                }
                Ok(outcome) => {
                    debug!(tab = %tab, reason = ?outcome.reason, "message failed");
                    report.failed += 1;
                    self.session.failure_count += 1;
                }
                Err(err) => {
                    warn!(tab = %tab, error = %err, "message protocol error");
                    report.failed += 1;
                    self.session.failure_count += 1;
                }
            }
            if index + 1 < total {
                sleep(self.policy.inter_message_delay()).await;
            }
        }

        let kind = if report.succeeded > 0 {
            NoticeKind::Success
        } else {
            NoticeKind::Error
        };
        self.events
            .notice(
                kind,
                &format!(
                    "sent message to {}/{} tabs ({} failed)",
                    report.succeeded, total, report.failed
                ),
            )
            .await;
        report
    }

    /// Top-level driver: advance, open composers, inject, close, cool down,
    /// until the target list is exhausted. `processing` is held for the
    /// whole sequence and released on every exit path.
    #[instrument(skip_all, fields(targets = self.session.targets.len()))]
    pub async fn run_full_sequence(
        &mut self,
        message: &str,
    ) -> Result<SequenceOutcome, SchedulerError> {
        if message.trim().is_empty() {
            self.events
                .notice(NoticeKind::Error, "enter a message before sending")
                .await;
            return Err(SchedulerError::EmptyPayload);
        }
        if self.session.processing {
            self.events
                .notice(NoticeKind::Error, "please wait, another operation is running")
                .await;
            return Ok(SequenceOutcome::Busy);
        }

        self.session.processing = true;
        let report = self.run_sequence_inner(message).await;
        self.session.processing = false;
        Ok(SequenceOutcome::Finished(report))
    }

    async fn run_sequence_inner(&mut self, message: &str) -> SequenceReport {
        let mut batches = 0;
        loop {
            match self.advance_one_batch(true).await {
                AdvanceOutcome::Opened(_) => {}
                AdvanceOutcome::Exhausted | AdvanceOutcome::Busy => break,
            }
            batches += 1;
            self.open_composers(true).await;
            self.send_messages(message, true).await;
            self.close_batch_inner().await;
            if self.session.cursor < self.session.targets.len() {
                sleep(self.policy.batch_cooldown()).await;
            }
        }

        let (succeeded, failed) = self.session.counts();
        let report = SequenceReport {
            batches,
            succeeded,
            failed,
            completed: self.session.cursor >= self.session.targets.len(),
        };
        info!(
            batches = report.batches,
            succeeded = report.succeeded,
            failed = report.failed,
            "sequence finished"
        );
        self.events
            .notice(
                NoticeKind::Success,
                &format!(
                    "sequence finished: {} sent, {} failed across {} batches",
                    report.succeeded, report.failed, report.batches
                ),
            )
            .await;
        report
    }

    pub fn progress(&self) -> BatchProgress {
        let total = self.session.targets.len();
        let processed = self.session.cursor;
        let total_batches = self.total_batches();
        let is_complete = total > 0 && processed >= total;
        let current_batch_number = if total == 0 {
            0
        } else if is_complete {
            total_batches
        } else {
            processed / self.policy.batch_size + 1
        };
        BatchProgress {
            total,
            processed,
            remaining: total - processed,
            current_batch_number,
            total_batches,
            is_complete,
            is_processing: self.session.processing,
            has_data: total > 0,
        }
    }

    fn total_batches(&self) -> usize {
        let total = self.session.targets.len();
        if total == 0 {
            0
        } else {
            total.div_ceil(self.policy.batch_size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use pagereach_core_types::ReachError;
    use pagereach_host_ports::{QueryReply, TabControlPort, TabStatus};
    use pagereach_tabs::TabPolicy;
    use tool_message::MessageReport;

    #[derive(Default)]
    struct MockTabControl {
        next_id: AtomicI64,
        opened: Mutex<Vec<String>>,
        closed: Mutex<Vec<pagereach_core_types::TabId>>,
        fail_opens: bool,
    }

    #[async_trait]
    impl TabControlPort for MockTabControl {
        async fn open(
            &self,
            url: &str,
            _background: bool,
        ) -> Result<pagereach_core_types::TabId, ReachError> {
            if self.fail_opens {
                return Err(ReachError::host("tab creation refused"));
            }
            self.opened.lock().unwrap().push(url.to_string());
            Ok(pagereach_core_types::TabId(
                self.next_id.fetch_add(1, Ordering::SeqCst),
            ))
        }

        async fn close(&self, tab: pagereach_core_types::TabId) -> Result<(), ReachError> {
            self.closed.lock().unwrap().push(tab);
            Ok(())
        }

        async fn status(
            &self,
            _tab: pagereach_core_types::TabId,
        ) -> Result<TabStatus, ReachError> {
            Ok(TabStatus { loaded: true })
        }
    }

    #[derive(Default)]
    struct MockPages {
        composer_missing: bool,
    }

    #[async_trait]
    impl PageQueryPort for MockPages {
        async fn run(
            &self,
            _tab: pagereach_core_types::TabId,
            query: PageQuery,
        ) -> Result<QueryReply, ReachError> {
            match query {
                PageQuery::ActivateByText { .. } => {
                    Ok(QueryReply::Activated(!self.composer_missing))
                }
                _ => Err(ReachError::ReplyShape("unused")),
            }
        }
    }

    #[derive(Default)]
    struct MockMessage {
        runs: Mutex<usize>,
        always_fails: bool,
    }

    #[async_trait]
    impl MessageTool for MockMessage {
        async fn run(
            &self,
            _ctx: ExecCtx,
            _params: MessageParams,
        ) -> Result<MessageReport, ReachError> {
            *self.runs.lock().unwrap() += 1;
            Ok(MessageReport {
                ok: !self.always_fails,
                reason: None,
                detail: None,
                latency_ms: 0,
            })
        }
    }

    struct Fixture {
        control: Arc<MockTabControl>,
        message: Arc<MockMessage>,
        scheduler: BatchScheduler,
    }

    fn fast_policy() -> SchedulerPolicy {
        SchedulerPolicy {
            inter_open_delay_ms: 0,
            load_timeout_ms: 50,
            post_composer_delay_ms: 0,
            inter_message_delay_ms: 0,
            batch_cooldown_ms: 0,
            ..SchedulerPolicy::default()
        }
    }

    fn fixture_with(control: MockTabControl, pages: MockPages, message: MockMessage) -> Fixture {
        let control = Arc::new(control);
        let message = Arc::new(message);
        let tabs = TabLifecycle::new(
            control.clone(),
            TabPolicy {
                poll_interval_ms: 1,
                settle_ms: 0,
                ..TabPolicy::default()
            },
        );
        let scheduler = BatchScheduler::new(
            tabs,
            Arc::new(pages),
            message.clone(),
            Arc::new(crate::events::NoopEvents),
            fast_policy(),
            TargetFilter::default(),
        );
        Fixture {
            control,
            message,
            scheduler,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(
            MockTabControl::default(),
            MockPages::default(),
            MockMessage::default(),
        )
    }

    fn targets(count: usize) -> Vec<Target> {
        (0..count)
            .map(|i| {
                Target::new(
                    format!("Page {i}"),
                    &format!("https://www.facebook.com/page{i}"),
                )
                .unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn twelve_targets_split_into_batches_of_five_five_two() {
        let mut f = fixture();
        assert_eq!(f.scheduler.initialize(targets(12)).await.unwrap(), 12);

        for (expected_cursor, expected_size) in [(5usize, 5usize), (10, 5), (12, 2)] {
            match f.scheduler.advance_one_batch(false).await {
                AdvanceOutcome::Opened(report) => {
                    assert_eq!(report.requested, expected_size);
                    assert_eq!(report.opened, expected_size);
                }
                other => panic!("expected batch, got {other:?}"),
            }
            assert_eq!(f.scheduler.session().cursor(), expected_cursor);
            assert_eq!(f.scheduler.session().active_tabs().len(), expected_size);
            assert!(!f.scheduler.session().is_processing());
        }

        assert!(matches!(
            f.scheduler.advance_one_batch(false).await,
            AdvanceOutcome::Exhausted
        ));
        assert_eq!(f.scheduler.session().cursor(), 12);
    }

    #[tokio::test]
    async fn previous_batch_is_closed_before_the_next_opens() {
        let mut f = fixture();
        f.scheduler.initialize(targets(7)).await.unwrap();
        f.scheduler.advance_one_batch(false).await;
        assert!(f.control.closed.lock().unwrap().is_empty());
        f.scheduler.advance_one_batch(false).await;
        assert_eq!(f.control.closed.lock().unwrap().len(), 5);
        assert_eq!(f.scheduler.session().active_tabs().len(), 2);
    }

    #[tokio::test]
    async fn busy_session_rejects_without_mutating() {
        let mut f = fixture();
        f.scheduler.initialize(targets(6)).await.unwrap();
        f.scheduler.session.processing = true;
        assert!(matches!(
            f.scheduler.advance_one_batch(false).await,
            AdvanceOutcome::Busy
        ));
        assert_eq!(f.scheduler.session().cursor(), 0);
        assert!(f.control.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn initialize_rejects_when_no_target_survives_the_filter() {
        let mut f = fixture();
        let junk = vec![
            Target::new("group", "https://www.facebook.com/groups/123").unwrap(),
            Target::new("elsewhere", "https://example.com/acme").unwrap(),
        ];
        assert!(matches!(
            f.scheduler.initialize(junk).await,
            Err(SchedulerError::NoValidTargets)
        ));
        assert!(f.scheduler.session().targets().is_empty());
    }

    #[tokio::test]
    async fn open_failures_are_counted_and_processing_is_released() {
        let mut f = fixture_with(
            MockTabControl {
                fail_opens: true,
                ..MockTabControl::default()
            },
            MockPages::default(),
            MockMessage::default(),
        );
        f.scheduler.initialize(targets(5)).await.unwrap();
        match f.scheduler.advance_one_batch(false).await {
            AdvanceOutcome::Opened(report) => {
                assert_eq!(report.opened, 0);
                assert_eq!(report.requested, 5);
            }
            other => panic!("expected batch, got {other:?}"),
        }
        assert_eq!(f.scheduler.session().counts().1, 5);
        assert!(f.scheduler.session().active_tabs().is_empty());
        assert!(!f.scheduler.session().is_processing());
        assert_eq!(f.scheduler.session().cursor(), 5);
    }

    #[tokio::test]
    async fn close_batch_empties_active_tabs() {
        let mut f = fixture();
        f.scheduler.initialize(targets(3)).await.unwrap();
        f.scheduler.advance_one_batch(false).await;
        assert_eq!(f.scheduler.session().active_tabs().len(), 3);
        f.scheduler.close_batch().await;
        assert!(f.scheduler.session().active_tabs().is_empty());
        assert_eq!(f.control.closed.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn reset_rewinds_cursor_and_tears_down() {
        let mut f = fixture();
        f.scheduler.initialize(targets(6)).await.unwrap();
        f.scheduler.advance_one_batch(false).await;
        f.scheduler.reset().await;
        assert_eq!(f.scheduler.session().cursor(), 0);
        assert!(!f.scheduler.session().is_processing());
        assert!(f.scheduler.session().active_tabs().is_empty());
    }

    #[tokio::test]
    async fn interactions_require_an_open_batch() {
        let mut f = fixture();
        f.scheduler.initialize(targets(4)).await.unwrap();
        assert!(matches!(
            f.scheduler.open_composers(false).await,
            InteractOutcome::NoActiveTabs
        ));
        assert!(matches!(
            f.scheduler.send_messages("hi", false).await,
            InteractOutcome::NoActiveTabs
        ));
    }

    #[tokio::test]
    async fn full_sequence_walks_every_batch_and_releases_processing() {
        let mut f = fixture();
        f.scheduler.initialize(targets(7)).await.unwrap();
        let outcome = f.scheduler.run_full_sequence("hello there").await.unwrap();
        let report = match outcome {
            SequenceOutcome::Finished(report) => report,
            SequenceOutcome::Busy => panic!("unexpected busy"),
        };
        assert_eq!(report.batches, 2);
        assert!(report.completed);
        assert_eq!(report.succeeded, 7);
        assert_eq!(report.failed, 0);
        assert_eq!(*f.message.runs.lock().unwrap(), 7);
        assert!(!f.scheduler.session().is_processing());
        assert!(f.scheduler.session().active_tabs().is_empty());
        // Every opened tab was closed again.
        assert_eq!(f.control.closed.lock().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn full_sequence_counts_message_failures_without_aborting() {
        let mut f = fixture_with(
            MockTabControl::default(),
            MockPages::default(),
            MockMessage {
                always_fails: true,
                ..MockMessage::default()
            },
        );
        f.scheduler.initialize(targets(6)).await.unwrap();
        let outcome = f.scheduler.run_full_sequence("hello").await.unwrap();
        match outcome {
            SequenceOutcome::Finished(report) => {
                assert_eq!(report.batches, 2);
                assert_eq!(report.failed, 6);
                assert_eq!(report.succeeded, 0);
                assert!(report.completed);
            }
            SequenceOutcome::Busy => panic!("unexpected busy"),
        }
        assert!(!f.scheduler.session().is_processing());
    }

    #[tokio::test]
    async fn full_sequence_rejects_empty_payload() {
        let mut f = fixture();
        f.scheduler.initialize(targets(2)).await.unwrap();
        assert!(matches!(
            f.scheduler.run_full_sequence("   ").await,
            Err(SchedulerError::EmptyPayload)
        ));
        assert!(!f.scheduler.session().is_processing());
    }

    #[tokio::test]
    async fn progress_reports_the_original_projection() {
        let mut f = fixture();
        f.scheduler.initialize(targets(12)).await.unwrap();
        let fresh = f.scheduler.progress();
        assert_eq!(fresh.total_batches, 3);
        assert_eq!(fresh.current_batch_number, 1);
        assert!(!fresh.is_complete);

        f.scheduler.advance_one_batch(false).await;
        let mid = f.scheduler.progress();
        assert_eq!(mid.processed, 5);
        assert_eq!(mid.remaining, 7);
        assert_eq!(mid.current_batch_number, 2);

        f.scheduler.advance_one_batch(false).await;
        f.scheduler.advance_one_batch(false).await;
        let done = f.scheduler.progress();
        assert!(done.is_complete);
        assert_eq!(done.current_batch_number, 3);
        assert_eq!(done.remaining, 0);
    }

    #[tokio::test]
    async fn load_wait_timeout_degrades_but_does_not_abort() {
        struct NeverLoaded(MockTabControl);

        #[async_trait]
        impl TabControlPort for NeverLoaded {
            async fn open(
                &self,
                url: &str,
                background: bool,
            ) -> Result<pagereach_core_types::TabId, ReachError> {
                self.0.open(url, background).await
            }

            async fn close(&self, tab: pagereach_core_types::TabId) -> Result<(), ReachError> {
                self.0.close(tab).await
            }

            async fn status(
                &self,
                _tab: pagereach_core_types::TabId,
            ) -> Result<TabStatus, ReachError> {
                Ok(TabStatus { loaded: false })
            }
        }

        let control = Arc::new(NeverLoaded(MockTabControl::default()));
        let tabs = TabLifecycle::new(
            control,
            TabPolicy {
                poll_interval_ms: 1,
                settle_ms: 0,
                ..TabPolicy::default()
            },
        );
        let mut scheduler = BatchScheduler::new(
            tabs,
            Arc::new(MockPages::default()),
            Arc::new(MockMessage::default()),
            Arc::new(crate::events::NoopEvents),
            SchedulerPolicy {
                load_timeout_ms: 5,
                inter_open_delay_ms: 0,
                ..fast_policy()
            },
            TargetFilter::default(),
        );
        scheduler.initialize(targets(2)).await.unwrap();
        match scheduler.advance_one_batch(false).await {
            AdvanceOutcome::Opened(report) => {
                assert!(!report.all_loaded);
                assert_eq!(report.opened, 2);
            }
            other => panic!("expected batch, got {other:?}"),
        }
        assert_eq!(scheduler.session().cursor(), 2);
    }
}
