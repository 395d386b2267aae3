use std::time::Instant;

use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use pagereach_core_types::ReachError;
use pagereach_host_ports::{
    DebuggerPort, PageQuery, PageQueryPort, PixelPoint, PointerPhase,
};

use crate::errors::MessageError;
use crate::events::{reason_label, EventsPort};
use crate::model::{ExecCtx, FailReason, MessageParams, MessageReport};
use crate::policy::MessagePolicyView;

pub struct RuntimeDeps<'a> {
    pub pages: &'a dyn PageQueryPort,
    pub debugger: &'a dyn DebuggerPort,
    pub events: &'a dyn EventsPort,
    pub policy: &'a MessagePolicyView,
    /// Process-wide gate: the debugger is attached to at most one tab at a
    /// time, held across the whole attach…detach span.
    pub attach_gate: &'a Mutex<()>,
}

/// Drive the compose-and-send protocol against one tab. The input region is
/// located before anything touches the debugger; the debug session is
/// detached at exactly one point after a successful attach, on success and
/// on every failure path alike. Activating the send control runs as a
/// normal page query, never under the debug session.
#[instrument(skip_all, fields(action = %ctx.action_id.0, tab = %ctx.tab))]
pub async fn execute(
    ctx: &ExecCtx,
    params: MessageParams,
    deps: RuntimeDeps<'_>,
) -> Result<MessageReport, ReachError> {
    if !deps.policy.enabled {
        return Err(MessageError::Disabled.into());
    }
    if params.text.len() > deps.policy.max_text_len {
        return Err(MessageError::TextTooLong(deps.policy.max_text_len).into());
    }
    if ctx.cancel.is_cancelled() {
        return Err(MessageError::Cancelled.into());
    }

    deps.events.emit_started(&ctx.action_id).await;
    let started = Instant::now();

    let point = match locate_input(ctx, &deps).await {
        Ok(Some(point)) => point,
        Ok(None) => {
            return finish_failure(ctx, &deps, started, FailReason::InputNotFound, None).await;
        }
        Err(err) => {
            return finish_failure(
                ctx,
                &deps,
                started,
                FailReason::QueryFailed,
                Some(err.to_string()),
            )
            .await;
        }
    };

    let timings = &deps.policy.timings;
    {
        let _exclusive = deps.attach_gate.lock().await;

        // A stale session from a crashed run would make attach fail; drop it
        // first and ignore absence.
        if let Err(err) = deps.debugger.detach(ctx.tab).await {
            debug!(error = %err, "no stale debug session to drop");
        }
        sleep(timings.pre_attach()).await;

        if let Err(err) = deps.debugger.attach(ctx.tab).await {
            warn!(error = %err, "debugger attach failed");
            if let Err(err) = deps.debugger.detach(ctx.tab).await {
                debug!(error = %err, "detach after failed attach");
            }
            return finish_failure(
                ctx,
                &deps,
                started,
                FailReason::AttachFailed,
                Some(err.to_string()),
            )
            .await;
        }

        let dispatched = drive_input(&deps, ctx, point, &params.text).await;

        // The single detach point for a successfully attached session.
        if let Err(err) = deps.debugger.detach(ctx.tab).await {
            warn!(error = %err, "detach failed after injection");
        }

        if let Err(err) = dispatched {
            return finish_failure(
                ctx,
                &deps,
                started,
                FailReason::DispatchFailed,
                Some(err.to_string()),
            )
            .await;
        }
    }
    sleep(timings.post_detach()).await;

    match deps
        .pages
        .run(
            ctx.tab,
            PageQuery::ActivateByLabel {
                role: deps.policy.send_role.clone(),
                labels: deps.policy.send_labels.clone(),
            },
        )
        .await
        .and_then(|reply| reply.into_activated())
    {
        Ok(true) => {
            let report = MessageReport::success(started);
            deps.events.emit_finished(&ctx.action_id, &report).await;
            Ok(report)
        }
        Ok(false) => {
            finish_failure(ctx, &deps, started, FailReason::SendControlNotFound, None).await
        }
        Err(err) => {
            finish_failure(
                ctx,
                &deps,
                started,
                FailReason::QueryFailed,
                Some(err.to_string()),
            )
            .await
        }
    }
}

async fn locate_input(
    ctx: &ExecCtx,
    deps: &RuntimeDeps<'_>,
) -> Result<Option<PixelPoint>, ReachError> {
    deps.pages
        .run(
            ctx.tab,
            PageQuery::LocateByLabel {
                role: deps.policy.input_role.clone(),
                labels: deps.policy.input_labels.clone(),
            },
        )
        .await
        .and_then(|reply| reply.into_point())
}

/// Focus gesture plus raw-text insert, under an attached debug session.
async fn drive_input(
    deps: &RuntimeDeps<'_>,
    ctx: &ExecCtx,
    point: PixelPoint,
    text: &str,
) -> Result<(), ReachError> {
    let timings = &deps.policy.timings;
    sleep(timings.post_attach()).await;
    deps.debugger
        .dispatch_pointer(ctx.tab, PointerPhase::Pressed, point.x, point.y)
        .await?;
    sleep(timings.press_release_gap()).await;
    deps.debugger
        .dispatch_pointer(ctx.tab, PointerPhase::Released, point.x, point.y)
        .await?;
    sleep(timings.post_focus()).await;
    deps.debugger.insert_text(ctx.tab, text).await?;
    sleep(timings.post_insert()).await;
    Ok(())
}

async fn finish_failure(
    ctx: &ExecCtx,
    deps: &RuntimeDeps<'_>,
    started: Instant,
    reason: FailReason,
    detail: Option<String>,
) -> Result<MessageReport, ReachError> {
    debug!(reason = reason_label(&reason), "message protocol failed");
    let report = MessageReport::failure(started, reason, detail);
    deps.events.emit_finished(&ctx.action_id, &report).await;
    Ok(report)
}
