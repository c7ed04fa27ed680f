//! watch command - Follow a work item until it reaches a terminal status
//!
//! Polls the work status on a fixed interval and prints a line each time
//! the status changes. Ctrl-C stops watching without cancelling the work.

use std::time::Duration;

use anyhow::{bail, Result};
use chrono::Local;
use tracing::debug;

use crate::cli::context::{Context, Session};
use crate::core::types::{Status, WorkItem};
use crate::transport::Operation;
use crate::ui::format::color_status;
use crate::ui::output;

/// How a poll result affects the watch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Progress {
    Continue,
    Finished,
    Failed,
}

pub(super) fn progress(status: &str) -> Progress {
    match Status::parse(status) {
        Some(Status::Failed) => Progress::Failed,
        Some(s) if s.is_terminal() => Progress::Finished,
        _ => Progress::Continue,
    }
}

pub async fn watch(ctx: &Context, session: &mut Session, id: &str, interval: u64) -> Result<()> {
    let interval = Duration::from_secs(interval.max(1));
    let mut last: Option<String> = None;

    loop {
        let item: WorkItem = session.fetch(Operation::WorkStatus(id.to_string())).await?;

        if last.as_deref() != Some(item.status.as_str()) {
            report(session, id, &item)?;
            last = Some(item.status.clone());
        }

        match progress(&item.status) {
            Progress::Finished => return Ok(()),
            Progress::Failed => {
                let detail = item
                    .extra
                    .get("error")
                    .and_then(|e| e.as_str())
                    .map(|e| format!(": {}", e))
                    .unwrap_or_default();
                bail!("work item '{}' failed{}", id, detail);
            }
            Progress::Continue => {}
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                debug!(id, "watch interrupted");
                output::success(format!("Stopped watching {}", id), ctx.verbosity());
                return Ok(());
            }
        }
    }
}

fn report(session: &Session, id: &str, item: &WorkItem) -> Result<()> {
    if session.is_json() {
        output::print(serde_json::to_string(item)?);
    } else {
        output::print(format!(
            "{}  {}  {}",
            Local::now().format("%H:%M:%S"),
            id,
            color_status(&item.status)
        ));
    }
    Ok(())
}
