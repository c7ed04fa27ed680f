//! work command - List, inspect, and cancel work items

use anyhow::Result;
use serde_json::Value;

use crate::cli::args::WorkAction;
use crate::cli::context::{Context, Session};
use crate::core::types::{CancelWorkRequest, WorkFilter, WorkItem};
use crate::transport::Operation;
use crate::ui::format::{color_boundary, color_status, format_timestamp, or_placeholder, truncate};
use crate::ui::output;

const TITLE_WIDTH: usize = 40;

pub async fn work(ctx: &Context, session: &mut Session, action: WorkAction) -> Result<()> {
    match action {
        WorkAction::List {
            status,
            boundary,
            limit,
        } => {
            let filter = WorkFilter {
                status,
                boundary,
                limit,
            };
            list(session, &filter).await
        }
        WorkAction::Get { id } => get(session, &id).await,
        WorkAction::Status { id } => status(session, &id).await,
        WorkAction::Cancel { id, reason } => cancel(ctx, session, &id, reason).await,
    }
}

async fn list(session: &mut Session, filter: &WorkFilter) -> Result<()> {
    let items: Vec<WorkItem> = session.call(Operation::ListWork, filter).await?;
    output::print(session.render(&items, |items| work_table(items))?);
    Ok(())
}

async fn get(session: &mut Session, id: &str) -> Result<()> {
    let item: WorkItem = session.fetch(Operation::GetWork(id.to_string())).await?;
    output::print(session.render(&item, work_details)?);
    Ok(())
}

async fn status(session: &mut Session, id: &str) -> Result<()> {
    let item: WorkItem = session.fetch(Operation::WorkStatus(id.to_string())).await?;
    output::print(session.render(&item, |item| color_status(&item.status))?);
    Ok(())
}

async fn cancel(
    ctx: &Context,
    session: &mut Session,
    id: &str,
    reason: Option<String>,
) -> Result<()> {
    let request = CancelWorkRequest { reason };
    let reply: Value = session
        .call(Operation::CancelWork(id.to_string()), &request)
        .await?;

    if session.is_json() {
        output::print(session.render(&reply, |_| String::new())?);
    } else {
        output::success(format!("Cancelled work item {}", id), ctx.verbosity());
    }
    Ok(())
}

pub(super) fn work_table(items: &[WorkItem]) -> String {
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.id.clone(),
                truncate(&item.title, TITLE_WIDTH),
                color_status(&item.status),
                item.priority
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| or_placeholder(None)),
                item.boundary
                    .as_deref()
                    .map(color_boundary)
                    .unwrap_or_else(|| or_placeholder(None)),
                or_placeholder(item.assigned_agent.as_deref()),
                format_timestamp(item.created_at.as_deref()),
            ]
        })
        .collect();

    output::render_table(
        &["ID", "TITLE", "STATUS", "PRIORITY", "BOUNDARY", "AGENT", "CREATED"],
        &rows,
    )
}

pub(super) fn work_details(item: &WorkItem) -> String {
    let mut pairs = vec![
        ("id", item.id.clone()),
        ("title", item.title.clone()),
        ("status", color_status(&item.status)),
        (
            "priority",
            item.priority
                .map(|p| p.to_string())
                .unwrap_or_else(|| or_placeholder(None)),
        ),
        (
            "boundary",
            item.boundary
                .as_deref()
                .map(color_boundary)
                .unwrap_or_else(|| or_placeholder(None)),
        ),
        ("agent", or_placeholder(item.assigned_agent.as_deref())),
        ("created", format_timestamp(item.created_at.as_deref())),
        ("updated", format_timestamp(item.updated_at.as_deref())),
    ];
    if let Some(description) = &item.description {
        pairs.push(("description", description.clone()));
    }
    output::format_pairs(&pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> WorkItem {
        WorkItem {
            id: id.into(),
            title: title.into(),
            status: "queued".into(),
            ..Default::default()
        }
    }

    #[test]
    fn table_keeps_coordinator_order() {
        let rendered = work_table(&[item("w-2", "Second"), item("w-1", "First")]);
        assert!(rendered.find("w-2").unwrap() < rendered.find("w-1").unwrap());
    }

    #[test]
    fn long_titles_are_truncated() {
        let title = "x".repeat(100);
        let rendered = work_table(&[item("w-1", &title)]);
        assert!(!rendered.contains(&title));
        assert!(rendered.contains('…'));
    }

    #[test]
    fn details_show_placeholders_for_missing_fields() {
        let rendered = work_details(&item("w-1", "Build"));
        assert!(rendered.contains("agent"));
        assert!(rendered.lines().any(|l| l.starts_with("agent") && l.ends_with('-')));
        assert!(!rendered.contains("description"));
    }
}
