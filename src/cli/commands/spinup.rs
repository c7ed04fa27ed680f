//! spin-up command - Activate targets and follow spin-ups

use anyhow::Result;

use crate::cli::args::SpinUpAction;
use crate::cli::context::{Context, Session};
use crate::core::types::{Spinup, TriggerSpinupRequest};
use crate::transport::Operation;
use crate::ui::format::{color_status, format_timestamp, or_placeholder};
use crate::ui::output;

pub async fn spinup(ctx: &Context, session: &mut Session, action: SpinUpAction) -> Result<()> {
    match action {
        SpinUpAction::Trigger {
            target,
            boundary,
            work,
        } => {
            let request = TriggerSpinupRequest {
                target,
                boundary: boundary
                    .or_else(|| session.config.default_boundary().map(str::to_string)),
                work_id: work,
            };
            let spinup: Spinup = session.call(Operation::TriggerSpinup, &request).await?;
            if ctx.quiet && !session.is_json() {
                output::print(&spinup.id);
            } else {
                output::print(session.render(&spinup, |s| {
                    format!("Triggered spin-up {}\n{}", s.id, spinup_details(s))
                })?);
            }
        }
        SpinUpAction::Status { id } => {
            let spinup: Spinup = session.fetch(Operation::SpinupStatus(id)).await?;
            output::print(session.render(&spinup, spinup_details)?);
        }
        SpinUpAction::List => {
            let spinups: Vec<Spinup> = session.fetch(Operation::ListSpinups).await?;
            output::print(session.render(&spinups, |s| spinup_table(s))?);
        }
    }
    Ok(())
}

fn spinup_table(spinups: &[Spinup]) -> String {
    let rows: Vec<Vec<String>> = spinups
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.target.clone(),
                color_status(&s.status),
                or_placeholder(s.agent_id.as_deref()),
                format_timestamp(s.started_at.as_deref()),
                format_timestamp(s.completed_at.as_deref()),
            ]
        })
        .collect();

    output::render_table(
        &["ID", "TARGET", "STATUS", "AGENT", "STARTED", "COMPLETED"],
        &rows,
    )
}

fn spinup_details(spinup: &Spinup) -> String {
    let mut pairs = vec![
        ("id", spinup.id.clone()),
        ("target", spinup.target.clone()),
        ("status", color_status(&spinup.status)),
        ("agent", or_placeholder(spinup.agent_id.as_deref())),
        ("started", format_timestamp(spinup.started_at.as_deref())),
        ("completed", format_timestamp(spinup.completed_at.as_deref())),
    ];
    if let Some(error) = &spinup.error {
        pairs.push(("error", error.clone()));
    }
    output::format_pairs(&pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_show_error_only_when_present() {
        let mut spinup = Spinup {
            id: "s-1".into(),
            target: "gpu".into(),
            status: "running".into(),
            ..Default::default()
        };
        assert!(!spinup_details(&spinup).contains("error"));

        spinup.status = "failed".into();
        spinup.error = Some("quota exceeded".into());
        assert!(spinup_details(&spinup).contains("quota exceeded"));
    }

    #[test]
    fn empty_list_renders_header() {
        let rendered = spinup_table(&[]);
        assert!(rendered.contains("TARGET"));
    }
}
