//! targets command - Manage spin-up targets

use anyhow::{bail, Context as _, Result};
use owo_colors::OwoColorize;
use serde_json::Value;

use crate::cli::args::TargetsAction;
use crate::cli::context::{Context, Session};
use crate::core::types::{SpinupTarget, TargetSpec, TargetTestResult};
use crate::transport::Operation;
use crate::ui::format::{color_agent_type, color_boundary, format_timestamp, or_placeholder};
use crate::ui::output;

pub async fn targets(ctx: &Context, session: &mut Session, action: TargetsAction) -> Result<()> {
    match action {
        TargetsAction::List => {
            let targets: Vec<SpinupTarget> = session.fetch(Operation::ListTargets).await?;
            output::print(session.render(&targets, |targets| target_table(targets))?);
        }
        TargetsAction::Register {
            name,
            kind,
            boundary,
            agent_type,
            target_config,
        } => {
            let request = TargetSpec {
                name: Some(name),
                kind: Some(kind),
                boundary,
                agent_type,
                config: target_config.as_deref().map(parse_config).transpose()?,
            };
            let target: SpinupTarget = session.call(Operation::RegisterTarget, &request).await?;
            if ctx.quiet && !session.is_json() {
                output::print(&target.id);
            } else {
                output::print(session.render(&target, |t| {
                    format!("Registered target {}\n{}", t.name, target_details(t))
                })?);
            }
        }
        TargetsAction::Get { id } => {
            let target: SpinupTarget = session.fetch(Operation::GetTarget(id)).await?;
            output::print(session.render(&target, target_details)?);
        }
        TargetsAction::Update {
            id,
            name,
            boundary,
            agent_type,
            target_config,
        } => {
            let request = TargetSpec {
                name,
                kind: None,
                boundary,
                agent_type,
                config: target_config.as_deref().map(parse_config).transpose()?,
            };
            if request == TargetSpec::default() {
                bail!("nothing to update: pass at least one of --name, --boundary, --agent-type, --target-config");
            }
            let target: SpinupTarget = session.call(Operation::UpdateTarget(id), &request).await?;
            output::print(session.render(&target, target_details)?);
        }
        TargetsAction::Remove { id } => {
            let reply: Value = session.fetch(Operation::RemoveTarget(id.clone())).await?;
            acknowledge(ctx, session, &reply, format!("Removed target {}", id))?;
        }
        TargetsAction::Test { id } => {
            let result: TargetTestResult = session.fetch(Operation::TestTarget(id.clone())).await?;
            output::print(session.render(&result, |r| test_summary(&id, r))?);
            if !result.success {
                bail!(
                    "target '{}' is not reachable{}",
                    id,
                    result
                        .message
                        .as_deref()
                        .map(|m| format!(": {}", m))
                        .unwrap_or_default()
                );
            }
        }
        TargetsAction::Enable { id } => {
            let reply: Value = session.fetch(Operation::EnableTarget(id.clone())).await?;
            acknowledge(ctx, session, &reply, format!("Enabled target {}", id))?;
        }
        TargetsAction::Disable { id } => {
            let reply: Value = session.fetch(Operation::DisableTarget(id.clone())).await?;
            acknowledge(ctx, session, &reply, format!("Disabled target {}", id))?;
        }
    }
    Ok(())
}

/// Parse `--target-config`, which must be a JSON object.
pub(super) fn parse_config(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw).context("--target-config is not valid JSON")?;
    if !value.is_object() {
        bail!("--target-config must be a JSON object");
    }
    Ok(value)
}

fn acknowledge(ctx: &Context, session: &Session, reply: &Value, message: String) -> Result<()> {
    if session.is_json() {
        output::print(serde_json::to_string_pretty(reply)?);
    } else {
        output::success(message, ctx.verbosity());
    }
    Ok(())
}

fn enabled_cell(enabled: bool) -> String {
    if enabled {
        "yes".green().to_string()
    } else {
        "no".dimmed().to_string()
    }
}

fn target_table(targets: &[SpinupTarget]) -> String {
    let rows: Vec<Vec<String>> = targets
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.name.clone(),
                t.kind.clone(),
                enabled_cell(t.enabled),
                t.boundary
                    .as_deref()
                    .map(color_boundary)
                    .unwrap_or_else(|| or_placeholder(None)),
                t.agent_type
                    .as_deref()
                    .map(color_agent_type)
                    .unwrap_or_else(|| or_placeholder(None)),
                format_timestamp(t.last_tested_at.as_deref()),
            ]
        })
        .collect();

    output::render_table(
        &["ID", "NAME", "TYPE", "ENABLED", "BOUNDARY", "AGENT TYPE", "LAST TESTED"],
        &rows,
    )
}

fn target_details(target: &SpinupTarget) -> String {
    output::format_pairs(&[
        ("id", target.id.clone()),
        ("name", target.name.clone()),
        ("type", target.kind.clone()),
        ("enabled", enabled_cell(target.enabled)),
        (
            "boundary",
            target
                .boundary
                .as_deref()
                .map(color_boundary)
                .unwrap_or_else(|| or_placeholder(None)),
        ),
        ("agent type", or_placeholder(target.agent_type.as_deref())),
        ("last tested", format_timestamp(target.last_tested_at.as_deref())),
    ])
}

fn test_summary(id: &str, result: &TargetTestResult) -> String {
    let latency = result
        .latency_ms
        .map(|ms| format!(" ({} ms)", ms))
        .unwrap_or_default();
    if result.success {
        format!("{} Target {} is reachable{}", "✓".green(), id, latency)
    } else {
        format!(
            "{} Target {} failed its test{}",
            "✗".red(),
            id,
            result
                .message
                .as_deref()
                .map(|m| format!(": {}", m))
                .unwrap_or_default()
        )
    }
}
