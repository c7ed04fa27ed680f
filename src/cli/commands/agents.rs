//! agents command - Inspect agents and request shutdowns

use anyhow::Result;
use serde_json::Value;

use crate::cli::args::AgentsAction;
use crate::cli::context::{Context, Session};
use crate::core::types::{Agent, ShutdownRequest};
use crate::transport::Operation;
use crate::ui::format::{
    color_agent_type, color_boundary, color_status, format_timestamp, or_placeholder,
};
use crate::ui::output;

pub async fn agents(session: &mut Session, action: AgentsAction) -> Result<()> {
    match action {
        AgentsAction::List => {
            let agents: Vec<Agent> = session.fetch(Operation::ListAgents).await?;
            output::print(session.render(&agents, |agents| agent_table(agents))?);
        }
        AgentsAction::Show { id } => {
            let agent: Agent = session.fetch(Operation::AgentDetails(id)).await?;
            output::print(session.render(&agent, agent_details)?);
        }
    }
    Ok(())
}

/// Ask an agent to stop.
pub async fn shutdown(
    ctx: &Context,
    session: &mut Session,
    id: &str,
    force: bool,
    reason: Option<String>,
) -> Result<()> {
    let request = ShutdownRequest { force, reason };
    let reply: Value = session
        .call(Operation::ShutdownAgent(id.to_string()), &request)
        .await?;

    if session.is_json() {
        output::print(serde_json::to_string_pretty(&reply)?);
    } else if force {
        output::success(format!("Agent {} is shutting down now", id), ctx.verbosity());
    } else {
        output::success(
            format!("Agent {} will shut down after its current work", id),
            ctx.verbosity(),
        );
    }
    Ok(())
}

fn boundary_cell(boundary: Option<&str>) -> String {
    boundary
        .map(color_boundary)
        .unwrap_or_else(|| or_placeholder(None))
}

fn agent_table(agents: &[Agent]) -> String {
    let rows: Vec<Vec<String>> = agents
        .iter()
        .map(|agent| {
            vec![
                agent.id.clone(),
                or_placeholder(agent.name.as_deref()),
                color_agent_type(&agent.agent_type),
                color_status(&agent.status),
                boundary_cell(agent.boundary.as_deref()),
                or_placeholder(agent.current_work.as_deref()),
                format_timestamp(agent.last_seen.as_deref()),
            ]
        })
        .collect();

    output::render_table(
        &["ID", "NAME", "TYPE", "STATUS", "BOUNDARY", "WORK", "LAST SEEN"],
        &rows,
    )
}

fn agent_details(agent: &Agent) -> String {
    output::format_pairs(&[
        ("id", agent.id.clone()),
        ("name", or_placeholder(agent.name.as_deref())),
        ("type", color_agent_type(&agent.agent_type)),
        ("status", color_status(&agent.status)),
        ("boundary", boundary_cell(agent.boundary.as_deref())),
        ("work", or_placeholder(agent.current_work.as_deref())),
        ("last seen", format_timestamp(agent.last_seen.as_deref())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_table_lists_every_agent() {
        let agents = vec![
            Agent {
                id: "a-1".into(),
                agent_type: "codex".into(),
                status: "idle".into(),
                ..Default::default()
            },
            Agent {
                id: "a-2".into(),
                agent_type: "robot".into(),
                status: "busy".into(),
                current_work: Some("w-7".into()),
                ..Default::default()
            },
        ];
        let rendered = agent_table(&agents);
        assert!(rendered.contains("a-1"));
        assert!(rendered.contains("robot"));
        assert!(rendered.contains("w-7"));
    }

    #[test]
    fn details_include_last_seen() {
        let rendered = agent_details(&Agent {
            id: "a-1".into(),
            agent_type: "shell".into(),
            status: "offline".into(),
            last_seen: Some("not a date".into()),
            ..Default::default()
        });
        assert!(rendered.contains("last seen"));
        assert!(rendered.contains("not a date"));
    }
}
