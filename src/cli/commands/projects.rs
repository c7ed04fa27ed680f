//! projects command - Show or switch the current project

use anyhow::Result;
use serde_json::json;

use crate::cli::args::ProjectsAction;
use crate::cli::context::Context;
use crate::core::config::{ConfigKey, LayerSource, OutputMode};
use crate::transport::SubjectNamer;
use crate::ui::output;

pub fn projects(ctx: &Context, action: ProjectsAction) -> Result<()> {
    match action {
        ProjectsAction::Current => current(ctx),
        ProjectsAction::Use { id } => use_project(ctx, &id),
    }
}

fn current(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let project = config.project_id();
    let source = config
        .source_of(ConfigKey::ProjectId)
        .unwrap_or(LayerSource::Default);

    match ctx.output_mode(&config) {
        OutputMode::Json => output::print(serde_json::to_string_pretty(&json!({
            "projectId": project,
            "source": source.to_string(),
        }))?),
        OutputMode::Table if ctx.quiet => output::print(project),
        OutputMode::Table => output::print(format!("{} (from {})", project, source)),
    }
    Ok(())
}

fn use_project(ctx: &Context, id: &str) -> Result<()> {
    // Reject ids that cannot appear in a subject before persisting them.
    SubjectNamer::new(id)?;

    let path = ctx
        .store()
        .set(ConfigKey::ProjectId.name(), id, ctx.config_path())?;
    output::success(
        format!("Now using project {} ({})", id, path.display()),
        ctx.verbosity(),
    );

    let config = ctx.load_config()?;
    match config.source_of(ConfigKey::ProjectId) {
        Some(LayerSource::Environment) => output::warn(
            format!(
                "WEFT_PROJECT_ID is set and overrides the saved project ({})",
                config.project_id()
            ),
            ctx.verbosity(),
        ),
        Some(LayerSource::Override) if config.project_id() != id => output::warn(
            format!("--project {} applies to this invocation only", config.project_id()),
            ctx.verbosity(),
        ),
        _ => {}
    }
    Ok(())
}
