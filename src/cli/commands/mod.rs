//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Sends typed operations through the [`Session`]
//! 3. Formats and displays output
//!
//! Local commands (`config`, `projects`, `completion`) never open a
//! session. Every other command gets one from [`Context::connect`], and the
//! session is closed after the handler returns, whether it succeeded or not.

mod agents;
mod completion;
mod config_cmd;
mod projects;
mod spinup;
mod stats;
mod submit;
mod targets;
mod watch;
mod work;

use anyhow::Result;

use super::args::Command;
use super::context::{Context, Session};

/// Dispatch a command to its handler.
pub async fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Completion { shell } => completion::completion(shell),
        Command::Config { action } => config_cmd::config(ctx, action),
        Command::Projects { action } => projects::projects(ctx, action),
        remote => {
            let mut session = ctx.connect()?;
            let result = dispatch_remote(remote, ctx, &mut session).await;
            session.close().await;
            result
        }
    }
}

async fn dispatch_remote(command: Command, ctx: &Context, session: &mut Session) -> Result<()> {
    match command {
        Command::Submit {
            title,
            description,
            priority,
            boundary,
            target,
        } => submit::submit(ctx, session, title, description, priority, boundary, target).await,
        Command::Work { action } => work::work(ctx, session, action).await,
        Command::Watch { id, interval } => watch::watch(ctx, session, &id, interval).await,
        Command::Agents { action } => agents::agents(session, action).await,
        Command::Shutdown {
            agent,
            force,
            reason,
        } => agents::shutdown(ctx, session, &agent, force, reason).await,
        Command::Targets { action } => targets::targets(ctx, session, action).await,
        Command::SpinUp { action } => spinup::spinup(ctx, session, action).await,
        Command::Stats => stats::stats(session).await,
        // Handled in `dispatch` without a session.
        Command::Completion { .. } | Command::Config { .. } | Command::Projects { .. } => Ok(()),
    }
}
