//! cli
//!
//! Command-line interface layer for Shuttle.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, builds a
//! [`Context`] from the global flags, and dispatches to a handler on a
//! single-threaded tokio runtime. Handlers talk to the coordinator only
//! through [`crate::transport`].

pub mod args;
pub mod commands;
pub mod context;

pub use args::{Cli, Shell};
pub use context::{Context, Session};

use anyhow::{Context as _, Result};

use crate::logging::init_logging;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let ctx = Context::from_cli(&cli);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(commands::dispatch(cli.command, &ctx))
}
