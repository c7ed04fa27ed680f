//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--json`: Print structured JSON instead of tables
//! - `--config <path>`: Use this configuration file
//! - `--project <id>` / `-p`: Override the project for this invocation
//! - `--quiet` / `-q`: Minimal output
//! - `--debug`: Enable debug logging

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shuttle - command-line client for the Weft coordinator
#[derive(Parser, Debug)]
#[command(name = "shuttle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Project to operate on (overrides config and environment)
    #[arg(short, long, global = true, value_name = "ID")]
    pub project: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a unit of work
    #[command(
        name = "submit",
        after_help = "\
EXAMPLES:
    # Submit with the configured default priority and boundary
    shuttle submit \"Fix flaky integration test\"

    # Urgent work for the staging boundary
    shuttle submit \"Rotate certificates\" --priority 9 --boundary staging"
    )]
    Submit {
        /// Short title of the work
        title: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Priority from 1 (lowest) to 10 (highest)
        #[arg(long)]
        priority: Option<i64>,

        /// Boundary to route the work to
        #[arg(short, long)]
        boundary: Option<String>,

        /// Spin-up target to run the work on
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Inspect agents
    Agents {
        #[command(subcommand)]
        action: AgentsAction,
    },

    /// Inspect and manage work items
    Work {
        #[command(subcommand)]
        action: WorkAction,
    },

    /// Follow a work item until it finishes
    Watch {
        /// Work item id
        id: String,

        /// Seconds between status checks
        #[arg(long, default_value_t = 2)]
        interval: u64,
    },

    /// Show aggregate statistics for the project
    Stats,

    /// Trigger and inspect spin-ups
    #[command(name = "spin-up")]
    SpinUp {
        #[command(subcommand)]
        action: SpinUpAction,
    },

    /// Ask an agent to shut down
    Shutdown {
        /// Agent id
        agent: String,

        /// Stop immediately instead of after the current work
        #[arg(long)]
        force: bool,

        /// Reason recorded with the shutdown
        #[arg(long)]
        reason: Option<String>,
    },

    /// Manage spin-up targets
    Targets {
        #[command(subcommand)]
        action: TargetsAction,
    },

    /// Show or switch the current project
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },

    /// Get, set, or list configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    shuttle completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    shuttle completion zsh >> ~/.zshrc"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Agent subcommands.
#[derive(Subcommand, Debug)]
pub enum AgentsAction {
    /// List agents
    List,
    /// Show details of one agent
    Show {
        /// Agent id
        id: String,
    },
}

/// Work subcommands.
#[derive(Subcommand, Debug)]
pub enum WorkAction {
    /// List work items
    List {
        /// Only items with this status
        #[arg(long)]
        status: Option<String>,

        /// Only items in this boundary
        #[arg(long)]
        boundary: Option<String>,

        /// Maximum number of items
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one work item
    Get {
        /// Work item id
        id: String,
    },
    /// Show the status of one work item
    Status {
        /// Work item id
        id: String,
    },
    /// Cancel a work item
    Cancel {
        /// Work item id
        id: String,

        /// Reason recorded with the cancellation
        #[arg(long)]
        reason: Option<String>,
    },
}

/// Spin-up subcommands.
#[derive(Subcommand, Debug)]
pub enum SpinUpAction {
    /// Activate a target
    Trigger {
        /// Target name or id
        target: String,

        /// Boundary for the spawned agent
        #[arg(short, long)]
        boundary: Option<String>,

        /// Work item the agent should pick up
        #[arg(long)]
        work: Option<String>,
    },
    /// Show the status of a spin-up
    Status {
        /// Spin-up id
        id: String,
    },
    /// List spin-ups
    List,
}

/// Target subcommands.
#[derive(Subcommand, Debug)]
pub enum TargetsAction {
    /// List targets
    List,
    /// Register a new target
    Register {
        /// Target name
        name: String,

        /// Target type (e.g., "docker", "ssh", "kubernetes")
        #[arg(long = "type", value_name = "TYPE")]
        kind: String,

        /// Boundary the target serves
        #[arg(short, long)]
        boundary: Option<String>,

        /// Agent type the target runs
        #[arg(long)]
        agent_type: Option<String>,

        /// Target-specific configuration as a JSON object
        #[arg(long, value_name = "JSON")]
        target_config: Option<String>,
    },
    /// Show one target
    Get {
        /// Target name or id
        id: String,
    },
    /// Change a target
    Update {
        /// Target name or id
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New boundary
        #[arg(short, long)]
        boundary: Option<String>,

        /// New agent type
        #[arg(long)]
        agent_type: Option<String>,

        /// New target-specific configuration as a JSON object
        #[arg(long, value_name = "JSON")]
        target_config: Option<String>,
    },
    /// Remove a target
    Remove {
        /// Target name or id
        id: String,
    },
    /// Check that a target is reachable
    Test {
        /// Target name or id
        id: String,
    },
    /// Allow spin-ups on a target
    Enable {
        /// Target name or id
        id: String,
    },
    /// Prevent spin-ups on a target
    Disable {
        /// Target name or id
        id: String,
    },
}

/// Project subcommands.
#[derive(Subcommand, Debug)]
pub enum ProjectsAction {
    /// Show the project commands operate on, and where it comes from
    Current,
    /// Make a project the default
    Use {
        /// Project id
        id: String,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// Remove a configuration value from the file
    Unset {
        /// Configuration key
        key: String,
    },
    /// List all configuration values
    List,
    /// Print the configuration file path
    Path,
    /// Check the resolved configuration
    Validate,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["shuttle", "stats", "--json", "-p", "alpha"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.project.as_deref(), Some("alpha"));
        assert!(matches!(cli.command, Command::Stats));
    }

    #[test]
    fn spin_up_trigger_parses() {
        let cli =
            Cli::try_parse_from(["shuttle", "spin-up", "trigger", "gpu-box", "-b", "staging"])
                .unwrap();
        match cli.command {
            Command::SpinUp {
                action: SpinUpAction::Trigger { target, boundary, .. },
            } => {
                assert_eq!(target, "gpu-box");
                assert_eq!(boundary.as_deref(), Some("staging"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn targets_register_requires_type() {
        assert!(Cli::try_parse_from(["shuttle", "targets", "register", "box"]).is_err());
        assert!(
            Cli::try_parse_from(["shuttle", "targets", "register", "box", "--type", "ssh"]).is_ok()
        );
    }
}
