//! Shuttle - a command-line client for the Weft coordinator
//!
//! Shuttle submits work, inspects agents and work items, manages spin-up
//! targets, and reads project statistics by sending typed requests to a Weft
//! coordinator over NATS request/reply or its REST API.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, dispatches handlers)
//! - [`core`] - Configuration and the records exchanged with the coordinator
//! - [`transport`] - Subjects, operations, envelopes, and the two bindings
//! - [`ui`] - Tables, JSON output, and cell formatting
//! - [`logging`] - Diagnostic logging setup
//!
//! # Invariants
//!
//! 1. Configuration resolves per field from the highest layer that defines it
//! 2. Every subject is `weft.<project>.<category>.<verb>[.<id>]`
//! 3. Remote failures arrive as failure envelopes, never as transport errors
//! 4. Secrets are never logged and are masked in listings

pub mod cli;
pub mod core;
pub mod logging;
pub mod transport;
pub mod ui;
