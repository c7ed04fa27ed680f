//! core
//!
//! Configuration and domain records for Shuttle.
//!
//! # Modules
//!
//! - [`config`] - Layered configuration: loading, validation, persistence
//! - [`types`] - Records exchanged with the coordinator
//!
//! Nothing in this module prints or exits; errors are returned to the
//! command layer.

pub mod config;
pub mod types;
