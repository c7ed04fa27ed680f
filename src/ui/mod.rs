//! ui
//!
//! Rendering of command results.
//!
//! # Modules
//!
//! - [`output`] - Tables, JSON output, and print helpers
//! - [`format`] - Cell helpers: truncation, colorization, timestamps
//!
//! # Design
//!
//! Every command renders through this module so table and JSON output
//! behave the same way everywhere. Nothing here talks to the network.

pub mod format;
pub mod output;
