//! transport
//!
//! Typed request/response plumbing between the CLI and the coordinator.
//!
//! # Architecture
//!
//! The [`Coordinator`] trait is the contract every binding implements:
//! send one operation, receive one [`ResponseEnvelope`]. Commands use the
//! [`Transport`] enum built by [`Transport::from_config`] rather than
//! importing a specific binding.
//!
//! # Modules
//!
//! - `traits`: [`Coordinator`] trait and [`TransportError`]
//! - `envelope`: [`ResponseEnvelope`] and [`RemoteError`]
//! - `operation`: catalogue of coordinator operations and their addresses
//! - [`subject`]: subject naming for the messaging binding
//! - [`nats`]: NATS request/reply binding with its connection pool
//! - [`http`]: REST binding
//! - `factory`: binding selection and typed `send`

mod envelope;
mod factory;
pub mod http;
pub mod nats;
mod operation;
pub mod subject;
mod traits;

pub use envelope::{RemoteError, ResponseEnvelope};
pub use factory::{Transport, TransportKind};
pub use operation::{Method, Operation, Route};
pub use subject::{Category, SubjectError, SubjectNamer};
pub use traits::{Coordinator, TransportError};
