//! # Fanproxy Common
//!
//! Shared models, errors and ports for the fan-out egress provisioner.
//!
//! * **[`network`]**: public address classification and interface enumeration.
//! * **[`node`]**: credentials, nodes and the registry line format.
//! * **[`engine`]**: the engine-facing projection (inbounds, outbounds, rules).
//! * **[`system`]** / **[`report`]**: traits the pipeline drives (engine process, console).
//! * **[`config`]** / **[`error`]**: run configuration and the error taxonomy.

pub mod config;
pub mod engine;
pub mod error;
pub mod network;
pub mod node;
pub mod report;
pub mod system;
