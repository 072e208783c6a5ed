//! Error taxonomy of a provisioning run.
//!
//! Every error is fatal: the pipeline stops at the first one and reports the
//! stage it came from. Partial state already on disk is left as is.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::system::EngineAction;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("unable to enumerate network interfaces")]
    Enumeration,
    #[error("no usable public IPv4 address found")]
    NoUsableAddress,
}

#[derive(Debug, Error)]
#[error("random source unavailable: {0}")]
pub struct EntropyError(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("port range exhausted: base port {base} cannot hold node #{index}")]
pub struct PortExhaustionError {
    pub base: u16,
    pub index: usize,
}

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("failed to encode engine configuration: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create {path}: {source}")]
    Create { path: PathBuf, source: io::Error },
    #[error("failed to append to {path}: {source}")]
    Append { path: PathBuf, source: io::Error },
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("malformed record at {path}:{line}")]
    Malformed { path: PathBuf, line: usize },
}

#[derive(Debug, Error)]
#[error("{action} failed: {reason}")]
pub struct CollaboratorError {
    pub action: EngineAction,
    pub reason: String,
}

impl CollaboratorError {
    pub fn new(action: EngineAction, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
        }
    }
}

/// Displays the underlying cause; `stage()` names where it happened.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Entropy(#[from] EntropyError),
    #[error(transparent)]
    PortExhaustion(#[from] PortExhaustionError),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl ProvisionError {
    /// Short name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            ProvisionError::Discovery(_) => "discovery",
            ProvisionError::Entropy(_) => "credentials",
            ProvisionError::PortExhaustion(_) => "topology",
            ProvisionError::Serialization(_) => "engine config",
            ProvisionError::Storage(_) => "registry",
            ProvisionError::Collaborator(_) => "engine",
        }
    }
}
