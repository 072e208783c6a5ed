//! Append-only plain-text record of every node ever provisioned.
//!
//! One line per node (`address port username password`). Records from
//! earlier runs are never rewritten or deduplicated. A single writer per run
//! is assumed; there is no locking.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use fanproxy_common::error::StorageError;
use fanproxy_common::node::RegistryRecord;

pub struct NodeRegistry {
    path: PathBuf,
}

impl NodeRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty store if none exists. Returns whether it was created.
    pub fn ensure_store(&self) -> Result<bool, StorageError> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => {
                info!("Created node registry at {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(source) => Err(StorageError::Create {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Opens the store, appends one line and closes it again.
    pub fn append(&self, record: &RegistryRecord) -> Result<(), StorageError> {
        let append_error = |source: std::io::Error| StorageError::Append {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(append_error)?;
        writeln!(file, "{record}").map_err(append_error)?;

        debug!("Recorded node {}:{}", record.address, record.port);
        Ok(())
    }

    /// Reads back every record, oldest first. Blank lines are ignored.
    pub fn records(&self) -> Result<Vec<RegistryRecord>, StorageError> {
        let content: String = fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                line.parse().map_err(|_| StorageError::Malformed {
                    path: self.path.clone(),
                    line: idx + 1,
                })
            })
            .collect()
    }
}
