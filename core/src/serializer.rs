//! Renders a [`Topology`] into the engine's configuration document.
//!
//! The document is generated from scratch on every run and replaces any
//! previous file in full. Writes go through a temporary file in the target
//! directory followed by a rename, so the engine never reads a partial
//! document.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use fanproxy_common::engine::Topology;
use fanproxy_common::error::SerializationError;

/// Indented JSON, newline-terminated.
pub fn serialize(topology: &Topology) -> Result<Vec<u8>, SerializationError> {
    let mut bytes: Vec<u8> = serde_json::to_vec_pretty(&topology.to_engine_config())?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn write_config(topology: &Topology, path: &Path) -> Result<(), SerializationError> {
    let bytes: Vec<u8> = serialize(topology)?;
    write_atomic(path, &bytes)?;
    info!("Engine configuration written to {}", path.display());
    Ok(())
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<(), SerializationError> {
    let write_error = |source: io::Error| SerializationError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent: &Path = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_error)?;

    let mut temp_file: NamedTempFile = NamedTempFile::new_in(parent).map_err(write_error)?;
    temp_file.write_all(content).map_err(write_error)?;
    temp_file.as_file().sync_all().map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp_file.path(), fs::Permissions::from_mode(0o644))
            .map_err(write_error)?;
    }

    temp_file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
