//! World snapshots using `MessagePack`.
//!
//! A snapshot is the whole [`World`] (entities, doors, parties, and the
//! connected list) behind a format version number.

use std::path::Path;
use std::{fs, io};

use serde::{Deserialize, Serialize};
use tracing::info;
use wayfarer_foundation::{Error, ErrorKind, Result};
use wayfarer_storage::World;

/// Version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    world: &'a World,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    world: World,
}

fn encode_failed(e: impl std::fmt::Display) -> Error {
    Error::new(ErrorKind::SerializationError(e.to_string()))
}

fn io_failed(action: &str, path: &Path, e: &io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "cannot {action} snapshot '{}': {e}",
        path.display()
    )))
}

/// Encodes a world as a versioned `MessagePack` snapshot.
///
/// Field names are kept in the encoding so snapshots stay readable by
/// generic `MessagePack` tools.
///
/// # Errors
///
/// Returns `SerializationError` if encoding fails.
pub fn to_bytes(world: &World) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(&SnapshotRef {
        version: SNAPSHOT_VERSION,
        world,
    })
    .map_err(encode_failed)
}

/// Decodes a snapshot produced by [`to_bytes`].
///
/// # Errors
///
/// Returns `SerializationError` for malformed input or a snapshot carrying
/// a different format version.
pub fn from_bytes(bytes: &[u8]) -> Result<World> {
    let snapshot: Snapshot = rmp_serde::from_slice(bytes).map_err(encode_failed)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(encode_failed(format!(
            "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
            snapshot.version
        )));
    }
    Ok(snapshot.world)
}

/// Writes a snapshot of `world` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be written and `SerializationError`
/// if encoding fails.
pub fn save_to_file<P: AsRef<Path>>(world: &World, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(world)?;
    fs::write(path, &bytes).map_err(|e| io_failed("write", path, &e))?;
    info!(path = %path.display(), bytes = bytes.len(), "snapshot saved");
    Ok(())
}

/// Reads a snapshot written by [`save_to_file`].
///
/// # Errors
///
/// Returns `IoError` if the file cannot be read and `SerializationError` if
/// its contents do not decode.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<World> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| io_failed("read", path, &e))?;
    let world = from_bytes(&bytes)?;
    info!(path = %path.display(), entities = world.entity_count(), "snapshot loaded");
    Ok(world)
}
