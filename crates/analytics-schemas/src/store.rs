//! On-disk persistence for the [`MasterTable`](crate::MasterTable).
//!
//! The table is written with `bincode`'s columnar layout rather than a
//! text format: every stage after L1 round-trips the whole table, so a
//! compact binary encoding keeps multi-gigabyte telemetry runs fast to
//! reload. The file still carries the historical `master_timeline.parquet`
//! name used throughout the rest of the pipeline's artifacts.

use std::io;
use std::path::Path;

use crate::domain::MasterTable;

fn codec_config() -> bincode::config::Configuration {
    bincode::config::standard()
}

/// Serializes `table` and writes it to `path`, creating parent
/// directories as needed.
pub fn save(table: &MasterTable, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = bincode::serde::encode_to_vec(table, codec_config())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    std::fs::write(path, bytes)
}

/// Reads and deserializes a [`MasterTable`] previously written by
/// [`save`].
pub fn load(path: &Path) -> io::Result<MasterTable> {
    let bytes = std::fs::read(path)?;
    let (table, _len) = bincode::serde::decode_from_slice(&bytes, codec_config())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(table)
}
