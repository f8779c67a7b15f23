//! "Run as administrator" flag patching.
//!
//! The shell object model has no property for elevation, so the flag is set
//! directly in the shortcut header after the file is written. Only the one
//! byte at [`LinkFormat::ELEVATION_FLAG_OFFSET`] is read or written; the rest
//! of the file is never parsed.

use crate::config::LinkFormat;
use crate::error::{LnkError, Result};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

/// Sets and reads the elevation bit of an existing shortcut file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElevationPatcher;

impl ElevationPatcher {
    pub fn new() -> Self {
        Self
    }

    /// Set the elevation bit in place, keeping every other bit and byte.
    ///
    /// Patching an already elevated shortcut leaves it unchanged.
    pub fn patch(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| LnkError::Io {
                message: "open shortcut for patching".to_string(),
                path: Some(path.to_path_buf()),
                source: Some(e),
            })?;

        let flags = read_flag_byte(&mut file, path)?;
        let patched = flags | LinkFormat::ELEVATION_FLAG_BIT;
        if patched == flags {
            debug!("{} already requests elevation", path.display());
            return Ok(());
        }

        file.seek(SeekFrom::Start(LinkFormat::ELEVATION_FLAG_OFFSET))
            .and_then(|_| file.write_all(&[patched]))
            .and_then(|()| file.sync_all())
            .map_err(|e| LnkError::Io {
                message: "write elevation flag".to_string(),
                path: Some(path.to_path_buf()),
                source: Some(e),
            })?;

        debug!(
            "Patched {} at {:#x}: {:#04x} -> {:#04x}",
            path.display(),
            LinkFormat::ELEVATION_FLAG_OFFSET,
            flags,
            patched
        );
        Ok(())
    }

    /// Whether the shortcut at `path` requests elevation.
    pub fn is_elevated(&self, path: &Path) -> Result<bool> {
        let mut file = File::open(path).map_err(|e| LnkError::io_with_path(e, path))?;
        let flags = read_flag_byte(&mut file, path)?;
        Ok(flags & LinkFormat::ELEVATION_FLAG_BIT != 0)
    }
}

fn read_flag_byte(file: &mut File, path: &Path) -> Result<u8> {
    let mut byte = [0u8; 1];
    file.seek(SeekFrom::Start(LinkFormat::ELEVATION_FLAG_OFFSET))
        .and_then(|_| file.read_exact(&mut byte))
        .map_err(|e| {
            let message = if e.kind() == ErrorKind::UnexpectedEof {
                format!(
                    "file is too short to be a shortcut (needs more than {:#x} bytes)",
                    LinkFormat::ELEVATION_FLAG_OFFSET
                )
            } else {
                "read elevation flag".to_string()
            };
            LnkError::Io {
                message,
                path: Some(path.to_path_buf()),
                source: Some(e),
            }
        })?;
    Ok(byte[0])
}
