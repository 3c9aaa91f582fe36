//! Log file setup.
//!
//! The terminal belongs to the UI, so logs only go to a file and only when
//! `EZLYRIC_LOG` names one.

use std::path::Path;
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Route `tracing` events to `path`, appending.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(e, path.to_path_buf()))?
        .into_parts()
        .0;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|e| Error::config(e.to_string(), "Logging was already initialized"))?;

    tracing::info!("Logging to {}", path.display());
    Ok(())
}
