//! JSON save/load for profile data
//!
//! Writes go to a temporary sibling first and are renamed into place, so a
//! crash mid-write never leaves a truncated file behind.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt save data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a value, or its default if the file does not exist
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, PersistError> {
    match fs::read_to_string(path) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("No save at {}, starting fresh", path.display());
            Ok(T::default())
        }
        Err(err) => Err(err.into()),
    }
}

/// Save a value as pretty JSON
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    log::debug!("Saved {}", path.display());
    Ok(())
}
