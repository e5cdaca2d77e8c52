//! Reads and writes the ledger document on disk.
//!
//! A missing file is an empty ledger. Writes replace the whole file at once.

use std::{fs, io::ErrorKind, path::Path};

use engine::Engine;

use crate::error::{AppError, Result};

pub fn open(path: &str) -> Result<Engine> {
    let mut engine = Engine::new();
    match fs::read_to_string(path) {
        Ok(document) => {
            engine.load(&document)?;
            tracing::debug!(path, "ledger opened");
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(path, "no ledger yet, starting empty");
        }
        Err(source) => {
            return Err(AppError::Io {
                path: path.to_string(),
                source,
            });
        }
    }
    Ok(engine)
}

pub fn save(engine: &Engine, path: &str) -> Result<()> {
    let document = engine.save()?;
    write(path, &document)?;
    tracing::debug!(path, "ledger saved");
    Ok(())
}

/// Replaces the ledger with the document at `source` and saves it to `path`.
///
/// A document that fails to load leaves both the engine and the file at
/// `path` untouched.
pub fn import(engine: &mut Engine, source: &str, path: &str) -> Result<()> {
    let document = read(source)?;
    engine.load(&document)?;
    save(engine, path)
}

/// Reads a document without touching the ledger file.
pub fn read(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_string(),
        source,
    })
}

pub fn write(path: &str, contents: &str) -> Result<()> {
    let io_err = |source| AppError::Io {
        path: path.to_string(),
        source,
    };
    // Write next to the target then rename, so readers never see half a file.
    let tmp = Path::new(path).with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}
