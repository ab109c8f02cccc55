//! Pipe-delimited CSV output.

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Field delimiter; free text regularly contains commas
pub const DELIMITER: u8 = b'|';

/// A value that can be written as one CSV row
///
/// Every entry written in a single [`to_csv`] call must report the same
/// header.
pub trait CsvEntry: Send + Sync {
    /// Column names
    fn header(&self) -> Vec<&'static str>;

    /// Column values, in header order
    fn to_row(&self) -> Vec<String>;
}

/// Render an optional value; missing values become empty cells
pub fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Create `path` and any missing parents
pub fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| Error::FileSystem {
        path: path.to_path_buf(),
        source,
    })
}

/// Create (or truncate) `name` inside `dir`, creating `dir` if needed
pub fn create_file(dir: &Path, name: &str) -> Result<PathBuf> {
    create_dir(dir)?;

    let path = dir.join(name);
    File::create(&path).map_err(|source| Error::FileSystem {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Append a header row and one row per entry to `path`.
///
/// The header is taken from the first entry. Nothing is written when
/// `entries` is empty.
///
/// # Errors
/// - [`Error::EmptyInput`] if `entries` is empty
/// - [`Error::FileSystem`] if the file cannot be opened or flushed
/// - [`Error::Csv`] if a row cannot be written
pub fn to_csv<E: CsvEntry + ?Sized>(path: &Path, entries: &[&E]) -> Result<()> {
    let Some(first) = entries.first() else {
        return Err(Error::EmptyInput {
            path: path.to_path_buf(),
        });
    };

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|source| Error::FileSystem {
            path: path.to_path_buf(),
            source,
        })?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(file);

    writer.write_record(first.header())?;
    for entry in entries {
        writer.write_record(entry.to_row())?;
    }

    writer.flush().map_err(|source| Error::FileSystem {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), rows = entries.len(), "Wrote CSV");
    Ok(())
}
