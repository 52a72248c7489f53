//! CSV file helpers shared by the registry and the attendance book.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};

const BOM: char = '\u{feff}';

/// Reads a data file, returning `None` if it is missing or blank.
///
/// A leading UTF-8 byte order mark is dropped.
pub(crate) fn read_data_file(path: &Path) -> LedgerResult<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let content = content.trim_start_matches(BOM);
    if content.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(content.to_string()))
}

/// Serializes `rows` as CSV with a header line and writes them atomically.
///
/// The data goes to `<file>.tmp` first and then replaces the target, so a
/// crash never leaves a half-written table behind.
pub(crate) fn write_table<T: Serialize>(
    path: &Path,
    headers: &[&str],
    rows: impl IntoIterator<Item = T>,
) -> LedgerResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(headers).map_err(table_error)?;
    for row in rows {
        writer.serialize(row).map_err(table_error)?;
    }
    let bytes = writer.into_inner().map_err(|e| LedgerError::TableError {
        message: e.to_string(),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, bytes).map_err(|e| io_error(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| io_error(path, e))
}

/// Maps a csv error to a table-level error.
pub(crate) fn table_error(error: csv::Error) -> LedgerError {
    LedgerError::TableError {
        message: error.to_string(),
    }
}

fn io_error(path: &Path, error: std::io::Error) -> LedgerError {
    LedgerError::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
