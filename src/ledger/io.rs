//! Low-level CSV plumbing shared by the store, the migrator and the extractor.

use crate::errors::{AppError, AppResult};
use csv::{ByteRecord, ReaderBuilder, StringRecord, Writer, WriterBuilder};
use log::debug;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Open a ledger reader. Records are allowed to have a different length than
/// the header; callers decide whether that is fatal or skippable.
pub fn reader(path: &Path) -> AppResult<csv::Reader<File>> {
    if !path.exists() {
        return Err(AppError::FileNotFound(path.to_path_buf()));
    }
    let rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    Ok(rdr)
}

/// Read the header of a ledger. `None` when the file is missing or empty.
pub fn read_header(path: &Path) -> AppResult<Option<Vec<String>>> {
    if !path.exists() || fs::metadata(path)?.len() == 0 {
        return Ok(None);
    }
    let mut rdr = reader(path)?;
    let header = rdr.headers()?;
    if header.is_empty() {
        return Ok(None);
    }
    Ok(Some(header.iter().map(str::to_string).collect()))
}

/// Fail unless the ledger ends on a complete record of `expected` fields.
///
/// A row appended after an open quoted field would become part of that field,
/// so an odd number of quote characters in the file is rejected as well.
pub fn check_tail(path: &Path, expected: usize) -> AppResult<()> {
    let data = fs::read(path)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_slice());

    let mut last: Option<ByteRecord> = None;
    for result in rdr.byte_records() {
        last = Some(result?);
    }
    let line = last
        .as_ref()
        .and_then(|r| r.position())
        .map(|p| p.line())
        .unwrap_or(1);

    if data.iter().filter(|&&b| b == b'"').count() % 2 == 1 {
        return Err(AppError::UnterminatedField { line });
    }
    if let Some(record) = last
        && record.len() != expected
    {
        return Err(AppError::CorruptLedger {
            line,
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

/// Line number of a record for diagnostics (1-based, header is line 1).
pub fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

pub fn csv_writer<W: Write>(inner: W) -> Writer<W> {
    WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(inner)
}

/// Serialize a single record, terminator included.
pub fn encode_record<I, T>(fields: I) -> AppResult<Vec<u8>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut wtr = csv_writer(Vec::new());
    wtr.write_record(fields)?;
    wtr.into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

/// Write a whole CSV file through a temporary sibling and move it into place.
///
/// The destination is either the previous content or the complete new
/// content; a failure before the rename leaves it untouched.
pub fn write_atomically<F>(dest: &Path, fill: F) -> AppResult<()>
where
    F: FnOnce(&mut Writer<&mut File>) -> AppResult<()>,
{
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut wtr = csv_writer(tmp.as_file_mut());
        fill(&mut wtr)?;
        wtr.flush()?;
    }
    tmp.as_file().sync_all()?;
    if let Ok(meta) = fs::metadata(dest) {
        fs::set_permissions(tmp.path(), meta.permissions())?;
    }

    debug!("replacing {} via {}", dest.display(), tmp.path().display());
    tmp.persist(dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_fill_leaves_destination_alone() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("Z.csv");
        fs::write(&dest, "timestamp,text\na,b\n").unwrap();

        let result = write_atomically(&dest, |wtr| {
            wtr.write_record(["timestamp", "text", "task"])?;
            wtr.write_record(["a", "b", "0"])?;
            Err(AppError::Io(std::io::Error::other("disk full")))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "timestamp,text\na,b\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_tail_on_header_only_ledger_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Z.csv");
        fs::write(&path, "timestamp,text,task\n").unwrap();

        assert!(check_tail(&path, 3).is_ok());
    }
}
