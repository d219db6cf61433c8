use crate::errors::{AppError, AppResult};
use crate::ledger::io;
use crate::ledger::migrate::ensure_task_column;
use crate::ledger::schema::{COL_TASK, CURRENT_SCHEMA, Schema, flag_value};
use crate::models::entry::{Entry, EntryFields};
use crate::models::toggle::TaskToggleState;
use log::{debug, error};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

/// Append-only handle on a ledger file.
///
/// The schema check runs once per handle, before the first write.
pub struct NoteStore {
    path: PathBuf,
    schema: Schema,
    migrated: bool,
}

impl NoteStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            schema: CURRENT_SCHEMA,
            migrated: false,
        }
    }

    /// Header rows are written against. A ledger that does not exist yet
    /// reports the header it will be created with.
    pub fn header(&mut self) -> AppResult<Vec<String>> {
        Ok(self
            .existing_header()?
            .unwrap_or_else(|| self.schema.header()))
    }

    fn existing_header(&mut self) -> AppResult<Option<Vec<String>>> {
        if !self.migrated {
            ensure_task_column(&self.path)?;
            self.migrated = true;
        }
        io::read_header(&self.path)
    }

    /// Create the ledger with the current header if it is missing or empty,
    /// otherwise bring its schema up to date. Returns `true` when created.
    pub fn init(&mut self) -> AppResult<bool> {
        if self.existing_header()?.is_some() {
            return Ok(false);
        }
        let header = self.schema.header();
        io::write_atomically(&self.path, |wtr| {
            wtr.write_record(&header)?;
            Ok(())
        })?;
        Ok(true)
    }

    /// Write one row built from `fields` plus the `task` flag.
    ///
    /// Either the whole row lands in the file or the file keeps its
    /// previous length.
    pub fn append(&mut self, fields: &EntryFields, task: bool) -> AppResult<()> {
        let existing = self.existing_header()?;
        let header = existing.clone().unwrap_or_else(|| self.schema.header());

        for column in fields.columns() {
            if column == COL_TASK || !header.iter().any(|h| h == column) {
                return Err(AppError::SchemaMismatch {
                    column: column.to_string(),
                });
            }
        }

        let row: Vec<&str> = header
            .iter()
            .map(|col| {
                if col == COL_TASK {
                    flag_value(task)
                } else {
                    fields
                        .get(col)
                        .unwrap_or_else(|| self.schema.default_for(col))
                }
            })
            .collect();

        let mut bytes = Vec::new();
        match existing {
            Some(_) => io::check_tail(&self.path, header.len())?,
            None => bytes.extend(io::encode_record(&header)?),
        }
        bytes.extend(io::encode_record(&row)?);

        self.write_guarded(bytes, existing.is_some())?;
        debug!("appended entry to {} (task={})", self.path.display(), task);
        Ok(())
    }

    /// Capture `text` now, taking the task flag from `toggle`.
    ///
    /// The toggle is consumed before any I/O happens.
    pub fn capture(&mut self, text: &str, toggle: &mut TaskToggleState) -> AppResult<Entry> {
        let task = toggle.consume();
        let entry = Entry::now(text, task);
        self.append(&entry.fields(), entry.task)?;
        Ok(entry)
    }

    fn write_guarded(&self, mut bytes: Vec<u8>, has_content: bool) -> AppResult<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;
        let prev_len = file.metadata()?.len();

        if has_content && prev_len > 0 && !ends_with_newline(&mut file, prev_len)? {
            bytes.insert(0, b'\n');
        }

        append_or_rollback(&mut file, &bytes, prev_len)
    }
}

/// Append target that can be synced and cut back to an earlier length.
trait AppendTarget: Write {
    fn sync(&mut self) -> std::io::Result<()>;
    fn truncate(&mut self, len: u64) -> std::io::Result<()>;
}

impl AppendTarget for File {
    fn sync(&mut self) -> std::io::Result<()> {
        self.sync_data()
    }

    fn truncate(&mut self, len: u64) -> std::io::Result<()> {
        self.set_len(len)
    }
}

/// Write `bytes` in one go; on failure cut the target back to `prev_len` so
/// no partial row is left behind.
fn append_or_rollback<F: AppendTarget>(
    file: &mut F,
    bytes: &[u8],
    prev_len: u64,
) -> AppResult<()> {
    let written = file
        .write_all(bytes)
        .and_then(|_| file.flush())
        .and_then(|_| file.sync());
    let Err(e) = written else {
        return Ok(());
    };
    if let Err(rollback) = file.truncate(prev_len) {
        error!("could not restore ledger to {prev_len} bytes after failed write: {rollback}");
        return Err(AppError::Io(std::io::Error::new(
            e.kind(),
            format!("{e} (rollback to {prev_len} bytes also failed: {rollback})"),
        )));
    }
    Err(AppError::Io(e))
}

fn ends_with_newline(file: &mut File, len: u64) -> std::io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// In-memory file that accepts `room` bytes and then fails.
    struct ShortDisk {
        data: Vec<u8>,
        room: usize,
        truncate_fails: bool,
    }

    impl ShortDisk {
        fn holding(content: &[u8], room: usize) -> Self {
            Self {
                data: content.to_vec(),
                room,
                truncate_fails: false,
            }
        }
    }

    impl Write for ShortDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.room == 0 {
                return Err(io::Error::other("no space left"));
            }
            let n = buf.len().min(self.room);
            self.data.extend_from_slice(&buf[..n]);
            self.room -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl AppendTarget for ShortDisk {
        fn sync(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn truncate(&mut self, len: u64) -> io::Result<()> {
            if self.truncate_fails {
                return Err(io::Error::other("read-only"));
            }
            self.data.truncate(len as usize);
            Ok(())
        }
    }

    const LEDGER: &[u8] = b"timestamp,text,task\n2025-01-01 09:00:00,old,0\n";

    #[test]
    fn test_partial_write_is_cut_back() {
        let mut disk = ShortDisk::holding(LEDGER, 10);
        let row = b"2025-01-02 10:00:00,new entry,1\n";

        let err = append_or_rollback(&mut disk, row, LEDGER.len() as u64).unwrap_err();

        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(disk.data, LEDGER);
    }

    #[test]
    fn test_full_write_is_kept() {
        let mut disk = ShortDisk::holding(LEDGER, 1024);
        let row = b"2025-01-02 10:00:00,new entry,1\n";

        append_or_rollback(&mut disk, row, LEDGER.len() as u64).unwrap();

        assert_eq!(disk.data, [LEDGER, row.as_slice()].concat());
    }

    #[test]
    fn test_failed_rollback_is_reported() {
        let mut disk = ShortDisk::holding(LEDGER, 4);
        disk.truncate_fails = true;

        let err = append_or_rollback(&mut disk, b"2025-01-02,x,0\n", LEDGER.len() as u64)
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("no space left"), "{msg}");
        assert!(msg.contains("rollback"), "{msg}");
    }
}
