use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ledger::io;
use crate::ledger::migrate::SchemaPlan;
use crate::ledger::schema::{COL_COMPLETED, COL_TASK, CURRENT_SCHEMA, flag_is_set};
use csv::StringRecord;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Which task rows to select.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskFilter {
    /// Every row flagged as a task
    #[default]
    All,
    /// Tasks not marked completed
    Pending,
    /// Tasks marked completed
    Completed,
}

impl TaskFilter {
    fn matches(self, record: &StringRecord, task_idx: usize, completed_idx: Option<usize>) -> bool {
        if !record.get(task_idx).is_some_and(flag_is_set) {
            return false;
        }
        let completed = completed_idx
            .and_then(|i| record.get(i))
            .is_some_and(flag_is_set);
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !completed,
            TaskFilter::Completed => completed,
        }
    }

    /// Filter selected by the `--pending` / `--completed` switches.
    pub fn from_flags(pending: bool, completed: bool) -> Self {
        match (pending, completed) {
            (true, _) => TaskFilter::Pending,
            (_, true) => TaskFilter::Completed,
            _ => TaskFilter::All,
        }
    }

    pub fn default_output(self, cfg: &Config) -> &str {
        match self {
            TaskFilter::All => &cfg.tasks_file,
            TaskFilter::Pending => &cfg.pending_file,
            TaskFilter::Completed => &cfg.completed_file,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskFilter::All => "",
            TaskFilter::Pending => "pending ",
            TaskFilter::Completed => "completed ",
        }
    }
}

/// A source row left out because it did not fit the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Rows selected from a ledger, with the header they belong to.
#[derive(Debug, Clone)]
pub struct Selection {
    pub header: Vec<String>,
    pub rows: Vec<StringRecord>,
    pub scanned: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Read `path` and keep the rows matching `filter`.
///
/// The source is only read. A ledger without a `task` column is viewed as if
/// it had been migrated, so it simply yields no tasks. Rows whose field count
/// differs from the header are skipped and reported.
pub fn select_tasks(path: &Path, filter: TaskFilter) -> AppResult<Selection> {
    if !path.exists() {
        return Err(AppError::FileNotFound(path.to_path_buf()));
    }

    let Some(raw_header) = io::read_header(path)? else {
        return Ok(Selection {
            header: CURRENT_SCHEMA.header(),
            rows: Vec::new(),
            scanned: 0,
            skipped: Vec::new(),
        });
    };

    let plan = SchemaPlan::for_header(&raw_header, &CURRENT_SCHEMA);
    let header = plan.upgrade_header(&raw_header);
    let task_idx = column_index(&header, COL_TASK)?;
    let completed_idx = header.iter().position(|h| h == COL_COMPLETED);

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    let mut scanned = 0;

    for result in io::reader(path)?.records() {
        scanned += 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    return Err(e.into());
                }
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                skip(&mut skipped, path, line, e.to_string());
                continue;
            }
        };

        if record.len() != raw_header.len() {
            let reason = AppError::CorruptLedger {
                line: io::record_line(&record),
                expected: raw_header.len(),
                found: record.len(),
            }
            .to_string();
            skip(&mut skipped, path, io::record_line(&record), reason);
            continue;
        }

        let record = plan.upgrade_record(&record);
        if filter.matches(&record, task_idx, completed_idx) {
            rows.push(record);
        }
    }

    Ok(Selection {
        header,
        rows,
        scanned,
        skipped,
    })
}

fn column_index(header: &[String], name: &str) -> AppResult<usize> {
    header
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| AppError::SchemaMismatch {
            column: name.to_string(),
        })
}

fn skip(skipped: &mut Vec<SkippedRow>, path: &Path, line: u64, reason: String) {
    warn!("{}: skipping line {}: {}", path.display(), line, reason);
    skipped.push(SkippedRow { line, reason });
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Summary of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub scanned: usize,
    pub extracted: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ExtractReport {
    /// Some source rows could not be read and were left out.
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

pub struct TaskExtractor;

impl TaskExtractor {
    /// Copy every task row of `input` into `output`.
    pub fn extract(input: &Path, output: &Path) -> AppResult<ExtractReport> {
        Self::extract_with(input, output, TaskFilter::All)
    }

    /// Copy the task rows of `input` selected by `filter` into `output`.
    ///
    /// The output always gets a header, even with zero matches, and is
    /// written through a temporary file so it is never left half written.
    pub fn extract_with(
        input: &Path,
        output: &Path,
        filter: TaskFilter,
    ) -> AppResult<ExtractReport> {
        if same_file(input, output) {
            return Err(AppError::Io(std::io::Error::other(format!(
                "Output file must differ from the source ledger: {}",
                output.display()
            ))));
        }

        let selection = select_tasks(input, filter)?;

        io::write_atomically(output, |wtr| {
            wtr.write_record(&selection.header)?;
            for row in &selection.rows {
                wtr.write_record(row)?;
            }
            Ok(())
        })?;

        info!(
            "extracted {} {}task(s) from {} to {} ({} skipped)",
            selection.rows.len(),
            filter.label(),
            input.display(),
            output.display(),
            selection.skipped.len()
        );

        Ok(ExtractReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            scanned: selection.scanned,
            extracted: selection.rows.len(),
            skipped: selection.skipped,
        })
    }
}
