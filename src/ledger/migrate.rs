use crate::errors::{AppError, AppResult};
use crate::ledger::io;
use crate::ledger::schema::{CURRENT_SCHEMA, ColumnSpec, Schema};
use crate::ui::messages::warning;
use csv::StringRecord;
use log::info;
use std::path::Path;

/// Result of an `ensure_*` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// File missing or empty: the store writes a current header on first append.
    NotNeeded,
    /// Header already carries every required column.
    UpToDate,
    Migrated { added: Vec<String>, rows: usize },
}

/// Columns missing from a header, and how to fill them.
#[derive(Debug, Clone)]
pub struct SchemaPlan {
    missing: Vec<ColumnSpec>,
}

impl SchemaPlan {
    pub fn for_header(header: &[String], schema: &Schema) -> Self {
        let missing = schema
            .columns
            .iter()
            .filter(|c| !header.iter().any(|h| h == c.name))
            .copied()
            .collect();
        Self { missing }
    }

    pub fn is_noop(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing_columns(&self) -> Vec<String> {
        self.missing.iter().map(|c| c.name.to_string()).collect()
    }

    /// Missing columns go after the existing ones, in schema order.
    pub fn upgrade_header(&self, header: &[String]) -> Vec<String> {
        let mut out = header.to_vec();
        out.extend(self.missing.iter().map(|c| c.name.to_string()));
        out
    }

    pub fn upgrade_record(&self, record: &StringRecord) -> StringRecord {
        let mut out = record.clone();
        for col in &self.missing {
            out.push_field(col.default);
        }
        out
    }
}

/// Make sure the ledger at `path` has a `task` column.
pub fn ensure_task_column(path: &Path) -> AppResult<MigrationOutcome> {
    ensure_schema(path, &CURRENT_SCHEMA)
}

/// Bring the ledger header up to `schema`, rewriting the file once if needed.
///
/// The rewrite goes through a temporary file and an atomic rename; on any
/// failure the original file is left as it was.
pub fn ensure_schema(path: &Path, schema: &Schema) -> AppResult<MigrationOutcome> {
    let Some(header) = io::read_header(path)? else {
        return Ok(MigrationOutcome::NotNeeded);
    };

    let plan = SchemaPlan::for_header(&header, schema);
    if plan.is_noop() {
        return Ok(MigrationOutcome::UpToDate);
    }

    // Validate everything before touching the disk.
    let mut rdr = io::reader(path)?;
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() != header.len() {
            return Err(AppError::CorruptLedger {
                line: io::record_line(&record),
                expected: header.len(),
                found: record.len(),
            });
        }
        rows.push(plan.upgrade_record(&record));
    }

    let new_header = plan.upgrade_header(&header);
    io::write_atomically(path, |wtr| {
        wtr.write_record(&new_header)?;
        for row in &rows {
            wtr.write_record(row)?;
        }
        Ok(())
    })?;

    let added = plan.missing_columns();
    info!(
        "migrated {} to schema v{}: added {:?} to {} rows",
        path.display(),
        schema.version,
        added,
        rows.len()
    );
    warning(format!(
        "Added column(s) {} to '{}'",
        added.join(", "),
        path.display()
    ));

    Ok(MigrationOutcome::Migrated {
        added,
        rows: rows.len(),
    })
}

/// Report what `ensure_schema` would do, without writing.
pub fn check_schema(path: &Path, schema: &Schema) -> AppResult<MigrationOutcome> {
    let Some(header) = io::read_header(path)? else {
        return Ok(MigrationOutcome::NotNeeded);
    };
    let plan = SchemaPlan::for_header(&header, schema);
    if plan.is_noop() {
        return Ok(MigrationOutcome::UpToDate);
    }
    let mut rows = 0;
    for result in io::reader(path)?.records() {
        let record = result?;
        if record.len() != header.len() {
            return Err(AppError::CorruptLedger {
                line: io::record_line(&record),
                expected: header.len(),
                found: record.len(),
            });
        }
        rows += 1;
    }
    Ok(MigrationOutcome::Migrated {
        added: plan.missing_columns(),
        rows,
    })
}
