use crate::core::extract::{SkippedRow, TaskFilter, select_tasks};
use crate::errors::AppResult;
use crate::ledger::schema::{COL_TEXT, COL_TIMESTAMP};
use std::path::Path;

/// A task still waiting to be done, as shown in the to-do list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTask {
    pub line: u64,
    pub timestamp: String,
    pub text: String,
}

/// Tasks flagged in the ledger and not marked completed, in ledger order.
pub fn pending_tasks(path: &Path) -> AppResult<(Vec<PendingTask>, Vec<SkippedRow>)> {
    let selection = select_tasks(path, TaskFilter::Pending)?;
    let ts_idx = selection.header.iter().position(|h| h == COL_TIMESTAMP);
    let text_idx = selection.header.iter().position(|h| h == COL_TEXT);

    let tasks = selection
        .rows
        .iter()
        .map(|r| PendingTask {
            line: r.position().map(|p| p.line()).unwrap_or(0),
            timestamp: ts_idx.and_then(|i| r.get(i)).unwrap_or("").to_string(),
            text: text_idx.and_then(|i| r.get(i)).unwrap_or("").to_string(),
        })
        .collect();

    Ok((tasks, selection.skipped))
}
