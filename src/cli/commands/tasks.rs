use crate::config::Config;
use crate::core::tasks::pending_tasks;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, warning};
use crate::utils::table::{Column, Table};

/// Print the to-do list.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let ledger = cfg.ledger_path();
    if !ledger.exists() {
        info(format!("No ledger at {}", ledger.display()));
        return Ok(());
    }

    let (tasks, skipped) = pending_tasks(&ledger)?;
    for row in &skipped {
        warning(format!("line {} skipped: {}", row.line, row.reason));
    }

    if tasks.is_empty() {
        info("No pending tasks");
        return Ok(());
    }

    header("To-Do List");
    let mut table = Table::new(vec![
        Column {
            header: "Line".to_string(),
            width: 6,
        },
        Column {
            header: "Added On".to_string(),
            width: 26,
        },
        Column {
            header: "Task".to_string(),
            width: 50,
        },
    ]);
    for t in &tasks {
        table.add_row(vec![t.line.to_string(), t.timestamp.clone(), t.text.clone()]);
    }
    print!("{}", table.render());
    Ok(())
}
