use crate::config::Config;
use crate::core::capture::CaptureSession;
use crate::errors::AppResult;
use crate::ledger::NoteStore;
use crate::ui::messages::{header, info};
use std::io;

/// Run an interactive capture session on stdin.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let ledger = cfg.ledger_path();
    header(format!("Capturing into {}", ledger.display()));
    info(format!(
        "{p}task toggles the task flag for the next entry, {p}quit ends the session",
        p = cfg.command_prefix
    ));

    let mut store = NoteStore::open(&ledger);
    let mut session = CaptureSession::new(&mut store, cfg.command_prefix.as_str());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let summary = session.run(stdin.lock(), &mut stdout)?;

    info(format!(
        "{} entries captured ({} tasks, {} failed)",
        summary.captured, summary.tasks, summary.failed
    ));
    Ok(())
}
