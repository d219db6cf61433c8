use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::errors::AppResult;
use crate::ledger::NoteStore;
use crate::models::toggle::TaskToggleState;

/// Capture a single entry.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        text,
        task,
        completed,
        fields,
    } = cmd
    {
        let extra = fields
            .iter()
            .map(|f| AddLogic::parse_field(f))
            .collect::<AppResult<Vec<_>>>()?;

        let mut toggle = TaskToggleState::new();
        toggle.set(*task);

        let mut store = NoteStore::open(cfg.ledger_path());
        AddLogic::apply(&mut store, text, &mut toggle, *completed, &extra)?;
    }
    Ok(())
}
