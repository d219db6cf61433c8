use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ledger::NoteStore;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the ledger, with the current header, if it does not exist yet
///  - the ledger schema, if it exists but is out of date
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let ledger = cfg.init_all(cli.test)?;
    if !cli.test {
        success(format!("Config file: {}", Config::config_file().display()));
    }

    let mut store = NoteStore::open(&ledger);
    if store.init()? {
        success(format!("Ledger:      {}", ledger.display()));
    } else {
        info(format!("Ledger already present: {}", ledger.display()));
    }
    Ok(())
}
