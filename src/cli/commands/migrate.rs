use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ledger::MigrationOutcome;
use crate::ledger::migrate::{check_schema, ensure_schema};
use crate::ledger::schema::{CURRENT_SCHEMA, Schema};
use crate::ledger::io::read_header;
use crate::ui::messages::{info, success};

/// Handle the `migrate` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Migrate { check } = cmd {
        let ledger = cfg.ledger_path();

        if *check {
            if let Some(h) = read_header(&ledger)? {
                match Schema::detect_version(&h) {
                    Some(v) => info(format!("Ledger schema: v{v}")),
                    None => info("Ledger schema: unknown"),
                }
            }
            match check_schema(&ledger, &CURRENT_SCHEMA)? {
                MigrationOutcome::NotNeeded => info("No ledger yet, nothing to migrate"),
                MigrationOutcome::UpToDate => success("Ledger schema is up to date"),
                MigrationOutcome::Migrated { added, rows } => info(format!(
                    "Migration pending: would add {} to {} rows",
                    added.join(", "),
                    rows
                )),
            }
            return Ok(());
        }

        match ensure_schema(&ledger, &CURRENT_SCHEMA)? {
            MigrationOutcome::NotNeeded => info("No ledger yet, nothing to migrate"),
            MigrationOutcome::UpToDate => success("Ledger schema is up to date"),
            MigrationOutcome::Migrated { rows, .. } => {
                success(format!("Ledger migrated ({rows} rows)"))
            }
        }
    }
    Ok(())
}
