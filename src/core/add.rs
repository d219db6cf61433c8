use crate::errors::{AppError, AppResult};
use crate::ledger::NoteStore;
use crate::ledger::schema::{COL_COMPLETED, flag_value};
use crate::models::entry::Entry;
use crate::models::toggle::TaskToggleState;
use crate::ui::messages::success;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Append one entry. The task flag is taken from `toggle`, which is
    /// reset whether or not the write succeeds.
    ///
    /// `completed` and `extra` are written only into ledgers that carry
    /// those columns; anything else is a schema mismatch.
    pub fn apply(
        store: &mut NoteStore,
        text: &str,
        toggle: &mut TaskToggleState,
        completed: bool,
        extra: &[(String, String)],
    ) -> AppResult<Entry> {
        let task = toggle.consume();
        let entry = Entry::now(text, task);

        let mut fields = entry.fields();
        if completed {
            fields.set(COL_COMPLETED, flag_value(true));
        }
        for (column, value) in extra {
            fields.set(column.as_str(), value.as_str());
        }

        store.append(&fields, task)?;

        let mut msg = String::from("Added");
        if task {
            msg.push_str(" as task");
        }
        if completed {
            msg.push_str(" (completed)");
        }
        success(format!("{msg}: {text}"));

        Ok(entry)
    }

    /// Split a `KEY=VALUE` argument.
    pub fn parse_field(raw: &str) -> AppResult<(String, String)> {
        match raw.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
            _ => Err(AppError::InvalidField(raw.to_string())),
        }
    }
}
