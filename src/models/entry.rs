use crate::ledger::schema::{COL_TEXT, COL_TIMESTAMP};
use crate::utils::date::format_timestamp;
use chrono::Local;

/// Column values supplied by a caller for one new row.
///
/// `task` is not part of it: the store writes that column from the flag it
/// receives. Order of insertion is kept but does not matter, values are
/// placed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFields {
    fields: Vec<(String, String)>,
}

impl EntryFields {
    pub fn new(timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self::default()
            .with(COL_TIMESTAMP, timestamp)
            .with(COL_TEXT, text)
    }

    /// Set a column, replacing a previous value for the same name.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }
}

/// One captured note as written to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub timestamp: String, // ⇔ timestamp (YYYY-MM-DD DOW HH:MM:SS.ss)
    pub text: String,      // ⇔ text
    pub task: bool,        // ⇔ task ('0' | '1')
}

impl Entry {
    /// New entry stamped with the current local time.
    pub fn now(text: impl Into<String>, task: bool) -> Self {
        Self {
            timestamp: format_timestamp(&Local::now().naive_local()),
            text: text.into(),
            task,
        }
    }

    pub fn fields(&self) -> EntryFields {
        EntryFields::new(&self.timestamp, &self.text)
    }
}
