//! Versioned description of the ledger columns.
//!
//! Each schema version lists the columns a ledger must carry, in order, with
//! the value written into pre-existing rows when the column is added. Adding
//! a column in the future means adding a version here; the migration path in
//! [`crate::ledger::migrate`] stays the same.

pub const COL_TIMESTAMP: &str = "timestamp";
pub const COL_TEXT: &str = "text";
pub const COL_TASK: &str = "task";
pub const COL_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub default: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub version: u32,
    pub columns: &'static [ColumnSpec],
}

const V1_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        name: COL_TIMESTAMP,
        default: "",
    },
    ColumnSpec {
        name: COL_TEXT,
        default: "",
    },
];

const V2_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        name: COL_TIMESTAMP,
        default: "",
    },
    ColumnSpec {
        name: COL_TEXT,
        default: "",
    },
    ColumnSpec {
        name: COL_TASK,
        default: "0",
    },
];

/// Columns recognised when present but never added by migration.
pub const OPTIONAL_COLUMNS: &[ColumnSpec] = &[ColumnSpec {
    name: COL_COMPLETED,
    default: "0",
}];

pub const SCHEMA_HISTORY: &[Schema] = &[
    Schema {
        version: 1,
        columns: V1_COLUMNS,
    },
    Schema {
        version: 2,
        columns: V2_COLUMNS,
    },
];

pub const CURRENT_SCHEMA: Schema = Schema {
    version: 2,
    columns: V2_COLUMNS,
};

impl Schema {
    /// Header for a freshly created ledger.
    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.to_string()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Default for `name`, looking at optional columns too.
    pub fn default_for(&self, name: &str) -> &'static str {
        self.column(name)
            .or_else(|| OPTIONAL_COLUMNS.iter().find(|c| c.name == name))
            .map(|c| c.default)
            .unwrap_or("")
    }

    /// Highest schema version whose required columns are all in `header`.
    pub fn detect_version(header: &[String]) -> Option<u32> {
        SCHEMA_HISTORY
            .iter()
            .rev()
            .find(|s| {
                s.columns
                    .iter()
                    .all(|c| header.iter().any(|h| h == c.name))
            })
            .map(|s| s.version)
    }
}

/// A flag cell counts as set when it reads `1`. Older files written through
/// a float column may carry `1.0`.
pub fn flag_is_set(value: &str) -> bool {
    matches!(value.trim(), "1" | "1.0")
}

pub fn flag_value(on: bool) -> &'static str {
    if on { "1" } else { "0" }
}
