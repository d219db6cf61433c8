//! CSV ledger: schema descriptor, migration and the append-only store.

pub mod io;
pub mod migrate;
pub mod schema;
pub mod store;

pub use migrate::{MigrationOutcome, SchemaPlan, ensure_schema, ensure_task_column};
pub use store::NoteStore;
