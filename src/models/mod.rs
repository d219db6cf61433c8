pub mod entry;
pub mod toggle;
