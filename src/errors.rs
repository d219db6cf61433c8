//! Unified application error type.
//! All modules (ledger, core, cli, config) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Atomic replace failed: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    // ---------------------------
    // Ledger-related
    // ---------------------------
    #[error("Schema mismatch: column '{column}' is not part of the ledger header")]
    SchemaMismatch { column: String },

    #[error("Corrupt ledger at line {line}: expected {expected} fields, found {found}")]
    CorruptLedger {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Corrupt ledger at line {line}: quoted field is never closed")]
    UnterminatedField { line: u64 },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid field (expected KEY=VALUE): {0}")]
    InvalidField(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse result classes exposed to callers of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    FileNotFound,
    SchemaMismatch,
    CorruptLedger,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::FileNotFound(_) => ErrorKind::FileNotFound,
            AppError::SchemaMismatch { .. } | AppError::InvalidField(_) => {
                ErrorKind::SchemaMismatch
            }
            AppError::CorruptLedger { .. } | AppError::UnterminatedField { .. } => {
                ErrorKind::CorruptLedger
            }
            AppError::Csv(e) if is_row_corruption(e) => ErrorKind::CorruptLedger,
            AppError::Io(_) | AppError::Csv(_) | AppError::Persist(_) | AppError::Config(_) => {
                ErrorKind::Io
            }
        }
    }
}

/// Rows that cannot be decoded or do not fit the header.
fn is_row_corruption(e: &csv::Error) -> bool {
    matches!(
        e.kind(),
        csv::ErrorKind::UnequalLengths { .. } | csv::ErrorKind::Utf8 { .. }
    )
}

pub type AppResult<T> = Result<T, AppError>;
