//! Path utilities: expand ~, resolve names relative to the ledger directory.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Relative names are placed next to `ledger`; absolute ones are kept.
pub fn beside(ledger: &Path, name: &str) -> PathBuf {
    let p = expand_tilde(name);
    if p.is_absolute() {
        return p;
    }
    match ledger.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(p),
        _ => p,
    }
}
