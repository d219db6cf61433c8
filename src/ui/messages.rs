//! User-facing status lines (stdout/stderr), as opposed to `log` diagnostics.

use std::fmt;
use std::io::IsTerminal;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

/// Colors only on a terminal, and never when NO_COLOR is set.
fn styled(color: &str, icon: &str, on_terminal: bool) -> String {
    if on_terminal && std::env::var_os("NO_COLOR").is_none() {
        format!("{color}{BOLD}{icon}{RESET}")
    } else {
        icon.to_string()
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    let out = std::io::stdout().is_terminal();
    println!("{} {}", styled(FG_BLUE, ICON_INFO, out), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    let out = std::io::stdout().is_terminal();
    println!("{} {}", styled(FG_GREEN, ICON_OK, out), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    let out = std::io::stdout().is_terminal();
    println!("{} {}", styled(FG_YELLOW, ICON_WARN, out), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    let err = std::io::stderr().is_terminal();
    eprintln!("{} {}", styled(FG_RED, ICON_ERR, err), msg);
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    if std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        println!("{FG_BLUE}{BOLD}== {msg}{RESET}");
    } else {
        println!("== {msg}");
    }
}
