#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The binary, with HOME pointed at `home` so no real config is read.
pub fn zc(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("zcapture");
    cmd.env("HOME", home).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

pub fn scratch() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Write `content` to `name` inside `dir` and return the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read file")
}

/// Parse a CSV file into header + rows.
pub fn rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rdr = csv::Reader::from_path(path).expect("open csv");
    let header = rdr
        .headers()
        .expect("header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = rdr
        .records()
        .map(|r| r.expect("record").iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

pub const TWO_ROW_LEDGER: &str = "timestamp,text,task\n\
2025-01-01 WED 10:00:00.00,buy milk,1\n\
2025-01-01 WED 10:05:00.00,call Bob,0\n";

pub const LEGACY_LEDGER: &str = "timestamp,text\n\
2025-01-01 WED 10:00:00.00,buy milk\n\
2025-01-01 WED 10:05:00.00,\"call Bob, then Alice\"\n";
