use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{LEGACY_LEDGER, TWO_ROW_LEDGER, read, rows, scratch, write_file, zc};

#[test]
fn test_init_creates_ledger() {
    let dir = scratch();
    let ledger = dir.path().join("Z.csv");
    let ledger_s = ledger.to_string_lossy().to_string();

    zc(dir.path())
        .args(["--ledger", &ledger_s, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Ledger"));

    assert_eq!(read(&ledger), "timestamp,text,task\n");
    // test mode never writes the config file
    assert!(!dir.path().join(".zcapture").join("zcapture.conf").exists());
}

#[test]
fn test_add_with_and_without_task() {
    let dir = scratch();
    let ledger = dir.path().join("Z.csv");
    let ledger_s = ledger.to_string_lossy().to_string();

    zc(dir.path())
        .args(["--ledger", &ledger_s, "add", "--task", "buy milk"])
        .assert()
        .success()
        .stdout(contains("Added as task: buy milk"));

    zc(dir.path())
        .args(["--ledger", &ledger_s, "add", "call Bob"])
        .assert()
        .success()
        .stdout(contains("Added: call Bob"));

    let (header, data) = rows(&ledger);
    assert_eq!(header, vec!["timestamp", "text", "task"]);
    assert_eq!(data[0][1..], ["buy milk", "1"]);
    assert_eq!(data[1][1..], ["call Bob", "0"]);
}

#[test]
fn test_add_unknown_field_fails() {
    let dir = scratch();
    let ledger = write_file(dir.path(), "Z.csv", TWO_ROW_LEDGER);
    let ledger_s = ledger.to_string_lossy().to_string();

    zc(dir.path())
        .args(["--ledger", &ledger_s, "add", "x", "--field", "priority=high"])
        .assert()
        .failure()
        .stderr(contains("Schema mismatch"));

    zc(dir.path())
        .args(["--ledger", &ledger_s, "add", "x", "--field", "oops"])
        .assert()
        .failure()
        .stderr(contains("KEY=VALUE"));

    assert_eq!(read(&ledger), TWO_ROW_LEDGER);
}

#[test]
fn test_add_completed_needs_column() {
    let dir = scratch();
    let ledger = write_file(
        dir.path(),
        "Z.csv",
        "timestamp,text,task,completed\n",
    );
    let ledger_s = ledger.to_string_lossy().to_string();

    zc(dir.path())
        .args(["--ledger", &ledger_s, "add", "-t", "--completed", "done thing"])
        .assert()
        .success()
        .stdout(contains("as task (completed)"));

    let (_, data) = rows(&ledger);
    assert_eq!(data[0][1..], ["done thing", "1", "1"]);
}

#[test]
fn test_extract_default_output_next_to_ledger() {
    let dir = scratch();
    let ledger = write_file(dir.path(), "Z.csv", TWO_ROW_LEDGER);
    let ledger_s = ledger.to_string_lossy().to_string();

    zc(dir.path())
        .args(["--ledger", &ledger_s, "extract"])
        .assert()
        .success()
        .stdout(contains("Extracted 1 tasks"));

    let out = dir.path().join("tasks.csv");
    assert_eq!(
        read(&out),
        "timestamp,text,task\n2025-01-01 WED 10:00:00.00,buy milk,1\n"
    );
}

#[test]
fn test_extract_explicit_paths_and_pending_filter() {
    let dir = scratch();
    let input = write_file(
        dir.path(),
        "in.csv",
        "timestamp,text,task,completed\n\
         2025-01-01 WED 10:00:00.00,done,1,1\n\
         2025-01-01 WED 10:01:00.00,open,1,0\n",
    );
    let out = dir.path().join("pending.csv");

    zc(dir.path())
        .args([
            "extract",
            &input.to_string_lossy(),
            &out.to_string_lossy(),
            "--pending",
        ])
        .assert()
        .success()
        .stdout(contains("pending tasks"));

    let (_, data) = rows(&out);
    assert_eq!(data.len(), 1);
    assert_eq!(data[0][1], "open");
}

#[test]
fn test_extract_pending_and_completed_conflict() {
    let dir = scratch();
    zc(dir.path())
        .args(["extract", "a.csv", "b.csv", "--pending", "--completed"])
        .assert()
        .failure();
}

#[test]
fn test_extract_missing_input_fails() {
    let dir = scratch();
    let missing = dir.path().join("missing.csv");
    let out = dir.path().join("out.csv");

    zc(dir.path())
        .args(["extract", &missing.to_string_lossy(), &out.to_string_lossy()])
        .assert()
        .failure()
        .stderr(contains("File not found"));
    assert!(!out.exists());
}

#[test]
fn test_extract_reports_skipped_rows() {
    let dir = scratch();
    let input = write_file(
        dir.path(),
        "Z.csv",
        "timestamp,text,task\n2025-01-01 WED 10:00:00.00,ok,1\nbad,row\n",
    );
    let out = dir.path().join("out.csv");

    zc(dir.path())
        .args(["extract", &input.to_string_lossy(), &out.to_string_lossy()])
        .assert()
        .success()
        .stdout(contains("1 malformed row(s) skipped").and(contains("line 3")));
}

#[test]
fn test_migrate_check_then_migrate() {
    let dir = scratch();
    let ledger = write_file(dir.path(), "Z.csv", LEGACY_LEDGER);
    let ledger_s = ledger.to_string_lossy().to_string();

    zc(dir.path())
        .args(["--ledger", &ledger_s, "migrate", "--check"])
        .assert()
        .success()
        .stdout(contains("v1").and(contains("Migration pending")));
    assert_eq!(read(&ledger), LEGACY_LEDGER);

    zc(dir.path())
        .args(["--ledger", &ledger_s, "migrate"])
        .assert()
        .success()
        .stdout(contains("Ledger migrated (2 rows)"));

    let (header, _) = rows(&ledger);
    assert_eq!(header, vec!["timestamp", "text", "task"]);

    zc(dir.path())
        .args(["--ledger", &ledger_s, "migrate"])
        .assert()
        .success()
        .stdout(contains("up to date"));
}

#[test]
fn test_tasks_lists_pending_only() {
    let dir = scratch();
    let ledger = write_file(
        dir.path(),
        "Z.csv",
        "timestamp,text,task,completed\n\
         2025-01-01 WED 10:00:00.00,finished,1,1\n\
         2025-01-01 WED 10:01:00.00,still open,1,0\n\
         2025-01-01 WED 10:02:00.00,a note,0,0\n",
    );
    let ledger_s = ledger.to_string_lossy().to_string();

    zc(dir.path())
        .args(["--ledger", &ledger_s, "tasks"])
        .assert()
        .success()
        .stdout(
            contains("still open")
                .and(contains("3      2025-01-01 WED 10:01:00.00"))
                .and(contains("finished").not())
                .and(contains("a note").not()),
        );
}

#[test]
fn test_capture_session_toggle_applies_once() {
    let dir = scratch();
    let ledger = dir.path().join("Z.csv");
    let ledger_s = ledger.to_string_lossy().to_string();

    zc(dir.path())
        .args(["--ledger", &ledger_s, "capture"])
        .write_stdin("/task\nbuy milk\ncall Bob\n//etc/hosts\n/nope\n\n/quit\nignored\n")
        .assert()
        .success()
        .stdout(
            contains("Next entry is a task: on")
                .and(contains("Added as task: buy milk"))
                .and(contains("Added: call Bob"))
                .and(contains("Unknown command: /nope"))
                .and(contains("3 entries captured (1 tasks, 0 failed)")),
        );

    let (_, data) = rows(&ledger);
    let got: Vec<(&str, &str)> = data.iter().map(|r| (r[1].as_str(), r[2].as_str())).collect();
    assert_eq!(
        got,
        vec![("buy milk", "1"), ("call Bob", "0"), ("/etc/hosts", "0")]
    );
}

#[test]
fn test_config_file_is_honoured() {
    let dir = scratch();
    let conf_dir = dir.path().join(".zcapture");
    std::fs::create_dir_all(&conf_dir).unwrap();
    let ledger = write_file(dir.path(), "notes.csv", TWO_ROW_LEDGER);
    std::fs::write(
        conf_dir.join("zcapture.conf"),
        format!(
            "ledger: {}\ntasks_file: todo.csv\n",
            ledger.to_string_lossy()
        ),
    )
    .unwrap();

    zc(dir.path())
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("todo.csv").and(contains("pending_tasks.csv")));

    zc(dir.path()).args(["extract"]).assert().success();
    assert!(dir.path().join("todo.csv").exists());
}
