//! End-to-end CLI flows: configure the catalog, take an order, and walk
//! items through their workflows.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn atelier_cmd() -> Command {
    let mut cmd = Command::cargo_bin("atelier").expect("Failed to find atelier binary");
    cmd.arg("--no-color");
    cmd
}

fn run(db_arg: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = atelier_cmd();
    cmd.args(["--database-file", db_arg]);
    cmd.args(args);
    cmd.assert()
}

#[test]
fn test_full_spa_flow_with_chaining() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("flow.db");
    let db_arg = db_path.to_str().unwrap();

    // Two chained workflows for one service
    run(
        db_arg,
        &[
            "workflow",
            "add",
            "wf-clean",
            "Cleaning",
            "--stages",
            r#"[{"id":"c1","name":"Intake","order":1},{"id":"c2","name":"Wash","order":2}]"#,
        ],
    )
    .success();
    run(
        db_arg,
        &[
            "workflow",
            "add",
            "wf-polish",
            "Polishing",
            "--stages",
            r#"[{"id":"p1","name":"Buff","order":1}]"#,
        ],
    )
    .success();
    run(
        db_arg,
        &[
            "service",
            "add",
            "Full Spa",
            "250000",
            "--workflows",
            "wf-clean,wf-polish",
        ],
    )
    .success();

    run(
        db_arg,
        &["order", "create", "--customer", "Linh", "--services", "1"],
    )
    .success()
    .stdout(predicate::str::contains("Full Spa (Intake)"));

    // Walk to the end of the first workflow
    run(db_arg, &["move", "1", "1", "c2", "--actor", "an"]).success();

    // Dropping on done chains into the polishing workflow
    run(db_arg, &["move", "1", "1", "done", "--actor", "an"])
        .success()
        .stdout(predicate::str::contains("Handed off to next workflow"))
        .stdout(predicate::str::contains("Buff"));

    run(db_arg, &["progress", "1", "1"])
        .success()
        .stdout(predicate::str::contains("Workflow: Polishing"))
        .stdout(predicate::str::contains("➤ Buff"));

    // Finishing the last workflow completes the item
    run(db_arg, &["move", "1", "1", "done", "--actor", "an"])
        .success()
        .stdout(predicate::str::contains("Completed"));

    // The full journey is on the ledger
    run(db_arg, &["history", "1", "1"])
        .success()
        .stdout(predicate::str::contains("**Intake**"))
        .stdout(predicate::str::contains("**Wash**"))
        .stdout(predicate::str::contains("**Buff**"));

    // And the board shows the item under Done
    run(db_arg, &["board"])
        .success()
        .stdout(predicate::str::contains("## Done (1)"));
}

#[test]
fn test_sequential_gate_across_services() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("gate.db");
    let db_arg = db_path.to_str().unwrap();

    run(
        db_arg,
        &[
            "workflow",
            "add",
            "wf-a",
            "First",
            "--stages",
            r#"[{"id":"a1","name":"Start","order":1}]"#,
        ],
    )
    .success();
    run(
        db_arg,
        &[
            "workflow",
            "add",
            "wf-b",
            "Second",
            "--stages",
            r#"[{"id":"b1","name":"Start","order":1}]"#,
        ],
    )
    .success();
    run(db_arg, &["service", "add", "Repair", "90000", "--workflows", "wf-a"]).success();
    run(db_arg, &["service", "add", "Shine", "40000", "--workflows", "wf-b"]).success();

    run(db_arg, &["order", "create", "--services", "1,2"]).success();

    // The second service is blocked while the first is in flight
    run(db_arg, &["move", "1", "2", "done"])
        .failure()
        .stderr(predicate::str::contains("must be completed"));

    // Finish the first; the second unblocks
    run(db_arg, &["move", "1", "1", "done"]).success();
    run(db_arg, &["move", "1", "2", "done"])
        .success()
        .stdout(predicate::str::contains("Completed"));
}

#[test]
fn test_default_command_shows_board() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("default.db");

    atelier_cmd()
        .args(["--database-file", db_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing on the board."));
}
