use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn atelier_cmd() -> Command {
    let mut cmd = Command::cargo_bin("atelier").expect("Failed to find atelier binary");
    cmd.arg("--no-color");
    cmd
}

const STAGES_JSON: &str = r#"[{"id":"s-queue","name":"Queue","order":1},{"id":"s-wash","name":"Wash","order":2}]"#;

fn seed_workflow(db_arg: &str) {
    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "workflow",
            "add",
            "wf-clean",
            "Cleaning",
            "--stages",
            STAGES_JSON,
        ])
        .assert()
        .success();
}

fn seed_service(db_arg: &str) {
    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "service",
            "add",
            "Deep Clean",
            "150000",
            "--workflows",
            "wf-clean",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_workflow_add_and_list() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    seed_workflow(db_arg);

    atelier_cmd()
        .args(["--database-file", db_arg, "workflow", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaning"))
        .stdout(predicate::str::contains("1. Queue"))
        .stdout(predicate::str::contains("2. Wash"));
}

#[test]
fn test_cli_workflow_add_rejects_bad_json() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    atelier_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "workflow",
            "add",
            "wf-bad",
            "Broken",
            "--stages",
            "not json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid stage JSON"));
}

#[test]
fn test_cli_service_add_and_list() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    seed_workflow(db_arg);
    seed_service(db_arg);

    atelier_cmd()
        .args(["--database-file", db_arg, "service", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deep Clean"))
        .stdout(predicate::str::contains("wf-clean"));
}

#[test]
fn test_cli_order_create_starts_first_stage() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    seed_workflow(db_arg);
    seed_service(db_arg);

    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "order",
            "create",
            "--customer",
            "Linh",
            "--services",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created order with ID: 1"))
        .stdout(predicate::str::contains("Deep Clean (Queue)"));
}

#[test]
fn test_cli_order_create_with_product() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "order",
            "create",
            "--product",
            "Leather Balm:45000:2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Leather Balm"))
        .stdout(predicate::str::contains("✓ Done"));
}

#[test]
fn test_cli_order_create_rejects_bad_product_line() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    atelier_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "order",
            "create",
            "--product",
            "Laces:abc",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid price"));
}

#[test]
fn test_cli_order_list_empty() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    atelier_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "order",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No orders found."));
}

#[test]
fn test_cli_move_forward_and_history() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    seed_workflow(db_arg);
    seed_service(db_arg);
    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "order",
            "create",
            "--services",
            "1",
        ])
        .assert()
        .success();

    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "move",
            "1",
            "1",
            "s-wash",
            "--actor",
            "an",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved forward"));

    atelier_cmd()
        .args(["--database-file", db_arg, "history", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Queue**"))
        .stdout(predicate::str::contains("**Wash**"))
        .stdout(predicate::str::contains("(current)"));
}

#[test]
fn test_cli_backward_move_requires_reason() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    seed_workflow(db_arg);
    seed_service(db_arg);
    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "order",
            "create",
            "--services",
            "1",
        ])
        .assert()
        .success();
    atelier_cmd()
        .args(["--database-file", db_arg, "move", "1", "1", "s-wash"])
        .assert()
        .success();

    atelier_cmd()
        .args(["--database-file", db_arg, "move", "1", "1", "s-queue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reason is required"));

    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "move",
            "1",
            "1",
            "s-queue",
            "--reason",
            "wash failed",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved back"));
}

#[test]
fn test_cli_cancel_requires_confirm() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    seed_workflow(db_arg);
    seed_service(db_arg);
    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "order",
            "create",
            "--services",
            "1",
        ])
        .assert()
        .success();

    atelier_cmd()
        .args(["--database-file", db_arg, "move", "1", "1", "cancel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires confirmation"));

    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "move",
            "1",
            "1",
            "cancel",
            "--confirm",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workflow restarted"));
}

#[test]
fn test_cli_board_empty_and_populated() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    atelier_cmd()
        .args(["--database-file", db_arg, "board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing on the board."));

    seed_workflow(db_arg);
    seed_service(db_arg);
    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "order",
            "create",
            "--customer",
            "Linh",
            "--services",
            "1",
        ])
        .assert()
        .success();

    atelier_cmd()
        .args(["--database-file", db_arg, "board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Queue (1)"))
        .stdout(predicate::str::contains("Deep Clean"));
}

#[test]
fn test_cli_progress_view() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    seed_workflow(db_arg);
    seed_service(db_arg);
    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "order",
            "create",
            "--services",
            "1",
        ])
        .assert()
        .success();

    atelier_cmd()
        .args(["--database-file", db_arg, "progress", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workflow: Cleaning"))
        .stdout(predicate::str::contains("➤ Queue"))
        .stdout(predicate::str::contains("○ Wash"));
}

#[test]
fn test_cli_assign_and_task_commands() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "workflow",
            "add",
            "wf-qc",
            "QC",
            "--stages",
            r#"[{"id":"s-qc","name":"QC","order":1,"tasks":[{"id":"t-check","title":"Check stitching","order":1}]}]"#,
        ])
        .assert()
        .success();

    atelier_cmd()
        .args([
            "--database-file",
            db_arg,
            "assign",
            "1",
            "t-check",
            "--members",
            "mai,an",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assigned 2 member(s)"));

    atelier_cmd()
        .args(["--database-file", db_arg, "task", "wf-qc", "s-qc", "t-check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked task 't-check' as done"));

    atelier_cmd()
        .args(["--database-file", db_arg, "workflow", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] Check stitching"));
}

#[test]
fn test_cli_activity_empty_per_session() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    // The activity log is session-scoped; a fresh process has none
    atelier_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "activity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity this session."));
}
