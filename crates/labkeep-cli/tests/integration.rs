#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn labkeep(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("labkeep").unwrap();
    cmd.current_dir(dir.path()).env_remove("LABKEEP_CONFIG");
    cmd
}

// ---------------------------------------------------------------------------
// labkeep lab
// ---------------------------------------------------------------------------

#[test]
fn lab_session_runs_an_experiment() {
    let dir = TempDir::new().unwrap();
    labkeep(&dir)
        .args(["lab", "--fast", "--seed", "11"])
        .write_stdin(
            "1\nVision\nimage models\n\
             3\nP0001\n\
             1\nbaseline\nregression\nhousing\nalpha=0.5\n\
             3\nE0001\n\
             2\n4\n4\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 'Vision' created with ID: P0001"))
        .stdout(predicate::str::contains("with ID: E0001"))
        .stdout(predicate::str::contains("Results: {mae: "))
        .stdout(predicate::str::contains("Completed"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn lab_errors_do_not_change_exit_status() {
    let dir = TempDir::new().unwrap();
    labkeep(&dir)
        .args(["lab", "--fast"])
        .write_stdin("3\nP0404\n7\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project not found."))
        .stdout(predicate::str::contains("Invalid choice. Please try again."));
}

#[test]
fn lab_exits_cleanly_on_eof() {
    let dir = TempDir::new().unwrap();
    labkeep(&dir)
        .args(["lab", "--fast"])
        .write_stdin("1\nVision\n")
        .assert()
        .success();
}

#[test]
fn lab_json_listing() {
    let dir = TempDir::new().unwrap();
    labkeep(&dir)
        .args(["--json", "lab", "--fast"])
        .write_stdin("1\nVision\nd\n2\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Vision\""));
}

#[test]
fn lab_uses_logical_mode_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("labkeep.yaml"),
        "runner:\n  min_delay_ms: 1500\n  max_delay_ms: 1500\n  mode: logical\n",
    )
    .unwrap();
    labkeep(&dir)
        .arg("lab")
        .write_stdin("1\nA\nd\n3\nP0001\n1\ne\nx\nd\n\n3\nE0001\n4\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Duration: 1.500s"))
        .stdout(predicate::str::contains("Results: {dummy_score: "));
}

#[test]
fn rust_log_raises_verbosity_above_default() {
    let dir = TempDir::new().unwrap();
    let script = "1\nA\nd\n3\nP0001\n1\ne\nclassification\niris\n\n3\nE0001\n4\n4\n";

    labkeep(&dir)
        .args(["lab", "--fast"])
        .env("RUST_LOG", "info")
        .write_stdin(script)
        .assert()
        .success()
        .stderr(predicate::str::contains("experiment completed"));

    labkeep(&dir)
        .args(["lab", "--fast"])
        .env_remove("RUST_LOG")
        .write_stdin(script)
        .assert()
        .success()
        .stderr(predicate::str::contains("experiment completed").not());
}

#[test]
fn lab_refuses_invalid_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("labkeep.yaml"),
        "runner:\n  min_delay_ms: 9000\n  max_delay_ms: 10\n",
    )
    .unwrap();
    labkeep(&dir)
        .arg("lab")
        .write_stdin("4\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

// ---------------------------------------------------------------------------
// labkeep clinic
// ---------------------------------------------------------------------------

#[test]
fn clinic_jane_doe_session() {
    let dir = TempDir::new().unwrap();
    labkeep(&dir)
        .arg("clinic")
        .write_stdin(
            "1\nJane Doe\n1990-01-01\n555-0100\n\
             2\nP0001\nSmith\n2024-03-15 09:30\ncheckup\n\
             2\nP0001\nSmith\n2024-04-15 10:00\nfollow-up\n\
             3\nP0001\n6\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Patient Jane Doe registered with ID: P0001"))
        .stdout(predicate::str::contains(
            "Appointment ID: A0001, Patient ID: P0001, Doctor: Smith, Time: 2024-03-15 09:30",
        ))
        .stdout(predicate::str::contains(
            "Appointment ID: A0002, Patient ID: P0001, Doctor: Smith, Time: 2024-04-15 10:00",
        ));
}

#[test]
fn clinic_rejects_bad_date() {
    let dir = TempDir::new().unwrap();
    labkeep(&dir)
        .arg("clinic")
        .write_stdin("1\nJane\nx\ny\n2\nP0001\nSmith\n15/03/2024 9:30\ncheckup\n3\nP0001\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: invalid date/time"))
        .stdout(predicate::str::contains("No appointments found for this patient."));
}

#[test]
fn clinic_unknown_patient() {
    let dir = TempDir::new().unwrap();
    labkeep(&dir)
        .arg("clinic")
        .write_stdin("2\nP0009\nSmith\n2024-03-15 09:30\ncheckup\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: patient not found: P0009"));
}

// ---------------------------------------------------------------------------
// labkeep config
// ---------------------------------------------------------------------------

#[test]
fn config_show_defaults() {
    let dir = TempDir::new().unwrap();
    labkeep(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_delay_ms: 5000"));
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.yaml");
    std::fs::write(&path, "runner:\n  min_delay_ms: 9000\n  max_delay_ms: 10\n").unwrap();
    labkeep(&dir)
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error]"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    labkeep(&dir)
        .args(["clinic", "--config", "does-not-exist.yaml"])
        .write_stdin("6\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}
