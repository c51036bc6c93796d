use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// The binary, isolated from any config file and RUST_LOG of the host.
fn kuota_calc(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kuota-calc").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_reads_stdin() {
    let home = TempDir::new().unwrap();
    let manifest = fs::read_to_string(fixture("deployment.yaml")).unwrap();

    kuota_calc(&home)
        .write_stdin(manifest)
        .assert()
        .success()
        .stdout("CPU Request: 3250m\nCPU Limit: 6500m\nMemory Request: 26Gi\nMemory Limit: 52Gi\n");
}

#[test]
fn test_dash_reads_stdin() {
    let home = TempDir::new().unwrap();
    let manifest = fs::read_to_string(fixture("deployment.yaml")).unwrap();

    kuota_calc(&home)
        .arg("-")
        .write_stdin(manifest)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("CPU Request: 3250m\n"));
}

#[test]
fn test_mixed_workloads_all_rolling_out() {
    let home = TempDir::new().unwrap();

    kuota_calc(&home)
        .arg(fixture("mixed.yaml"))
        .assert()
        .success()
        .stdout("CPU Request: 3350m\nCPU Limit: 5700m\nMemory Request: 7296Mi\nMemory Limit: 13568Mi\n")
        .stderr(predicate::str::contains("v1/Service"));
}

#[test]
fn test_no_simultaneous_rollouts() {
    let home = TempDir::new().unwrap();

    kuota_calc(&home)
        .args(["--max-rollouts", "0"])
        .arg(fixture("mixed.yaml"))
        .assert()
        .success()
        .stdout("CPU Request: 2050m\nCPU Limit: 4100m\nMemory Request: 5504Mi\nMemory Limit: 11008Mi\n");
}

#[test]
fn test_one_rollout_picks_most_expensive_per_resource() {
    let home = TempDir::new().unwrap();

    kuota_calc(&home)
        .args(["--max-rollouts", "1"])
        .arg(fixture("mixed.yaml"))
        .assert()
        .success()
        .stdout("CPU Request: 2850m\nCPU Limit: 5100m\nMemory Request: 6528Mi\nMemory Limit: 13056Mi\n");
}

#[test]
fn test_detailed_table() {
    let home = TempDir::new().unwrap();

    kuota_calc(&home)
        .args(["--detailed", "--no-color", "--max-rollouts", "2"])
        .arg(fixture("mixed.yaml"))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("MaxReplicas")
                .and(predicate::str::contains("DeploymentConfig"))
                .and(predicate::str::contains("OnDelete"))
                .and(predicate::str::contains("nightly"))
                .and(predicate::str::contains("Table assuming simultaneous rollout of all resources"))
                .and(predicate::str::contains("Total assuming simultaneous rollout of 2 resources"))
                .and(predicate::str::contains("Service").not()),
        );
}

#[test]
fn test_json_output() {
    let home = TempDir::new().unwrap();

    let output = kuota_calc(&home)
        .args(["--format", "json"])
        .arg(fixture("mixed.yaml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["maxRollouts"], -1);
    assert_eq!(report["usages"].as_array().unwrap().len(), 4);
    assert_eq!(report["usages"][0]["details"]["kind"], "StatefulSet");
    assert_eq!(report["usages"][3]["details"]["maxReplicas"], 3);
    assert_eq!(report["total"]["cpuMin"], "3350m");
}

#[test]
fn test_quiet_suppresses_warnings() {
    let home = TempDir::new().unwrap();

    kuota_calc(&home)
        .arg("-q")
        .arg(fixture("mixed.yaml"))
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_calculation_error_aborts() {
    let home = TempDir::new().unwrap();

    kuota_calc(&home)
        .arg(fixture("invalid-strategy.yaml"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: calculating apps/v1/Deployment resource usage"))
        .stderr(predicate::str::contains("Canary"));
}

#[test]
fn test_keep_going_reports_remaining_documents() {
    let home = TempDir::new().unwrap();

    kuota_calc(&home)
        .arg("--keep-going")
        .arg(fixture("invalid-strategy.yaml"))
        .assert()
        .failure()
        .code(1)
        .stdout("CPU Request: 300m\nCPU Limit: 0\nMemory Request: 64Mi\nMemory Limit: 0\n")
        .stderr(predicate::str::contains("1 of 2 documents could not be calculated"));
}

#[test]
fn test_config_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("quota.toml");
    fs::write(
        &config,
        "[calculation]\nmax_rollouts = 0\n\n[output]\nformat = \"yaml\"\n",
    )
    .unwrap();

    kuota_calc(&home)
        .arg("--config")
        .arg(&config)
        .arg(fixture("mixed.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("maxRollouts: 0").and(predicate::str::contains("cpuMin: 2050m")));
}

#[test]
fn test_local_config_file_is_picked_up() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join(".kuota-calc.toml"),
        "[calculation]\nmax_rollouts = 0\n",
    )
    .unwrap();

    kuota_calc(&home)
        .arg(fixture("mixed.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("CPU Request: 2050m\n"));
}

#[test]
fn test_flags_override_config_file() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join(".kuota-calc.toml"),
        "[calculation]\nmax_rollouts = 0\n",
    )
    .unwrap();

    kuota_calc(&home)
        .args(["--max-rollouts", "-1"])
        .arg(fixture("mixed.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("CPU Request: 3350m\n"));
}

#[test]
fn test_invalid_config_file() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join(".kuota-calc.toml"), "max_rollouts = [\n").unwrap();

    kuota_calc(&home)
        .arg(fixture("deployment.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Configuration error"));
}

#[test]
fn test_missing_file() {
    let home = TempDir::new().unwrap();

    kuota_calc(&home)
        .arg("does-not-exist.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: reading does-not-exist.yaml"));
}

#[test]
fn test_only_unsupported_objects() {
    let home = TempDir::new().unwrap();

    kuota_calc(&home)
        .write_stdin("apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: settings\n")
        .assert()
        .success()
        .stdout("CPU Request: 0\nCPU Limit: 0\nMemory Request: 0\nMemory Limit: 0\n");
}

#[test]
fn test_invalid_yaml() {
    let home = TempDir::new().unwrap();

    kuota_calc(&home)
        .write_stdin("apiVersion: v1\nkind: Pod\nspec: [unclosed\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("decoding yaml data"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();

    kuota_calc(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
