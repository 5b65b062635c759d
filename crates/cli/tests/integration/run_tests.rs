use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn first_run_configures_builds_and_runs_app() {
  let env = TestEnv::new();

  env
    .cbuild_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("Run complete"));

  assert!(env.build_path().is_dir());
  assert_eq!(
    env.calls(),
    vec!["cmake .. @ build", "cmake --build . @ build", "mylib_app"]
  );
}

#[test]
#[serial]
fn second_run_reuses_output_dir() {
  let env = TestEnv::new();

  env.cbuild_cmd().assert().success();
  env
    .cbuild_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("no (reused)"));

  assert!(env.build_path().join("CMakeCache.txt").exists());
  assert_eq!(env.calls()[3..], ["cmake --build . @ build", "mylib_app"]);
}

#[test]
#[serial]
fn clean_run_recreates_output_dir() {
  let env = TestEnv::new();
  env.cbuild_cmd().assert().success();
  std::fs::write(env.build_path().join("stale.o"), "").unwrap();

  env.cbuild_cmd().arg("--clean").assert().success();

  assert!(!env.build_path().join("stale.o").exists());
  assert_eq!(
    env.calls()[3..],
    ["cmake .. @ build", "cmake --build . @ build", "mylib_app"]
  );
}

#[test]
#[serial]
fn test_mode_runs_tests_under_checker() {
  let env = TestEnv::new();

  env
    .cbuild_cmd()
    .args(["-c", "-t"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Tests passed"));

  assert_eq!(
    env.calls(),
    vec![
      "cmake .. -DTESTING=ON @ build",
      "cmake --build . @ build",
      "valgrind --leak-check=full ./mylib_test --output-on-failure",
      "mylib_test --output-on-failure",
    ]
  );
}

#[test]
#[serial]
fn configure_failure_stops_before_build() {
  let env = TestEnv::new();

  env
    .cbuild_cmd()
    .env("FAKE_CONFIGURE_EXIT", "1")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Configure failed"));

  assert_eq!(env.calls(), vec!["cmake .. @ build"]);
  // Left in place for inspection.
  assert!(env.build_path().join("CMakeCache.txt").exists());
}

#[test]
#[serial]
fn build_failure_stops_before_execute() {
  let env = TestEnv::new();

  env
    .cbuild_cmd()
    .env("FAKE_BUILD_EXIT", "2")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Build failed"))
    .stderr(predicate::str::contains("exit code Some(2)"));

  assert_eq!(env.calls(), vec!["cmake .. @ build", "cmake --build . @ build"]);
}

#[test]
#[serial]
fn failing_tests_report_test_failure() {
  let env = TestEnv::new();

  env
    .cbuild_cmd()
    .arg("--test")
    .env("FAKE_RUN_EXIT", "1")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Test failed"));

  assert_eq!(env.calls().last().unwrap(), "mylib_test --output-on-failure");
}

#[test]
#[serial]
fn json_summary_lists_phases() {
  let env = TestEnv::new();

  env
    .cbuild_cmd()
    .args(["-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"phases\""))
    .stdout(predicate::str::contains("\"configuring\""))
    .stdout(predicate::str::contains("\"perform_clean_configure\": true"));
}

#[test]
#[serial]
fn dry_run_touches_nothing() {
  let env = TestEnv::new();

  env
    .cbuild_cmd()
    .args(["--dry-run", "--test"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"))
    .stdout(predicate::str::contains("-DTESTING=ON"))
    .stdout(predicate::str::contains("./mylib_test --output-on-failure"));

  assert!(!env.build_path().exists());
  assert!(env.calls().is_empty());
}

#[test]
#[serial]
fn verbose_logs_phases() {
  let env = TestEnv::new();

  env
    .cbuild_cmd()
    .arg("--verbose")
    .assert()
    .success()
    .stderr(predicate::str::contains("configuring"))
    .stderr(predicate::str::contains("building"));
}

#[test]
#[serial]
fn json_failure_names_failed_phase() {
  let env = TestEnv::new();

  env
    .cbuild_cmd()
    .args(["-o", "json"])
    .env("FAKE_BUILD_EXIT", "2")
    .assert()
    .code(1)
    .stdout(predicate::str::contains("\"failed_phase\": \"building\""))
    .stdout(predicate::str::contains("Build failed"))
    .stderr(predicate::str::contains("Build failed"));
}
