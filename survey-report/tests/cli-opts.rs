use assert_cmd::Command;
use rstest::rstest;

const BIN: &str = "survey-report";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    // No default config file in there
    cmd.env("HOME", "testdata");
    cmd
}

fn stdout(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_empty_args() {
    cmd().assert().failure();
}

#[test]
fn test_help() {
    cmd().arg("-h").assert().success();
}

#[test]
fn test_version() {
    cmd().arg("-V").assert().success();
    let out = stdout(cmd().arg("version"));
    assert!(out.contains("survey-report"));
    assert!(out.contains("by The treatpath developers"));
}

#[test]
fn test_invalid_no_file() {
    cmd().arg("report").arg("testdata/nope.json").assert().failure();
}

#[test]
fn test_report_missing_datum() {
    cmd()
        .arg("report")
        .arg("testdata/no-datum.json")
        .assert()
        .failure();
}

#[test]
fn test_report() {
    let out = stdout(cmd().arg("report").arg("testdata/field.json"));
    assert!(out.contains("lead-in"));
    assert!(out.contains("turns"));
    assert!(out.contains("non-treatment"));
    assert!(out.contains("8-10"));
}

#[test]
fn test_report_json() {
    let out = stdout(
        cmd()
            .args(["-t", "1", "-n", "1"])
            .arg("report")
            .arg("--json")
            .arg("testdata/field.json"),
    );
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(5., v["times"]["treatment_distance"]);
    assert_eq!(8., v["times"]["non_treatment_distance"]);
    assert_eq!(2, v["runs"]["runs"].as_array().unwrap().len());
    assert_eq!(100., v["home"]["x"]);
}

#[test]
fn test_report_config_file() {
    let out = stdout(
        cmd()
            .args(["-c", "testdata/survey-report.hcl"])
            .arg("report")
            .arg("-J")
            .arg("testdata/field.json"),
    );
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(0.25, v["treatment_speed"]);
    assert_eq!(0.5, v["non_treatment_speed"]);
}

#[rstest]
#[case(&["-t", "-1"])]
#[case(&["-n", "0"])]
#[case(&["-c", "testdata/negative.hcl"])]
#[case(&["-c", "testdata/bad-version.hcl"])]
#[case(&["-c", "testdata/missing.hcl"])]
fn test_report_bad_config(#[case] args: &[&str]) {
    cmd()
        .args(args)
        .arg("report")
        .arg("testdata/field.json")
        .assert()
        .failure();
}

#[test]
fn test_track() {
    let out = stdout(
        cmd()
            .arg("track")
            .args(["--fixes", "testdata/fixes.csv"])
            .arg("testdata/field.json"),
    );
    assert!(out.contains("4/5 fixes captured"));
    assert!(out.contains("lead-out"));
}

#[test]
fn test_track_json() {
    let out = stdout(
        cmd()
            .arg("track")
            .args(["-f", "testdata/fixes.csv", "-J"])
            .arg("testdata/field.json"),
    );
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    let log = v.as_array().unwrap();
    let idx: Vec<_> = log.iter().map(|r| r["point_index"].as_u64().unwrap()).collect();
    assert_eq!(vec![0, 2, 6, 11], idx);
    assert_eq!("turns", log[2]["section"]);
}

#[test]
fn test_track_bad_threshold() {
    cmd()
        .args(["--threshold", "0"])
        .arg("track")
        .args(["-f", "testdata/fixes.csv"])
        .arg("testdata/field.json")
        .assert()
        .failure();
}

#[test]
fn test_track_missing_fixes() {
    cmd()
        .arg("track")
        .args(["-f", "testdata/nope.csv"])
        .arg("testdata/field.json")
        .assert()
        .failure();
}
