use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn write_settings(xml: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("temp settings");
    tmp.write_all(xml.as_bytes()).expect("write settings");
    tmp
}

#[test]
fn summary_prints_defaults() {
    let mut cmd = Command::cargo_bin("lighting-demo").expect("binary exists");
    cmd.arg("--summary-only");
    cmd.assert()
        .success()
        .stdout(contains("Lighting demo settings"))
        .stdout(contains("window: 1080x640 \"Lighting\""))
        .stdout(contains("projection perspective"))
        .stdout(contains("View matrix:"))
        .stdout(contains("Projection matrix:"))
        .stdout(contains(" - light 1: (1.00, 0.00, 0.00)"))
        .stdout(contains(" - light 2: (0.00, 1.00, 0.00)"));
}

#[test]
fn summary_reflects_settings_file() {
    let settings = write_settings(
        r#"<settings>
  <window><width>800</width><height>600</height><title>Demo</title></window>
  <camera><projection>orthographic</projection></camera>
  <lighting>
    <spot><cutoff>25</cutoff></spot>
    <orbit1><center>0 1 0</center><radius>2</radius></orbit1>
  </lighting>
</settings>
"#,
    );
    let mut cmd = Command::cargo_bin("lighting-demo").expect("binary exists");
    cmd.arg("--config").arg(settings.path()).arg("--summary-only");
    cmd.assert()
        .success()
        .stdout(contains("window: 800x600 \"Demo\""))
        .stdout(contains("projection orthographic"))
        .stdout(contains("cutoff 25.0 deg"))
        .stdout(contains(" - light 1: (2.00, 1.00, 0.00)"));
}

#[test]
fn invalid_settings_fail_with_tag_name() {
    let settings = write_settings("<settings><camera><fov>wide</fov></camera></settings>");
    let mut cmd = Command::cargo_bin("lighting-demo").expect("binary exists");
    cmd.arg("--config").arg(settings.path()).arg("--summary-only");
    cmd.assert().failure().stderr(contains("<fov>"));
}

#[test]
fn missing_settings_file_fails() {
    let mut cmd = Command::cargo_bin("lighting-demo").expect("binary exists");
    cmd.arg("--config")
        .arg("does-not-exist.xml")
        .arg("--summary-only");
    cmd.assert()
        .failure()
        .stderr(contains("unable to read does-not-exist.xml"));
}

#[test]
fn unknown_argument_fails() {
    let mut cmd = Command::cargo_bin("lighting-demo").expect("binary exists");
    cmd.arg("--fullscreen");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown argument: --fullscreen"));
}
