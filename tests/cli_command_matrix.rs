use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

fn run_help(home: &TempDir, args: &[&str]) {
    let mut cmd = cargo_bin_cmd!("sunlight-dash");
    cmd.env("HOME", home.path())
        .args(args)
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn every_cli_command_has_help_path() {
    let home = TempDir::new().expect("temp home");

    run_help(&home, &[]);
    for command in ["build", "series", "scores", "rank", "examples", "filter", "sanitize"] {
        run_help(&home, &[command]);
    }
}

#[test]
fn unknown_command_is_rejected() {
    let home = TempDir::new().expect("temp home");
    let mut cmd = cargo_bin_cmd!("sunlight-dash");
    cmd.env("HOME", home.path())
        .arg("publish")
        .assert()
        .failure();
}

#[test]
fn filter_requires_percent() {
    let home = TempDir::new().expect("temp home");
    let mut cmd = cargo_bin_cmd!("sunlight-dash");
    cmd.env("HOME", home.path())
        .arg("filter")
        .assert()
        .failure();
}
