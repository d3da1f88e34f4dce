use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_describes_the_pipeline() {
    Command::cargo_bin("calib-video")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chessboard video"));
}

#[test]
fn missing_video_is_an_error() {
    Command::cargo_bin("calib-video")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input video"));
}

#[test]
fn unopenable_video_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.mp4");
    Command::cargo_bin("calib-video")
        .unwrap()
        .arg(&missing)
        .arg("--select-all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open video source"));
}

#[test]
fn config_file_supplies_the_video_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("run.json");
    std::fs::write(
        &config,
        format!(
            r#"{{"video_path": {:?}, "selection": "all"}}"#,
            dir.path().join("absent.mov")
        ),
    )
    .unwrap();
    Command::cargo_bin("calib-video")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open video source"));
}

#[test]
fn bad_pattern_flag_is_rejected_by_clap() {
    Command::cargo_bin("calib-video")
        .unwrap()
        .args(["video.mp4", "--pattern", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pattern"));
}
