use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn write_trace(lines: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("temp trace");
    tmp.write_all(lines.as_bytes()).expect("write trace");
    tmp
}

#[test]
fn headless_run_reports_compact_profile() {
    let mut cmd = Command::cargo_bin("donut-view").expect("binary exists");
    cmd.args(["--headless", "--width", "500", "--height", "400", "--frames", "5"]);
    cmd.assert()
        .success()
        .stdout(contains("Viewport: compact (500x400)"))
        .stdout(contains("Torus: 1683 vertices, 3200 triangles"))
        .stdout(contains("Frames: 5"))
        .stdout(contains("Final rotation: x=0.0000 y=0.0000"));
}

#[test]
fn headless_run_reports_standard_profile() {
    let mut cmd = Command::cargo_bin("donut-view").expect("binary exists");
    cmd.args(["--headless", "--width", "1024", "--height", "768", "--frames", "1"]);
    cmd.assert()
        .success()
        .stdout(contains("Viewport: standard (1024x768)"))
        .stdout(contains("Torus: 6565 vertices, 12800 triangles"));
}

#[test]
fn trace_replay_eases_towards_top_right_corner() {
    let trace = write_trace("# top right corner\n1000 0\n");
    let mut cmd = Command::cargo_bin("donut-view").expect("binary exists");
    cmd.args(["--headless", "--width", "1000", "--height", "800", "--frames", "1"])
        .arg("--trace")
        .arg(trace.path());
    cmd.assert()
        .success()
        .stdout(contains("Frames: 1"))
        .stdout(contains(
            "Final rotation: x=0.2199 y=0.2639 target: x=3.1416 y=3.7699",
        ));
}

#[test]
fn resize_in_trace_keeps_standard_profile() {
    let trace = write_trace("resize 500 1000\n500 500\n");
    let mut cmd = Command::cargo_bin("donut-view").expect("binary exists");
    cmd.args(["--headless", "--width", "1280", "--height", "720", "--frames", "2"])
        .arg("--trace")
        .arg(trace.path());
    cmd.assert()
        .success()
        .stdout(contains("Viewport: standard (500x1000)"))
        .stdout(contains("Torus: 6565 vertices, 12800 triangles"))
        .stdout(contains("target: x=0.0000 y=3.7699"));
}

#[test]
fn malformed_trace_fails_with_line_number() {
    let trace = write_trace("10 20\nleft\n");
    let mut cmd = Command::cargo_bin("donut-view").expect("binary exists");
    cmd.arg("--headless").arg("--trace").arg(trace.path());
    cmd.assert()
        .failure()
        .stderr(contains("invalid trace event on line 2"));
}

#[test]
fn unknown_flag_prints_usage() {
    let mut cmd = Command::cargo_bin("donut-view").expect("binary exists");
    cmd.arg("--fullscreen");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown argument: --fullscreen"))
        .stderr(contains("Usage: donut-view"));
}
