use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn plategen() -> Command {
    Command::new(assert_cmd::cargo_bin!("plategen"))
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.output().expect("run plategen");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).expect("stdout is JSON")
}

#[test]
fn default_command_prints_svg() {
    let out = plategen().output().expect("run plategen");
    assert!(out.status.success());
    let svg = String::from_utf8(out.stdout).expect("utf-8");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"data-compression="1""#));
}

#[test]
fn renders_png_from_a_json_configuration() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("munich.png");

    plategen()
        .args([
            "render",
            "--format",
            "png",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture("munich.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
}

#[test]
fn export_writes_a_named_fixed_width_png() {
    let tmp = tempfile::tempdir().expect("tempdir");

    plategen()
        .args([
            "export",
            "--out",
            tmp.path().to_string_lossy().as_ref(),
            fixture("munich.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(tmp.path().join("PlateMAB1234.png")).expect("read export");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    assert_eq!((width, height), (420, 100));
}

#[test]
fn profile_reports_the_resolved_format() {
    let profile = stdout_json(plategen().args(["profile", "--country", "a"]));
    assert_eq!(profile["country"], "A");
    assert!(!profile["stripes"].is_null());

    let all = stdout_json(plategen().args(["profile", "--all"]));
    assert_eq!(all.as_array().map(Vec::len), Some(31));
}

#[test]
fn compact_layout_grows_past_its_minimum() {
    let out = stdout_json(plategen().args([
        "layout",
        fixture("sweden_personalized.json").to_string_lossy().as_ref(),
    ]));
    let width = out["layout"]["plateWidth"].as_f64().expect("plate width");
    assert!(width > 369.0 && width < 520.0, "{width}");
    assert_eq!(out["layout"]["compressionRatio"], 1.0);
}

#[test]
fn fragment_is_normalized_on_the_way_through() {
    let out = plategen()
        .args(["fragment", "--fragment", "#country=pl&text=ww%20123&bogus=1"])
        .output()
        .expect("run plategen");
    assert!(out.status.success());
    let fragment = String::from_utf8(out.stdout).expect("utf-8");
    assert!(fragment.starts_with("country=PL"), "{fragment}");
    assert!(fragment.contains("text=WW+123"), "{fragment}");
    assert!(!fragment.contains("bogus"));
}

#[test]
fn strict_fragment_fails_on_unknown_keys() {
    let out = plategen()
        .args(["render", "--strict", "--fragment", "bogus=1"])
        .output()
        .expect("run plategen");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown key"));
    assert!(out.stdout.is_empty());
}

#[test]
fn usage_errors_exit_with_two() {
    let out = plategen()
        .args(["render", "--format", "gif"])
        .output()
        .expect("run plategen");
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("USAGE"));
}
