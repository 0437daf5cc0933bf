//! End-to-end tests running the ditherlab binary.

mod common;

use std::process::Command;

use common::*;

fn ditherlab() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ditherlab"))
}

#[test]
fn test_render_subcommand_prints_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "palette.txt", FOUR_COLOR_PALETTE);
    let config = write_file(dir.path(), "lab.yaml", GRADIENT_CONFIG);
    let out_dir = dir.path().join("stages");

    let output = ditherlab()
        .arg("render")
        .arg("--config")
        .arg(&config)
        .arg("--out-dir")
        .arg(&out_dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["width"], 24);
    assert_eq!(summary["dither"], "blue-noise");
    assert_eq!(summary["palette"].as_array().unwrap().len(), 4);
    assert_eq!(summary["palette"][0]["color"], "#000000");
    assert!(summary["similarity"]["score"].as_f64().unwrap() > 0.0);
    assert_png_size(&out_dir.join("perceptual-delta.png"), 24, 12);
}

#[test]
fn test_palette_subcommand_fails_on_bad_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(dir.path(), "good.txt", FOUR_COLOR_PALETTE);
    let bad = write_file(dir.path(), "bad.txt", "#000 zz");

    let output = ditherlab().arg("palette").arg(&good).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "#000000 #ffffff\n#e03020 #2040e0"
    );

    let output = ditherlab().arg("palette").arg(&bad).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_no_subcommand_prints_status() {
    let output = ditherlab().output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("ditherlab "));
    assert!(stdout.contains("oklch"));
}
