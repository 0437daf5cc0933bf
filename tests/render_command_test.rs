//! Tests for the render command.

mod common;

use std::path::Path;

use common::*;
use dither_core::{DitherKind, PreviewStage, Rgb8};
use ditherlab::commands::run_render;
use ditherlab::config::LabConfig;
use ditherlab::error::LabError;
use pretty_assertions::assert_eq;

fn palette_colors() -> Vec<Rgb8> {
    vec![
        Rgb8::new(0x00, 0x00, 0x00),
        Rgb8::new(0xff, 0xff, 0xff),
        Rgb8::new(0xe0, 0x30, 0x20),
        Rgb8::new(0x20, 0x40, 0xe0),
    ]
}

#[test]
fn test_render_writes_every_stage() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "palette.txt", FOUR_COLOR_PALETTE);
    let config_path = write_file(dir.path(), "lab.yaml", GRADIENT_CONFIG);
    let out_dir = dir.path().join("out");

    let config = LabConfig::load(&config_path).unwrap();
    let summary = run_render(&config, dir.path(), None, &out_dir).unwrap();

    assert_eq!((summary.width, summary.height), (24, 12));
    assert_eq!(summary.dither, DitherKind::BlueNoise);
    assert_eq!(summary.files.len(), PreviewStage::ALL.len());
    for stage in PreviewStage::ALL {
        let path = out_dir.join(format!("{stage}.png"));
        assert!(summary.files.contains(&path), "missing {}", path.display());
        assert_png_size(&path, 24, 12);
    }

    let reduced = assert_png_size(&out_dir.join("reduced.png"), 24, 12);
    assert_only_colors(&reduced, &palette_colors());

    let total: u64 = summary.palette.iter().map(|e| e.count).sum();
    assert_eq!(total, 24 * 12);
    assert_eq!(summary.palette.len(), 4);
    let score = summary.similarity.as_ref().unwrap().score;
    assert!(score > 0.0 && score <= 100.0, "score {score}");
}

#[test]
fn test_render_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "palette.txt", FOUR_COLOR_PALETTE);
    let config_path = write_file(dir.path(), "lab.yaml", GRADIENT_CONFIG);
    let config = LabConfig::load(&config_path).unwrap();

    let a = run_render(&config, dir.path(), None, &dir.path().join("a")).unwrap();
    let b = run_render(&config, dir.path(), None, &dir.path().join("b")).unwrap();
    assert_eq!(a.palette, b.palette);
    assert_eq!(a.similarity, b.similarity);
    let first = std::fs::read(dir.path().join("a/reduced.png")).unwrap();
    let second = std::fs::read(dir.path().join("b/reduced.png")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_input_bitmap_overrides_configured_source() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_image(dir.path(), "ramp.png", &gray_ramp(20, 6));
    let out_dir = dir.path().join("out");

    let mut config = LabConfig::default();
    config.pipeline.dither = config.pipeline.dither.kind(DitherKind::ErrorDiffusion);

    let summary = run_render(&config, dir.path(), Some(&input), &out_dir).unwrap();
    assert_eq!((summary.width, summary.height), (20, 6));
    // Default stages only
    assert_eq!(summary.files.len(), 2);
    let source = assert_png_size(&out_dir.join("source.png"), 20, 6);
    assert_eq!(source, gray_ramp(20, 6));
    let reduced = assert_png_size(&out_dir.join("reduced.png"), 20, 6);
    assert_only_colors(&reduced, &[Rgb8::new(0, 0, 0), Rgb8::new(255, 255, 255)]);
}

#[test]
fn test_json_config_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_file(
        dir.path(),
        "lab.json",
        r##"{
            "palette": { "text": "#000 #888 #fff", "space": "lab" },
            "source": { "kind": "gradient", "width": 8, "height": 8,
                        "points": [{ "color": "#000" }, { "color": "#fff" }] },
            "pipeline": { "dither": { "kind": "bayer4" }, "stages": ["reduced"] }
        }"##,
    );
    let config = LabConfig::load(&config_path).unwrap();
    let summary = run_render(&config, dir.path(), None, &dir.path().join("out")).unwrap();
    assert_eq!(summary.dither, DitherKind::Bayer4);
    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.palette.len(), 3);
}

#[test]
fn test_missing_bitmap_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_render(
        &LabConfig::default(),
        dir.path(),
        Some(Path::new("/definitely/not/here.png")),
        &dir.path().join("out"),
    );
    assert!(matches!(result, Err(LabError::Io { .. })));
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "lab.yaml", "pipeline:\n  gamma: [1, 2]\n");
    assert!(matches!(LabConfig::load(&path), Err(LabError::Yaml(_))));
}
