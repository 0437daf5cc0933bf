//! Subcommand bodies, kept out of `main` so integration tests can call them.

use std::path::{Path, PathBuf};

use dither_core::palette::{parse_palette_text, PaletteText};
use dither_core::similarity::{compare_buffers, SimilarityOptions, SimilaritySpace};
use dither_core::{render, DitherKind, ReductionPalette, Rgb8, SimilarityReport};
use serde::Serialize;

use crate::config::{LabConfig, SourceConfig};
use crate::error::LabError;
use crate::image_io;

/// Metrics of one render, printed as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    pub width: usize,
    pub height: usize,
    pub dither: DitherKind,
    pub gamut_active: bool,
    pub palette: Vec<PaletteUsageEntry>,
    pub similarity: Option<SimilarityReport>,
    /// Written stage images, in pipeline order
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteUsageEntry {
    pub color: Rgb8,
    pub count: u64,
    pub fraction: f64,
}

/// Render `config` and write one PNG per enabled stage into `out_dir`.
///
/// `input` replaces the configured source with a bitmap. Relative paths in
/// the config resolve against `base_dir`.
pub fn run_render(
    config: &LabConfig,
    base_dir: &Path,
    input: Option<&Path>,
    out_dir: &Path,
) -> Result<RenderSummary, LabError> {
    let source = match input {
        Some(path) => SourceConfig::Bitmap {
            path: path.to_path_buf(),
        }
        .load(Path::new("."))?,
        None => config.source.load(base_dir)?,
    };
    let palette = config.palette.build(base_dir)?;

    let output = render(&source, &palette, &config.pipeline);

    std::fs::create_dir_all(out_dir).map_err(|e| LabError::io(out_dir, e))?;
    let mut files = Vec::with_capacity(output.stages.len());
    for (stage, image) in &output.stages {
        let path = out_dir.join(format!("{stage}.png"));
        image_io::write_png(&path, image)?;
        files.push(path);
    }

    let summary = RenderSummary {
        width: output.width,
        height: output.height,
        dither: config.pipeline.dither.kind,
        gamut_active: output.gamut.is_active,
        palette: usage_entries(&palette, &output.usage.counts, output.usage.total),
        similarity: output.similarity,
        files,
    };
    tracing::info!(
        width = summary.width,
        height = summary.height,
        files = summary.files.len(),
        "Rendered"
    );
    Ok(summary)
}

fn usage_entries(palette: &ReductionPalette, counts: &[u64], total: u64) -> Vec<PaletteUsageEntry> {
    palette
        .entries()
        .iter()
        .zip(counts)
        .map(|(entry, &count)| PaletteUsageEntry {
            color: entry.rgb.to_rgb8(),
            count,
            fraction: if total > 0 {
                count as f64 / total as f64
            } else {
                0.0
            },
        })
        .collect()
}

/// Parse a palette file, keeping malformed tokens as errors in the result.
pub fn run_palette(path: &Path) -> Result<PaletteText, LabError> {
    let text = std::fs::read_to_string(path).map_err(|e| LabError::io(path, e))?;
    let parsed = parse_palette_text(&text)?;
    for error in &parsed.errors {
        tracing::warn!(%error, "Skipped palette token");
    }
    Ok(parsed)
}

/// Plain-text listing of parsed palette rows, one row per line.
pub fn format_palette(parsed: &PaletteText) -> String {
    parsed
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|c| c.to_hex())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Perceptual similarity of two PNG files.
pub fn run_compare(
    a: &Path,
    b: &Path,
    radius: f64,
    space: SimilaritySpace,
) -> Result<SimilarityReport, LabError> {
    let first = image_io::read_png(a)?;
    let second = image_io::read_png(b)?;
    let options = SimilarityOptions {
        radius,
        space,
        keep_deltas: false,
    };
    compare_buffers(&first, &second, &options).ok_or(LabError::SizeMismatch {
        a_width: first.width(),
        a_height: first.height(),
        b_width: second.width(),
        b_height: second.height(),
    })
}
