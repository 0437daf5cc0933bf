//! Single-pass render of a source buffer through the full chain.

use std::collections::BTreeMap;
use std::time::Instant;

use super::heatmap::heat_color;
use super::options::{PipelineOptions, PreviewStage};
use crate::color::{mix_vectors, rgb_to_axes, to_rgb_unit, to_vector, Rgb};
use crate::dither::{
    apply_dither_jitter, normalize_seed, DitherKind, ErrorDiffusionContext, PatternLattice,
    ThresholdTile, DEFAULT_TILE_SIZE,
};
use crate::gamut::{fit_to_gamut, GamutTransform};
use crate::math::AxisStats;
use crate::output::PixelBuffer;
use crate::palette::{modulation_factor, ModulationOptions, PaletteUsage, ReductionPalette};
use crate::similarity::{compare, SimilarityReport};

/// Luma gradient magnitude at which edge masking saturates.
pub const EDGE_FULL_GRADIENT: f64 = 96.0;
/// Perceptual delta shown at full heat in the delta stage.
pub const DELTA_HEAT_SCALE: f64 = 0.2;

/// Everything one render produces.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub width: usize,
    pub height: usize,
    /// Requested preview stages
    pub stages: BTreeMap<PreviewStage, PixelBuffer>,
    pub usage: PaletteUsage,
    /// Source against the reduced image
    pub similarity: Option<SimilarityReport>,
    pub gamut: GamutTransform,
}

impl RenderOutput {
    pub fn stage(&self, stage: PreviewStage) -> Option<&PixelBuffer> {
        self.stages.get(&stage)
    }
}

/// Run `source` through gamma, gamut alignment, palette nudge, dithering and
/// quantization.
///
/// All state (diffusion rows, noise tile, statistics) lives for this call
/// only, so equal inputs always give equal outputs.
pub fn render(
    source: &PixelBuffer,
    palette: &ReductionPalette,
    options: &PipelineOptions,
) -> RenderOutput {
    let started = Instant::now();
    let (width, height) = (source.width(), source.height());
    let source_pixels: Vec<Rgb> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| source.get_rgb(x, y))
        .collect();

    // 1. Gamma
    let mut pixels: Vec<Rgb> = match options.effective_gamma() {
        Some(gamma) => source_pixels.iter().map(|&c| apply_gamma(c, gamma)).collect(),
        None => source_pixels.clone(),
    };

    // 2. Gamut alignment toward the palette
    let gamut = derive_gamut(&pixels, palette, options);
    if gamut.is_active || (options.gamut.enabled && options.gamut.fit) {
        for c in pixels.iter_mut() {
            let mut adjusted = gamut.apply(*c);
            if options.gamut.fit {
                adjusted = Rgb::from_unit(fit_to_gamut(adjusted.to_unit()).rgb);
            }
            *c = adjusted;
        }
    }

    // 3. Palette nudge
    let nudge = unit(options.palette_nudge);
    if nudge > 0.0 && !palette.is_empty() {
        for c in pixels.iter_mut() {
            *c = nudge_toward_palette(*c, palette, nudge);
        }
    }

    let mut buffers = StageBuffers::new(width, height, options);
    if let Some(buf) = buffers.get_mut(PreviewStage::Source) {
        fill(buf, &source_pixels);
    }
    if let Some(buf) = buffers.get_mut(PreviewStage::GamutAdjusted) {
        fill(buf, &pixels);
    }

    // 4. Dither and quantize
    let edges = edge_factors(&source_pixels, width, height, options.edge_mask);
    let reduced = dither_and_quantize(
        &pixels,
        edges.as_deref(),
        width,
        height,
        palette,
        options,
        &mut buffers,
    );

    // 5. Similarity of the result against the source
    let wants_delta = options.wants(PreviewStage::PerceptualDelta);
    let mut similarity_options = options.similarity;
    similarity_options.keep_deltas |= wants_delta;
    let reference: Vec<[f64; 3]> = source_pixels.iter().map(|c| c.to_unit()).collect();
    let test: Vec<[f64; 3]> = reduced.pixels.iter().map(|c| c.to_unit()).collect();
    let similarity = compare(&reference, &test, width, height, &similarity_options);

    if let (Some(buf), Some(deltas)) = (
        buffers.get_mut(PreviewStage::PerceptualDelta),
        similarity.as_ref().and_then(|r| r.deltas.as_ref()),
    ) {
        for (i, &d) in deltas.iter().enumerate() {
            buf.set(i % width, i / width, heat_color(d / DELTA_HEAT_SCALE));
        }
    }
    let similarity = similarity.map(|mut report| {
        if !options.similarity.keep_deltas {
            report.deltas = None;
        }
        report
    });

    tracing::debug!(
        width,
        height,
        kind = %options.dither.kind,
        gamut_active = gamut.is_active,
        colors_used = reduced.usage.used(),
        score = similarity.as_ref().map(|r| r.score),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Render finished"
    );

    RenderOutput {
        width,
        height,
        stages: buffers.stages,
        usage: reduced.usage,
        similarity,
        gamut,
    }
}

/// `255 · (c / 255)^(1 / gamma)` per channel.
pub fn apply_gamma(rgb: Rgb, gamma: f64) -> Rgb {
    let inv = 1.0 / gamma;
    let f = |c: f64| 255.0 * (c.max(0.0) / 255.0).powf(inv);
    Rgb::new(f(rgb.r), f(rgb.g), f(rgb.b))
}

/// Mix `rgb` toward its nearest palette entry by `amount`, in the palette's
/// distance space.
pub fn nudge_toward_palette(rgb: Rgb, palette: &ReductionPalette, amount: f64) -> Rgb {
    let Some(nearest) = palette.quantize(rgb) else {
        return rgb;
    };
    let space = palette.space();
    let from = to_vector(rgb.clamped().to_unit(), space);
    let to = to_vector(nearest.rgb.to_unit(), space);
    Rgb::from_unit(to_rgb_unit(&mix_vectors(&from, &to, amount)))
}

fn derive_gamut(
    pixels: &[Rgb],
    palette: &ReductionPalette,
    options: &PipelineOptions,
) -> GamutTransform {
    let space = options.gamut.space;
    if !options.gamut.enabled || palette.is_empty() {
        return GamutTransform::identity(space);
    }
    let source = AxisStats::from_samples(
        pixels
            .iter()
            .map(|c| rgb_to_axes(c.clamped().to_unit(), space))
            .collect(),
    );
    let target = AxisStats::from_samples(
        palette
            .entries()
            .iter()
            .map(|e| rgb_to_axes(e.rgb.to_unit(), space))
            .collect(),
    );
    let transform = GamutTransform::derive(&source, &target, space, &options.gamut.strengths);
    tracing::debug!(
        %space,
        source_samples = source.len(),
        palette_samples = target.len(),
        active = transform.is_active,
        "Derived gamut transform"
    );
    transform
}

/// Per-pixel strength multipliers from the Sobel gradient of source luma,
/// `None` when masking is off.
fn edge_factors(pixels: &[Rgb], width: usize, height: usize, mask: f64) -> Option<Vec<f64>> {
    let mask = unit(mask);
    if mask <= 0.0 || pixels.is_empty() {
        return None;
    }
    let luma: Vec<f64> = pixels.iter().map(|c| c.luma()).collect();
    let at = |x: isize, y: isize| {
        let xc = x.clamp(0, width as isize - 1) as usize;
        let yc = y.clamp(0, height as isize - 1) as usize;
        luma[yc * width + xc]
    };

    let mut factors = Vec::with_capacity(pixels.len());
    for y in 0..height as isize {
        for x in 0..width as isize {
            let gx = at(x + 1, y - 1) + 2.0 * at(x + 1, y) + at(x + 1, y + 1)
                - at(x - 1, y - 1)
                - 2.0 * at(x - 1, y)
                - at(x - 1, y + 1);
            let gy = at(x - 1, y + 1) + 2.0 * at(x, y + 1) + at(x + 1, y + 1)
                - at(x - 1, y - 1)
                - 2.0 * at(x, y - 1)
                - at(x + 1, y - 1);
            let grad = (gx * gx + gy * gy).sqrt();
            factors.push(1.0 - mask * (grad / EDGE_FULL_GRADIENT).min(1.0));
        }
    }
    Some(factors)
}

struct Reduced {
    pixels: Vec<Rgb>,
    usage: PaletteUsage,
}

fn dither_and_quantize(
    pixels: &[Rgb],
    edges: Option<&[f64]>,
    width: usize,
    height: usize,
    palette: &ReductionPalette,
    options: &PipelineOptions,
    buffers: &mut StageBuffers,
) -> Reduced {
    let dither = &options.dither;
    let kind = dither.kind;
    let base_strength = dither.effective_strength();
    let seed = normalize_seed(dither.seed);
    let tile = kind
        .uses_tile()
        .then(|| ThresholdTile::blue_noise(seed, DEFAULT_TILE_SIZE));
    let lattice = if kind.is_patterned() {
        PatternLattice::new(dither.pattern_rotation)
    } else {
        PatternLattice::default()
    };
    let mut diffusion = (kind == DitherKind::ErrorDiffusion)
        .then(|| ErrorDiffusionContext::new(dither.kernel.kernel(), width, height));

    let modulation = &options.modulation;
    let wants_summary = modulation.is_active()
        || buffers.wants(PreviewStage::PaletteError)
        || buffers.wants(PreviewStage::PaletteAmbiguity)
        || buffers.wants(PreviewStage::PaletteModulation);

    let mut usage = PaletteUsage::new(palette.len());
    let mut out = Vec::with_capacity(pixels.len());

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let color = pixels[i];

            let summary = if wants_summary {
                palette.summarize_distances(color)
            } else {
                None
            };
            let modulated = summary
                .as_ref()
                .map_or(1.0, |s| modulation_factor(modulation, s, palette.reference_scale()));
            let strength = base_strength * modulated * edges.map_or(1.0, |e| e[i]);

            let dithered = match diffusion.as_ref() {
                Some(ctx) => {
                    let acc = ctx.accumulated(x);
                    Rgb::new(
                        color.r + acc[0] as f64,
                        color.g + acc[1] as f64,
                        color.b + acc[2] as f64,
                    )
                }
                None => {
                    let (lx, ly) = lattice.map(x, y);
                    apply_dither_jitter(color, lx, ly, kind, strength, seed, tile.as_ref())
                }
            };

            let reduced = match palette.quantize(dithered) {
                Some(q) => {
                    usage.record(q.index);
                    q.rgb
                }
                None => dithered.clamped(),
            };

            if let Some(ctx) = diffusion.as_mut() {
                let residual = [
                    dithered.r - reduced.r,
                    dithered.g - reduced.g,
                    dithered.b - reduced.b,
                ];
                ctx.diffuse(x, residual, strength);
            }

            if let Some(buf) = buffers.get_mut(PreviewStage::Dithered) {
                buf.set(x, y, dithered.to_rgb8());
            }
            if let Some(buf) = buffers.get_mut(PreviewStage::Reduced) {
                buf.set(x, y, reduced.to_rgb8());
            }
            if let Some(s) = summary.as_ref() {
                if let Some(buf) = buffers.get_mut(PreviewStage::PaletteError) {
                    let v = ModulationOptions::error_value(s, palette.reference_scale());
                    buf.set(x, y, heat_color(v));
                }
                if let Some(buf) = buffers.get_mut(PreviewStage::PaletteAmbiguity) {
                    buf.set(x, y, heat_color(ModulationOptions::ambiguity_value(s)));
                }
                if let Some(buf) = buffers.get_mut(PreviewStage::PaletteModulation) {
                    buf.set(x, y, heat_color(modulated));
                }
            }
            out.push(reduced);
        }
        if let Some(ctx) = diffusion.as_mut() {
            ctx.advance_row();
        }
    }

    Reduced { pixels: out, usage }
}

/// Output buffers for the requested stages only.
struct StageBuffers {
    stages: BTreeMap<PreviewStage, PixelBuffer>,
}

impl StageBuffers {
    fn new(width: usize, height: usize, options: &PipelineOptions) -> Self {
        let stages = options
            .stages
            .iter()
            .map(|&stage| (stage, PixelBuffer::new(width, height)))
            .collect();
        Self { stages }
    }

    #[inline]
    fn wants(&self, stage: PreviewStage) -> bool {
        self.stages.contains_key(&stage)
    }

    #[inline]
    fn get_mut(&mut self, stage: PreviewStage) -> Option<&mut PixelBuffer> {
        self.stages.get_mut(&stage)
    }
}

fn fill(buf: &mut PixelBuffer, pixels: &[Rgb]) {
    let width = buf.width();
    for (i, c) in pixels.iter().enumerate() {
        buf.set(i % width, i / width, c.to_rgb8());
    }
}

#[inline]
fn unit(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
