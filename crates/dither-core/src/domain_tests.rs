//! Domain-critical regression tests for dither-core.
//!
//! Each test names the class of bug it guards against; unit tests next to
//! the code cover the happy paths.

#[cfg(test)]
mod domain_tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::color::{coords_distance_squared, to_rgb_unit, to_vector, ColorSpace, Rgb, Rgb8};
    use crate::dither::{
        apply_dither_jitter, build_bayer_matrix, normalize_seed, DiffusionKernel, DitherKind,
        DitherOptions, ErrorDiffusionContext, ThresholdTile, DEFAULT_TILE_SIZE,
    };
    use crate::gamut::{GamutStrengths, GamutTransform};
    use crate::gradient::{resolve_control_points, GradientControlPoint, GradientField};
    use crate::math::AxisStats;
    use crate::output::PixelBuffer;
    use crate::palette::ReductionPalette;
    use crate::pipeline::{render, PipelineOptions, PreviewStage};
    use crate::similarity::{compare_buffers, SimilarityOptions};

    // ========================================================================
    // Color conversions must be exact inverses
    // ========================================================================

    /// If this breaks, a color space conversion lost information: gradients
    /// interpolated in that space drift and palette nudging snaps to the
    /// wrong color.
    #[test]
    fn test_every_space_round_trips_random_colors() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for space in ColorSpace::ALL {
            for _ in 0..1000 {
                let rgb: [f64; 3] = [rng.gen(), rng.gen(), rng.gen()];
                let back = to_rgb_unit(&to_vector(rgb, space));
                for c in 0..3 {
                    assert!(
                        (back[c] - rgb[c]).abs() < 1e-4,
                        "REGRESSION: {space} round trip {rgb:?} -> {back:?}"
                    );
                }
            }
        }
    }

    // ========================================================================
    // Ordered dither matrices
    // ========================================================================

    /// If this breaks, a Bayer matrix repeats or skips thresholds and flat
    /// areas show banding instead of an even pattern.
    #[test]
    fn test_bayer_matrices_are_permutations() {
        for n in [2usize, 4, 8, 16] {
            let mut values: Vec<u32> = build_bayer_matrix(n).into_iter().flatten().collect();
            values.sort_unstable();
            let expected: Vec<u32> = (0..(n * n) as u32).collect();
            assert_eq!(values, expected, "REGRESSION: Bayer {n}x{n} is not a permutation");
        }
    }

    // ========================================================================
    // Determinism
    // ========================================================================

    /// If this breaks, random dithers flicker between renders of the same
    /// configuration.
    #[test]
    fn test_jitter_is_reproducible_from_seed() {
        let tile = ThresholdTile::blue_noise(normalize_seed(7.0), DEFAULT_TILE_SIZE);
        let gray = Rgb::new(128.0, 128.0, 128.0);
        for kind in DitherKind::ALL {
            for (x, y) in [(0, 0), (3, 9), (-4, 17), (200, 1)] {
                let a = apply_dither_jitter(gray, x, y, kind, 0.6, 7, Some(&tile));
                let b = apply_dither_jitter(gray, x, y, kind, 0.6, 7, Some(&tile));
                assert_eq!(a, b, "REGRESSION: {kind} jitter not reproducible");
            }
        }

        let differing = (0..64)
            .filter(|&x| {
                apply_dither_jitter(gray, x, 0, DitherKind::RandomColor, 0.6, 1, None)
                    != apply_dither_jitter(gray, x, 0, DitherKind::RandomColor, 0.6, 2, None)
            })
            .count();
        assert!(differing > 48, "REGRESSION: seed has no effect on noise");
    }

    /// If this breaks, some render state leaks between calls (a shared
    /// diffusion buffer, a cached tile) and equal inputs give different
    /// images.
    #[test]
    fn test_render_is_deterministic() {
        let source = PixelBuffer::from_fn(24, 16, |x, y| {
            Rgb8::new((x * 10) as u8, (y * 15) as u8, ((x + y) * 5) as u8)
        });
        let palette = ReductionPalette::new(
            &[
                Rgb8::new(0, 0, 0),
                Rgb8::new(255, 255, 255),
                Rgb8::new(200, 30, 30),
                Rgb8::new(30, 60, 200),
            ],
            ColorSpace::Oklab,
        );
        for kind in [DitherKind::ErrorDiffusion, DitherKind::BlueNoise, DitherKind::RandomRgb] {
            let mut options = PipelineOptions {
                dither: DitherOptions::new()
                    .kind(kind)
                    .strength(0.7)
                    .seed(11.0)
                    .kernel(DiffusionKernel::Atkinson),
                stages: PreviewStage::ALL.to_vec(),
                ..Default::default()
            };
            options.gamut.enabled = true;
            let a = render(&source, &palette, &options);
            let b = render(&source, &palette, &options);
            assert_eq!(a.stages, b.stages, "REGRESSION: {kind} render not deterministic");
            assert_eq!(a.usage, b.usage);
            assert_eq!(a.similarity, b.similarity);
        }
    }

    /// If this breaks, a preview stage is allocated with the wrong size and
    /// writing it out corrupts or truncates the image.
    #[test]
    fn test_every_stage_matches_source_size() {
        let source = PixelBuffer::from_fn(13, 7, |x, _| Rgb8::new((x * 19) as u8, 80, 40));
        let palette = ReductionPalette::new(
            &[Rgb8::new(0, 0, 0), Rgb8::new(255, 255, 255)],
            ColorSpace::Lab,
        );
        let options = PipelineOptions {
            stages: PreviewStage::ALL.to_vec(),
            edge_mask: 0.5,
            ..Default::default()
        };
        let out = render(&source, &palette, &options);
        assert_eq!(out.stages.len(), PreviewStage::ALL.len());
        for (stage, buf) in &out.stages {
            assert_eq!((buf.width(), buf.height()), (13, 7), "stage {stage}");
        }
    }

    // ========================================================================
    // Error diffusion energy
    // ========================================================================

    /// If this breaks, a kernel's weights or divisor are wrong and error
    /// diffusion brightens or darkens the whole image.
    #[test]
    fn test_interior_diffusion_conserves_weighted_error() {
        let residual = [40.0, -20.0, 10.0];
        for id in DiffusionKernel::ALL {
            let kernel = id.kernel();
            let mut ctx = ErrorDiffusionContext::new(kernel, 16, 16);
            ctx.advance_row();
            ctx.diffuse(8, residual, 1.0);
            let share = kernel.weight_sum() as f64 / kernel.divisor as f64;
            let total = ctx.pending_total();
            for c in 0..3 {
                assert!(
                    (total[c] - residual[c] * share).abs() < 1e-3,
                    "REGRESSION: {id} diffused {} instead of {}",
                    total[c],
                    residual[c] * share
                );
            }
        }
    }

    // ========================================================================
    // Gamut transform
    // ========================================================================

    /// If this breaks, a palette that already matches the source still
    /// shifts colors.
    #[test]
    fn test_matching_distributions_give_identity_transform() {
        let mut rng = StdRng::seed_from_u64(3);
        let samples: Vec<[f64; 3]> = (0..200).map(|_| [rng.gen(), rng.gen(), rng.gen()]).collect();
        let stats = AxisStats::from_samples(samples);
        let transform =
            GamutTransform::derive(&stats, &stats, ColorSpace::Oklab, &GamutStrengths::default());
        assert!(!transform.is_active, "REGRESSION: {transform:?}");

        let zero = GamutStrengths {
            overall: 0.0,
            ..Default::default()
        };
        let shifted = AxisStats::from_samples(vec![[0.1, 0.2, 0.3], [0.9, 0.1, 0.5], [0.4, 0.4, 0.4]]);
        assert!(!GamutTransform::derive(&stats, &shifted, ColorSpace::Oklab, &zero).is_active);
    }

    // ========================================================================
    // Quantization
    // ========================================================================

    /// If this breaks, quantization picked something other than the first
    /// closest entry, which changes which of two equal entries gets used.
    #[test]
    fn test_quantize_returns_first_nearest_entry() {
        let mut rng = StdRng::seed_from_u64(99);
        let colors: Vec<Rgb8> = (0..12)
            .map(|_| Rgb8::new(rng.gen(), rng.gen(), rng.gen()))
            .chain([Rgb8::new(0, 0, 0), Rgb8::new(0, 0, 0)])
            .collect();
        for space in [ColorSpace::Oklab, ColorSpace::Lab, ColorSpace::WeightedRgb] {
            let palette = ReductionPalette::new(&colors, space);
            for _ in 0..500 {
                let rgb = Rgb::new(
                    rng.gen_range(0.0..255.0),
                    rng.gen_range(0.0..255.0),
                    rng.gen_range(0.0..255.0),
                );
                let coords = palette.coords_of(rgb);
                let mut expected = 0;
                let mut best = f64::INFINITY;
                for (i, e) in palette.entries().iter().enumerate() {
                    let d = coords_distance_squared(&coords, &e.coords);
                    if d < best {
                        best = d;
                        expected = i;
                    }
                }
                assert_eq!(palette.quantize(rgb).map(|q| q.index), Some(expected));
            }
            // The duplicated black resolves to its first occurrence
            assert_eq!(palette.quantize(Rgb::new(0.0, 0.0, 0.0)).map(|q| q.index), Some(12));
        }
    }

    // ========================================================================
    // Similarity metric
    // ========================================================================

    fn full_range_ramp(size: usize) -> PixelBuffer {
        let max = size - 1;
        PixelBuffer::from_fn(size, size, |x, y| {
            Rgb8::new(
                (x * 255 / max) as u8,
                (y * 255 / max) as u8,
                ((x + y) * 255 / (2 * max)) as u8,
            )
        })
    }

    /// If this breaks, comparing an image with itself no longer reports a
    /// perfect match.
    #[test]
    fn test_identical_content_scores_100() {
        let image = full_range_ramp(200);
        let report = compare_buffers(&image, &image, &SimilarityOptions::default()).unwrap();
        assert_eq!(report.mean_delta, 0.0);
        assert_eq!(report.score, 100.0);
    }

    /// If this breaks, a channel inversion no longer lands at the low end of
    /// the score range. Over full-range content the mean OKLab delta is
    /// about 0.18, which the score curve maps to about 22.
    #[test]
    fn test_inverted_channel_scores_low() {
        let image = full_range_ramp(200);
        let inverted = PixelBuffer::from_fn(200, 200, |x, y| {
            let c = image.get(x, y);
            Rgb8::new(255 - c.r, c.g, c.b)
        });
        let report = compare_buffers(&image, &inverted, &SimilarityOptions::default()).unwrap();
        assert!(report.mean_delta > 0.15, "REGRESSION: mean delta {}", report.mean_delta);
        assert!(
            report.score > 15.0 && report.score < 25.0,
            "REGRESSION: score {}",
            report.score
        );
    }

    /// If this breaks, the score no longer bottoms out for opposite images.
    #[test]
    fn test_black_against_white_scores_near_zero() {
        let black = PixelBuffer::from_fn(10, 10, |_, _| Rgb8::new(0, 0, 0));
        let white = PixelBuffer::from_fn(10, 10, |_, _| Rgb8::new(255, 255, 255));
        let opposite = compare_buffers(&black, &white, &SimilarityOptions::default()).unwrap();
        assert!(opposite.score < 5.0, "REGRESSION: score {}", opposite.score);
    }

    // ========================================================================
    // Gradient field
    // ========================================================================

    /// If this breaks, control points no longer show their own color and the
    /// gradient drifts at the anchors.
    #[test]
    fn test_gradient_hits_control_points_exactly() {
        let points = resolve_control_points(&[
            GradientControlPoint::at(Rgb8::new(250, 10, 10), 0.2, 0.3),
            GradientControlPoint::at(Rgb8::new(10, 250, 10), 0.8, 0.3),
            GradientControlPoint::at(Rgb8::new(10, 10, 250), 0.5, 0.9),
        ]);
        for space in ColorSpace::ALL {
            let field = GradientField::new(&points, space);
            assert_eq!(field.sample(0.2, 0.3), Rgb::new(250.0, 10.0, 10.0));
            assert_eq!(field.sample(0.5, 0.9), Rgb::new(10.0, 10.0, 250.0));
        }
    }
}
