use std::path::{Path, PathBuf};

use dither_core::gradient::{resolve_control_points, GradientControlPoint, GradientField};
use dither_core::palette::parse_palette_text;
use dither_core::{ColorSpace, PipelineOptions, PixelBuffer, ReductionPalette, Rgb8};
use serde::{Deserialize, Serialize};

use crate::error::LabError;
use crate::image_io;

/// Palette used when a config names none.
pub const DEFAULT_PALETTE: &str = "#000000 #ffffff";

/// Lab configuration loaded from a YAML (or JSON) file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabConfig {
    #[serde(default)]
    pub palette: PaletteConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub pipeline: PipelineOptions,
}

/// Where the reduction palette comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Inline palette text
    #[serde(default)]
    pub text: Option<String>,

    /// Palette text file, relative to the config file
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Space palette distances are measured in
    #[serde(default = "default_distance_space")]
    pub space: ColorSpace,
}

fn default_distance_space() -> ColorSpace {
    ColorSpace::Oklab
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            text: None,
            file: None,
            space: default_distance_space(),
        }
    }
}

/// What gets rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SourceConfig {
    /// A PNG file, relative to the config file
    Bitmap { path: PathBuf },

    /// A gradient field interpolated from control points
    Gradient {
        points: Vec<GradientControlPoint>,
        #[serde(default = "default_gradient_space")]
        space: ColorSpace,
        #[serde(default = "default_size")]
        width: usize,
        #[serde(default = "default_size")]
        height: usize,
    },
}

fn default_gradient_space() -> ColorSpace {
    ColorSpace::Oklch
}

fn default_size() -> usize {
    256
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Gradient {
            points: vec![
                GradientControlPoint::new(Rgb8::new(0xff, 0x40, 0x20)),
                GradientControlPoint::new(Rgb8::new(0xff, 0xe0, 0x40)),
                GradientControlPoint::new(Rgb8::new(0x20, 0x60, 0xff)),
                GradientControlPoint::new(Rgb8::new(0x10, 0x10, 0x10)),
            ],
            space: default_gradient_space(),
            width: default_size(),
            height: default_size(),
        }
    }
}

impl LabConfig {
    /// Parse a config file. `.json` files are read as JSON, everything else
    /// as YAML.
    pub fn load(path: &Path) -> Result<Self, LabError> {
        let content = std::fs::read_to_string(path).map_err(|e| LabError::io(path, e))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: Self = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        tracing::info!(
            path = %path.display(),
            kind = %config.pipeline.dither.kind,
            stages = config.pipeline.stages.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, LabError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::info!("No config given, using defaults");
                Ok(Self::default())
            }
        }
    }
}

impl PaletteConfig {
    /// Palette text, from the file if it exists, else the inline text, else
    /// the default black and white.
    pub fn resolve_text(&self, base_dir: &Path) -> Result<String, LabError> {
        if let Some(file) = &self.file {
            let path = base_dir.join(file);
            match std::fs::read_to_string(&path) {
                Ok(text) => return Ok(text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::warn!(path = %path.display(), "Palette file not found, using fallback");
                }
                Err(e) => return Err(LabError::io(path, e)),
            }
        }
        Ok(self
            .text
            .clone()
            .unwrap_or_else(|| DEFAULT_PALETTE.to_string()))
    }

    /// Parse the palette. Malformed tokens fail the whole palette.
    pub fn build(&self, base_dir: &Path) -> Result<ReductionPalette, LabError> {
        let text = self.resolve_text(base_dir)?;
        let colors = parse_palette_text(&text)?.into_colors()?;
        tracing::info!(colors = colors.len(), space = %self.space, "Built palette");
        Ok(ReductionPalette::new(&colors, self.space))
    }
}

impl SourceConfig {
    /// Produce the source pixels.
    pub fn load(&self, base_dir: &Path) -> Result<PixelBuffer, LabError> {
        let buffer = match self {
            SourceConfig::Bitmap { path } => image_io::read_png(&base_dir.join(path))?,
            SourceConfig::Gradient {
                points,
                space,
                width,
                height,
            } => {
                let field = GradientField::new(&resolve_control_points(points), *space);
                field.render(*width, *height)
            }
        };
        if buffer.is_empty() {
            return Err(LabError::EmptyImage {
                width: buffer.width(),
                height: buffer.height(),
            });
        }
        Ok(buffer)
    }
}
