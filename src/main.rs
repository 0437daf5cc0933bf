use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ditherlab::commands::{format_palette, run_compare, run_palette, run_render};
use ditherlab::config::LabConfig;
use dither_core::similarity::SimilaritySpace;
use dither_core::ColorSpace;

#[derive(Parser)]
#[command(name = "ditherlab")]
#[command(about = "Ditherlab - gradient and bitmap dithering / palette reduction laboratory")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a source through the pipeline and write the preview stages
    Render {
        /// Lab config (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// PNG to use instead of the configured source
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory for the stage images
        #[arg(short, long, default_value = "out")]
        out_dir: PathBuf,
    },
    /// Parse a palette text file and list its colors
    Palette {
        /// Palette text file
        file: PathBuf,
    },
    /// Perceptual similarity of two PNG files
    Compare {
        a: PathBuf,
        b: PathBuf,

        /// Blur radius in pixels
        #[arg(short, long, default_value_t = 1.5)]
        radius: f64,

        /// Use CIE Lab instead of OKLab for the per-pixel delta
        #[arg(long)]
        lab: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI, on stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ditherlab=info,dither_core=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Render {
            config,
            input,
            out_dir,
        }) => run_render_command(config.as_deref(), input.as_deref(), &out_dir),
        Some(Commands::Palette { file }) => {
            let parsed = run_palette(&file)?;
            println!("{}", format_palette(&parsed));
            if !parsed.errors.is_empty() {
                anyhow::bail!("{} malformed palette token(s)", parsed.errors.len());
            }
            Ok(())
        }
        Some(Commands::Compare { a, b, radius, lab }) => {
            let space = if lab {
                SimilaritySpace::Lab
            } else {
                SimilaritySpace::Oklab
            };
            let report = run_compare(&a, &b, radius, space)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn run_render_command(
    config_path: Option<&Path>,
    input: Option<&Path>,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let config = LabConfig::load_or_default(config_path)?;
    let base_dir = config_path
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    let summary = run_render(&config, base_dir, input, out_dir)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_status_command() {
    println!("ditherlab {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Color spaces: {}", ColorSpace::ALL.map(|s| s.name()).join(", "));
    println!();
    println!("Commands: render, palette, compare (see --help)");
}
