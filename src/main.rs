//! `imgbatch` CLI - augment image folders and build contact sheets.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ndarray::{Array3, ArrayD};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgbatch::image::{image_to_array, list_images, load_image, save_image, save_image_grid};
use imgbatch::image::{ImageData, DEFAULT_GRID_SIZE};
use imgbatch::{AugmentConfig, Augmenter, Jitter};

/// Augment image folders and build contact sheets.
#[derive(Parser, Debug)]
#[command(name = "imgbatch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Augment every image in a directory and write the results to another.
    Augment(AugmentArgs),

    /// Lay out every image in a directory on a square contact sheet.
    Grid(GridArgs),
}

#[derive(Args, Debug)]
struct AugmentArgs {
    /// Directory to read images from.
    #[arg(value_name = "INPUT_DIR")]
    input: PathBuf,

    /// Directory to write augmented images to.
    #[arg(value_name = "OUTPUT_DIR")]
    output: PathBuf,

    /// Letterbox to this width (requires --height).
    #[arg(long, requires = "height", value_name = "PX")]
    width: Option<u32>,

    /// Letterbox to this height (requires --width).
    #[arg(long, requires = "width", value_name = "PX")]
    height: Option<u32>,

    /// Maximum rotation in degrees, sampled from [-DEG, DEG].
    #[arg(long, value_name = "DEG")]
    rotate: Option<f32>,

    /// Mirror images left-right.
    #[arg(long)]
    flip_horizontal: bool,

    /// Mirror images top-bottom.
    #[arg(long)]
    flip_vertical: bool,

    /// Maximum perspective zoom inset in pixels, sampled from [F/2, F].
    #[arg(long, value_name = "F")]
    zoom: Option<f32>,

    /// Load images as single-channel grayscale.
    #[arg(long)]
    grayscale: bool,

    /// Random seed for reproducibility.
    #[arg(long, value_name = "INT")]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct GridArgs {
    /// Directory to read images from.
    #[arg(value_name = "INPUT_DIR")]
    input: PathBuf,

    /// Output image path (.png appended when it has no extension).
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Side length of the square sheet in pixels.
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE, value_name = "PX")]
    size: u32,

    /// Load images as single-channel grayscale.
    #[arg(long)]
    grayscale: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("imgbatch={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let result = match &cli.command {
        Command::Augment(args) => augment(args),
        Command::Grid(args) => grid(args),
    };

    if let Err(err) = result {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn augment(args: &AugmentArgs) -> Result<()> {
    let paths = list_images(&args.input)
        .with_context(|| format!("Failed to list {}", args.input.display()))?;

    let images = paths
        .iter()
        .map(|path| load_image(path, args.grayscale))
        .collect::<imgbatch::Result<Vec<_>>>()
        .context("Failed to load images")?;

    let config = AugmentConfig {
        resize: args.width.zip(args.height),
        rotate: args.rotate.map(Jitter::Scalar),
        flip_horizontal: args.flip_horizontal,
        flip_vertical: args.flip_vertical,
        zoom: args.zoom.map(Jitter::Scalar),
        seed: args.seed,
    };

    let mut augmenter = Augmenter::new(config).context("Invalid augmentation options")?;
    let augmented = augmenter.apply(&images).context("Failed to augment images")?;

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    for (path, img) in paths.iter().zip(augmented) {
        let target = args.output.join(file_name(path)?);
        save_image(&target, &ImageData::Image(img))
            .with_context(|| format!("Failed to save {}", target.display()))?;
    }

    println!(
        "Augmented {} images from {} -> {}",
        paths.len(),
        args.input.display(),
        args.output.display()
    );

    Ok(())
}

fn grid(args: &GridArgs) -> Result<()> {
    let paths = list_images(&args.input)
        .with_context(|| format!("Failed to list {}", args.input.display()))?;

    let arrays = paths
        .iter()
        .map(|path| {
            let img = load_image(path, args.grayscale)?;
            image_to_array(&img).map(Array3::into_dyn)
        })
        .collect::<imgbatch::Result<Vec<ArrayD<u8>>>>()
        .context("Failed to load images")?;

    let written = save_image_grid(&args.output, &arrays, args.size)
        .context("Failed to write contact sheet")?;

    println!("Wrote {} images to {}", arrays.len(), written.display());

    Ok(())
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr> {
    path.file_name()
        .with_context(|| format!("No file name in {}", path.display()))
}
