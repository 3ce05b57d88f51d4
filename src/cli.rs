use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tryon::StripOptions;

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(author, version, about, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    /// Garment opacity multiplier applied during blending (0.0-1.0)
    #[arg(long, default_value_t = 1.0)]
    pub opacity: f32,
    /// Minimum top width as a fraction of the subject width
    #[arg(long = "top-coverage", default_value_t = 0.8)]
    pub top_coverage: f32,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Composite a garment onto a subject photo
    TryOn(TryOnCommand),
    /// Remove the garment backdrop and export the RGBA cutout
    Cutout(CutoutCommand),
    /// Print the category the classifier decides on
    Classify(ClassifyCommand),
}

#[derive(Args, Debug)]
pub struct TryOnCommand {
    /// Subject photo path
    #[arg(short, long)]
    pub subject: PathBuf,
    /// Garment image path
    #[arg(short, long)]
    pub garment: PathBuf,
    /// Classification label (defaults to the garment file name)
    #[arg(long = "garment-label")]
    pub garment_label: Option<String>,
    /// Landmark JSON path ({"Neck": {"x": .., "y": ..}, ...})
    #[arg(short, long)]
    pub landmarks: Option<PathBuf>,
    /// Output path (defaults to `<subject>-tryon.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Save the garment cutout alongside the composite
    #[arg(long = "export-cutout", value_name = "PATH", num_args = 0..=1)]
    pub export_cutout: Option<Option<PathBuf>>,
    /// Save a pose and placement overlay alongside the composite
    #[arg(long = "export-overlay", value_name = "PATH", num_args = 0..=1)]
    pub export_overlay: Option<Option<PathBuf>>,
    #[command(flatten)]
    pub strip: StripArgs,
}

#[derive(Args, Debug)]
pub struct CutoutCommand {
    /// Garment image path
    pub input: PathBuf,
    /// Output path (defaults to `<name>-cutout.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub strip: StripArgs,
}

#[derive(Args, Debug)]
pub struct ClassifyCommand {
    /// Garment image path
    pub input: PathBuf,
    /// Classification label (defaults to the garment file name)
    #[arg(long)]
    pub label: Option<String>,
}

#[derive(Args, Debug)]
pub struct StripArgs {
    /// Backdrop saturation ceiling (0-255 or 0.0-1.0)
    #[arg(long = "backdrop-saturation", default_value = "30", value_parser = parse_unit_threshold)]
    pub backdrop_saturation: f32,
    /// Backdrop brightness floor (0-255 or 0.0-1.0)
    #[arg(long = "backdrop-value", default_value = "200", value_parser = parse_unit_threshold)]
    pub backdrop_value: f32,
}

impl From<&StripArgs> for StripOptions {
    fn from(args: &StripArgs) -> Self {
        Self {
            max_background_saturation: args.backdrop_saturation,
            min_background_value: args.backdrop_value,
        }
    }
}

/// Parse a threshold given on either the 0-255 byte scale or the 0.0-1.0
/// unit scale, normalizing to the unit scale. Values at 1.0 or below are
/// taken as already normalized.
fn parse_unit_threshold(value: &str) -> Result<f32, String> {
    let number = value
        .parse::<f32>()
        .map_err(|_| format!("threshold must be numeric (0-255 or 0.0-1.0), got `{value}`"))?;

    if (0.0..=1.0).contains(&number) {
        return Ok(number);
    }
    if (0.0..=255.0).contains(&number) {
        return Ok(number / 255.0);
    }
    Err(format!(
        "threshold {value} is out of range; expected 0-255 or 0.0-1.0"
    ))
}
