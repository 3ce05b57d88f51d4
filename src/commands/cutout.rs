use tryon::{StripOptions, TryOnResult, strip::strip_background};

use crate::cli::CutoutCommand;

use super::utils::derive_variant_path;

/// The main function to run the cutout command.
///
/// Unlike the try-on pipeline this surfaces a stripping failure instead of
/// falling back to the uncut garment; an empty cutout is useless on its
/// own.
pub fn run(cmd: CutoutCommand) -> TryOnResult<()> {
    let garment = image::open(&cmd.input)?;
    let options: StripOptions = (&cmd.strip).into();
    let cutout = strip_background(&garment.to_rgb8(), &options)?;

    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| derive_variant_path(&cmd.input, "cutout", "png"));
    cutout.save(&output_path)?;
    println!("Cutout PNG saved to {}", output_path.display());

    Ok(())
}
