use tryon::{TryOnResult, classify_garment};

use crate::cli::ClassifyCommand;

use super::utils::file_name_label;

/// The main function to run the classify command.
pub fn run(cmd: ClassifyCommand) -> TryOnResult<()> {
    let garment = image::open(&cmd.input)?;
    let label = cmd.label.clone().or_else(|| file_name_label(&cmd.input));
    let kind = classify_garment(label.as_deref(), &garment.to_rgb8());
    println!("{kind}");

    Ok(())
}
