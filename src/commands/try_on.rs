use tryon::{TryOnResult, annotate, load_landmarks};

use crate::cli::{GlobalOptions, TryOnCommand};

use super::utils::{build_engine, derive_variant_path, file_name_label, resolve_export_path};

/// The main function to run the try-on command.
pub fn run(global: &GlobalOptions, cmd: TryOnCommand) -> TryOnResult<()> {
    let engine = build_engine(global, &cmd.strip);

    let subject = image::open(&cmd.subject)?;
    let garment = image::open(&cmd.garment)?;
    let label = cmd.garment_label.clone().or_else(|| file_name_label(&cmd.garment));
    let landmarks = match &cmd.landmarks {
        Some(path) => Some(load_landmarks(path)?),
        None => None,
    };

    let piece = engine.prepare_garment(&garment, label.as_deref())?;
    let composition = engine.render_prepared(&subject, &piece, landmarks.as_ref())?;

    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| derive_variant_path(&cmd.subject, "tryon", "png"));
    composition.save(&output_path)?;
    println!("Composite PNG saved to {}", output_path.display());

    if let Some(path) = resolve_export_path(&cmd.export_cutout, &cmd.garment, "cutout") {
        piece.save(&path)?;
        println!("Cutout PNG saved to {}", path.display());
    }

    if let Some(path) = resolve_export_path(&cmd.export_overlay, &cmd.subject, "overlay") {
        let annotated = annotate::annotate_placement(
            &subject.to_rgba8(),
            composition.landmarks(),
            composition.placement(),
        );
        annotated.save(&path)?;
        println!("Overlay PNG saved to {}", path.display());
    }

    Ok(())
}
