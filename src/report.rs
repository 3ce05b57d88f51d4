use tryon::TryOnError;

pub fn report_error(err: &TryOnError) {
    match err {
        TryOnError::EmptyForeground => {
            eprintln!("No foreground survived background removal.");
            eprintln!();
            eprintln!("The backdrop test may be swallowing the garment:");
            eprintln!("  - Raise --backdrop-saturation if the backdrop is tinted");
            eprintln!("  - Lower --backdrop-value if the backdrop is dim");
        }
        _ => {
            eprintln!("{err}");
        }
    }
}
