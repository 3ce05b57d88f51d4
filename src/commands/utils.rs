use std::path::{Path, PathBuf};

use tryon::{CompositeOptions, PlacementTuning, TryOn};

use crate::cli::{GlobalOptions, StripArgs};

/// The convenience function to build a TryOn engine from the global and
/// strip options.
pub fn build_engine(global: &GlobalOptions, strip: &StripArgs) -> TryOn {
    let tuning = PlacementTuning {
        top_min_coverage: global.top_coverage,
        ..PlacementTuning::default()
    };
    TryOn::new()
        .with_strip_options(strip.into())
        .with_tuning(tuning)
        .with_composite_options(CompositeOptions {
            opacity: global.opacity,
        })
}

/// Derive a variant file path by appending a suffix before the extension.
pub fn derive_variant_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let mut derived = input.to_path_buf();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| suffix.to_string());
    let filename = format!("{}-{}.{}", stem, suffix, extension);
    derived.set_file_name(filename);
    derived
}

/// Resolve an `--export-*` flag into a concrete path, deriving one from
/// the input when the flag was given without a value.
pub fn resolve_export_path(
    flag: &Option<Option<PathBuf>>,
    input: &Path,
    suffix: &str,
) -> Option<PathBuf> {
    match flag {
        Some(Some(path)) => Some(path.clone()),
        Some(None) => Some(derive_variant_path(input, suffix, "png")),
        None => None,
    }
}

/// The file name of a path as an owned string, for classification labels.
pub fn file_name_label(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}
