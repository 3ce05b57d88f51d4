use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::classify::GarmentKind;
use crate::config::PlacementTuning;
use crate::plan::BoundingBox;

/// Resize the cutout to the planned dimensions.
///
/// Shrinking uses area averaging, enlarging uses bilinear sampling; mixed
/// cases take the bilinear path. The alpha channel is resampled together
/// with the colors, so silhouette edges stay soft after scaling.
pub fn scale_to_box(cutout: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (current_width, current_height) = cutout.dimensions();
    if width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }
    if (width, height) == (current_width, current_height) {
        return cutout.clone();
    }
    if width <= current_width && height <= current_height {
        imageops::thumbnail(cutout, width, height)
    } else {
        imageops::resize(cutout, width, height, FilterType::Triangle)
    }
}

/// Apply the per-kind minimum coverage rule after the initial fit.
///
/// A top narrower than the configured share of the canvas reads as floating
/// in space, so it is scaled up proportionally and re-centered on the
/// canvas; the vertical anchor survives. Other kinds keep their planned
/// box.
pub fn enforce_coverage(
    kind: GarmentKind,
    fitted: RgbaImage,
    planned: BoundingBox,
    canvas_width: u32,
    tuning: &PlacementTuning,
) -> (RgbaImage, BoundingBox) {
    let Some(min_fraction) = min_coverage(kind, tuning) else {
        return (fitted, planned);
    };
    let (width, height) = fitted.dimensions();
    if width == 0 || height == 0 {
        return (fitted, planned);
    }
    let min_width = (canvas_width as f32 * min_fraction).round() as u32;
    if width >= min_width {
        return (fitted, planned);
    }

    let scale = min_width as f32 / width as f32;
    let new_height = ((height as f32 * scale).round() as u32).max(1);
    let widened = scale_to_box(&fitted, min_width, new_height);
    let x = ((canvas_width as f32 - min_width as f32) / 2.0).max(0.0).round() as u32;
    (widened, BoundingBox::new(x, planned.y, min_width, new_height))
}

fn min_coverage(kind: GarmentKind, tuning: &PlacementTuning) -> Option<f32> {
    match kind {
        GarmentKind::Top => Some(tuning.top_min_coverage),
        GarmentKind::Bottom | GarmentKind::Headwear => None,
    }
}
