use std::fmt;

use image::RgbImage;
use image::imageops;
use imageproc::edges::canny;

/// The garment categories the placement rules know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GarmentKind {
    /// Shirts, t-shirts, blouses, jackets. Also the answer when nothing
    /// else matches.
    #[default]
    Top,
    /// Pants, jeans, trousers, skirts.
    Bottom,
    /// Hats, caps, beanies.
    Headwear,
}

impl fmt::Display for GarmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GarmentKind::Top => "top",
            GarmentKind::Bottom => "bottom",
            GarmentKind::Headwear => "headwear",
        };
        f.write_str(label)
    }
}

const HEADWEAR_KEYWORDS: [&str; 4] = ["hat", "cap", "beanie", "head"];
const TOP_KEYWORDS: [&str; 4] = ["shirt", "top", "tshirt", "blouse"];
const BOTTOM_KEYWORDS: [&str; 4] = ["pants", "jeans", "trousers", "bottom"];

/// Aspect ratio band treated as a candidate headwear shot.
const NEAR_SQUARE_MIN: f32 = 0.8;
const NEAR_SQUARE_MAX: f32 = 1.2;
/// Wider than this reads as a laid-flat top.
const WIDE_ASPECT: f32 = 1.3;
/// Taller than this reads as hanging trousers.
const TALL_ASPECT: f32 = 0.7;

const CANNY_LOW: f32 = 50.0;
const CANNY_HIGH: f32 = 150.0;

/// Decide a garment's category from its filename, else from its shape.
///
/// Filename keywords always win over the visual pass: a label carries
/// author intent, the shape heuristic only guesses. Both passes are total,
/// so classification never fails; the worst case is the [`GarmentKind::Top`]
/// default.
pub fn classify_garment(filename: Option<&str>, garment: &RgbImage) -> GarmentKind {
    match filename.and_then(kind_from_filename) {
        Some(kind) => kind,
        None => kind_from_shape(garment),
    }
}

/// Case-insensitive substring lookup, checked in headwear, top, bottom
/// order.
fn kind_from_filename(filename: &str) -> Option<GarmentKind> {
    let lower = filename.to_lowercase();
    if HEADWEAR_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(GarmentKind::Headwear);
    }
    if TOP_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(GarmentKind::Top);
    }
    if BOTTOM_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(GarmentKind::Bottom);
    }
    None
}

/// Aspect ratio heuristic, with an edge-density check for near-square
/// images. Hat photos are roughly square and concentrate their contour in
/// the crown.
fn kind_from_shape(garment: &RgbImage) -> GarmentKind {
    let (width, height) = garment.dimensions();
    if height == 0 {
        return GarmentKind::Top;
    }
    let aspect = width as f32 / height as f32;
    if (NEAR_SQUARE_MIN..=NEAR_SQUARE_MAX).contains(&aspect) && crown_heavy(garment) {
        return GarmentKind::Headwear;
    }
    if aspect > WIDE_ASPECT {
        GarmentKind::Top
    } else if aspect < TALL_ASPECT {
        GarmentKind::Bottom
    } else {
        GarmentKind::Top
    }
}

/// True when the top third of the image carries more edge pixels than the
/// middle third.
fn crown_heavy(garment: &RgbImage) -> bool {
    let (width, height) = garment.dimensions();
    let third = height / 3;
    if third == 0 {
        return false;
    }
    let edges = canny(&imageops::grayscale(garment), CANNY_LOW, CANNY_HIGH);
    let band_count = |y_start: u32, y_end: u32| -> u64 {
        let mut count = 0u64;
        for y in y_start..y_end {
            for x in 0..width {
                if edges.get_pixel(x, y)[0] > 0 {
                    count += 1;
                }
            }
        }
        count
    };
    band_count(0, third) > band_count(third, third * 2)
}
