use crate::classify::GarmentKind;
use crate::config::PlacementTuning;
use crate::landmarks::{LandmarkSet, names};

/// An axis-aligned placement rectangle on the subject canvas.
///
/// Coordinates are already floored at zero; width and height are free to
/// overrun the canvas. Clamping against canvas bounds happens in the
/// compositor and nowhere earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// The "no placement could be determined" marker.
    pub const SENTINEL: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True for the undeterminable marker and for any other zero-area box.
    pub fn is_sentinel(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Build from f32 geometry: coordinates floored at zero, everything
    /// rounded to whole pixels.
    fn from_f32(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: x.max(0.0).round() as u32,
            y: y.max(0.0).round() as u32,
            width: width.max(0.0).round() as u32,
            height: height.max(0.0).round() as u32,
        }
    }
}

/// A placement rule, in the order the planner tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStrategy {
    /// Category geometry anchored to the landmarks that category needs.
    Anchored(GarmentKind),
    /// Generic square centered on the neck.
    NeckCentered,
}

impl PlanStrategy {
    /// Evaluate against a landmark set.
    ///
    /// `None` means the strategy's required landmarks are missing, so the
    /// next strategy should be consulted. `Some` with a zero-area box means
    /// the landmarks were present but degenerate; the chain stops there and
    /// the caller treats the result as undeterminable.
    pub fn evaluate(
        &self,
        landmarks: &LandmarkSet,
        tuning: &PlacementTuning,
    ) -> Option<BoundingBox> {
        match self {
            PlanStrategy::Anchored(GarmentKind::Top) => top_box(landmarks, tuning),
            PlanStrategy::Anchored(GarmentKind::Bottom) => bottom_box(landmarks, tuning),
            PlanStrategy::Anchored(GarmentKind::Headwear) => headwear_box(landmarks, tuning),
            PlanStrategy::NeckCentered => neck_box(landmarks, tuning),
        }
    }
}

/// The fixed degradation order for a garment kind.
pub fn strategies(kind: GarmentKind) -> [PlanStrategy; 2] {
    [PlanStrategy::Anchored(kind), PlanStrategy::NeckCentered]
}

/// Plan a placement from landmarks, degrading through the strategy list.
///
/// Returns [`BoundingBox::SENTINEL`] when no strategy has its landmarks.
pub fn plan_anatomical(
    landmarks: &LandmarkSet,
    kind: GarmentKind,
    tuning: &PlacementTuning,
) -> BoundingBox {
    strategies(kind)
        .iter()
        .find_map(|strategy| strategy.evaluate(landmarks, tuning))
        .unwrap_or(BoundingBox::SENTINEL)
}

/// Terminal placement: a square centered on the canvas, sized from the
/// smaller canvas dimension.
///
/// Used when no landmarks are available or the anatomical pass came back
/// undeterminable. Never returns the sentinel for a non-empty canvas.
pub fn plan_centered(
    canvas_width: u32,
    canvas_height: u32,
    tuning: &PlacementTuning,
) -> BoundingBox {
    let side = (canvas_width.min(canvas_height) as f32 * tuning.centered_fraction)
        .round()
        .max(1.0);
    let x = (canvas_width as f32 - side) / 2.0;
    let y = (canvas_height as f32 - side) / 2.0;
    BoundingBox::from_f32(x, y, side, side)
}

/// Tops hang from the neck and scale off the shoulder span.
fn top_box(landmarks: &LandmarkSet, tuning: &PlacementTuning) -> Option<BoundingBox> {
    let neck = landmarks.get(names::NECK)?;
    let right = landmarks.get(names::R_SHOULDER)?;
    let left = landmarks.get(names::L_SHOULDER)?;

    let span = (right.x - left.x).abs();
    let width = tuning.top_width_per_shoulder * span;
    let height = tuning.top_height_per_width * width;
    let x = (right.x + left.x) / 2.0 - width / 2.0;
    let y = neck.y - height * tuning.top_rise_above_neck;
    Some(BoundingBox::from_f32(x, y, width, height))
}

/// Bottoms start at the higher hip and scale off the hip span.
fn bottom_box(landmarks: &LandmarkSet, tuning: &PlacementTuning) -> Option<BoundingBox> {
    let right = landmarks.get(names::R_HIP)?;
    let left = landmarks.get(names::L_HIP)?;

    let span = (right.x - left.x).abs();
    let width = tuning.bottom_width_per_hip * span;
    let height = tuning.bottom_height_per_width * width;
    let x = (right.x + left.x) / 2.0 - width / 2.0;
    let y = right.y.min(left.y);
    Some(BoundingBox::from_f32(x, y, width, height))
}

/// Headwear sits above the nose with a fixed clearance, sized off the
/// body span.
fn headwear_box(landmarks: &LandmarkSet, tuning: &PlacementTuning) -> Option<BoundingBox> {
    let nose = landmarks.get(names::NOSE)?;

    let side = tuning.headwear_span_fraction * landmarks.body_span();
    let x = nose.x - side / 2.0;
    let y = nose.y - tuning.headwear_clearance - side;
    Some(BoundingBox::from_f32(x, y, side, side))
}

/// Neck-centered square, the generic answer when category anchors are
/// missing.
fn neck_box(landmarks: &LandmarkSet, tuning: &PlacementTuning) -> Option<BoundingBox> {
    let neck = landmarks.get(names::NECK)?;

    let side = tuning.neck_square_fraction * landmarks.body_span();
    let x = neck.x - side / 2.0;
    let y = neck.y - side / 2.0;
    Some(BoundingBox::from_f32(x, y, side, side))
}
