/// Thresholds for the backdrop test used by background stripping.
///
/// A pixel counts as backdrop when its saturation is at most
/// `max_background_saturation` and its value is at least
/// `min_background_value`, both on a 0.0 to 1.0 scale. The defaults match
/// studio product shots: near-white, washed-out backgrounds.
#[derive(Debug, Clone)]
pub struct StripOptions {
    pub max_background_saturation: f32,
    pub min_background_value: f32,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            max_background_saturation: 30.0 / 255.0,
            min_background_value: 200.0 / 255.0,
        }
    }
}

/// Ratios that control where a garment lands and how large it is drawn.
///
/// The defaults reproduce the stock layout rules; all of them are knobs
/// rather than constants, so a host can reshape placement without touching
/// the planner.
#[derive(Debug, Clone)]
pub struct PlacementTuning {
    /// Top width as a multiple of the shoulder span.
    pub top_width_per_shoulder: f32,
    /// Top height as a multiple of its own width.
    pub top_height_per_width: f32,
    /// Fraction of a top's height that rises above the neck point.
    pub top_rise_above_neck: f32,
    /// Bottom width as a multiple of the hip span.
    pub bottom_width_per_hip: f32,
    /// Bottom height as a multiple of its own width.
    pub bottom_height_per_width: f32,
    /// Headwear side length as a fraction of the body span.
    pub headwear_span_fraction: f32,
    /// Vertical gap in pixels between the headwear bottom edge and the nose.
    pub headwear_clearance: f32,
    /// Neck-centered fallback square side as a fraction of the body span.
    pub neck_square_fraction: f32,
    /// Centered fallback side as a fraction of the canvas's smaller dimension.
    pub centered_fraction: f32,
    /// Minimum top width as a fraction of the canvas width.
    pub top_min_coverage: f32,
}

impl Default for PlacementTuning {
    fn default() -> Self {
        Self {
            top_width_per_shoulder: 1.8,
            top_height_per_width: 1.2,
            top_rise_above_neck: 1.0 / 3.0,
            bottom_width_per_hip: 1.6,
            bottom_height_per_width: 0.8,
            headwear_span_fraction: 0.3,
            headwear_clearance: 40.0,
            neck_square_fraction: 0.4,
            centered_fraction: 1.0 / 3.0,
            top_min_coverage: 0.8,
        }
    }
}

/// Options for the final blend of the garment onto the subject.
#[derive(Debug, Clone)]
pub struct CompositeOptions {
    /// Opacity multiplier applied to the garment's alpha channel,
    /// clamped to 0.0 through 1.0 at blend time.
    pub opacity: f32,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self { opacity: 1.0 }
    }
}
