use std::collections::BTreeMap;
use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::TryOnResult;

/// A 2D point in subject-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Landmark names produced by pose detectors.
pub mod names {
    pub const NOSE: &str = "Nose";
    pub const NECK: &str = "Neck";
    pub const R_SHOULDER: &str = "RShoulder";
    pub const R_ELBOW: &str = "RElbow";
    pub const R_WRIST: &str = "RWrist";
    pub const L_SHOULDER: &str = "LShoulder";
    pub const L_ELBOW: &str = "LElbow";
    pub const L_WRIST: &str = "LWrist";
    pub const R_HIP: &str = "RHip";
    pub const R_KNEE: &str = "RKnee";
    pub const R_ANKLE: &str = "RAnkle";
    pub const L_HIP: &str = "LHip";
    pub const L_KNEE: &str = "LKnee";
    pub const L_ANKLE: &str = "LAnkle";
    pub const R_EYE: &str = "REye";
    pub const L_EYE: &str = "LEye";
    pub const R_EAR: &str = "REar";
    pub const L_EAR: &str = "LEar";
}

/// Landmark pairs joined when rendering a pose for inspection.
pub const SKELETON: [(&str, &str); 13] = [
    (names::NECK, names::NOSE),
    (names::NECK, names::R_SHOULDER),
    (names::R_SHOULDER, names::R_ELBOW),
    (names::R_ELBOW, names::R_WRIST),
    (names::NECK, names::L_SHOULDER),
    (names::L_SHOULDER, names::L_ELBOW),
    (names::L_ELBOW, names::L_WRIST),
    (names::NECK, names::R_HIP),
    (names::R_HIP, names::R_KNEE),
    (names::R_KNEE, names::R_ANKLE),
    (names::NECK, names::L_HIP),
    (names::L_HIP, names::L_KNEE),
    (names::L_KNEE, names::L_ANKLE),
];

/// Named anatomical points detected on a subject image.
///
/// An empty set is meaningful: it is the "no pose detected" state, distinct
/// from a populated set whose points happen to be unusable for one garment
/// category. Serializes as a flat `{"Name": {"x": .., "y": ..}}` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: BTreeMap<String, Point>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named point.
    pub fn insert(&mut self, name: impl Into<String>, point: Point) {
        self.points.insert(name.into(), point);
    }

    /// Builder-style [`LandmarkSet::insert`].
    pub fn with(mut self, name: impl Into<String>, point: Point) -> Self {
        self.insert(name, point);
        self
    }

    pub fn get(&self, name: &str) -> Option<Point> {
        self.points.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.points.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.points.iter().map(|(name, point)| (name.as_str(), *point))
    }

    /// Approximate full-body pixel span: twice the rightmost landmark x.
    ///
    /// Detectors report subjects roughly centered in frame, which makes
    /// this a usable stand-in for body width without a bounding pass.
    pub fn body_span(&self) -> f32 {
        self.points.values().map(|p| p.x).fold(0.0, f32::max) * 2.0
    }
}

impl<S: Into<String>> FromIterator<(S, Point)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (S, Point)>>(iter: I) -> Self {
        Self {
            points: iter
                .into_iter()
                .map(|(name, point)| (name.into(), point))
                .collect(),
        }
    }
}

/// Read a landmark set from a JSON file of `{"Name": {"x": .., "y": ..}}`
/// entries.
pub fn load_landmarks(path: impl AsRef<Path>) -> TryOnResult<LandmarkSet> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// A pose detector supplied by the host.
///
/// Detection runs outside this crate (a neural network, a classical
/// estimator, or a fixture in tests); the engine only consumes the result.
/// Returning `None` means no pose was found, which routes planning to the
/// centered fallback. Any closure with the matching signature qualifies.
pub trait LandmarkDetector {
    fn detect(&self, subject: &RgbaImage) -> Option<LandmarkSet>;
}

impl<F> LandmarkDetector for F
where
    F: Fn(&RgbaImage) -> Option<LandmarkSet>,
{
    fn detect(&self, subject: &RgbaImage) -> Option<LandmarkSet> {
        self(subject)
    }
}
