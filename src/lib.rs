pub mod annotate;
pub mod classify;
pub mod config;
pub mod error;
pub mod fit;
pub mod landmarks;
pub mod overlay;
pub mod plan;
pub mod strip;

pub use classify::{GarmentKind, classify_garment};
pub use config::{CompositeOptions, PlacementTuning, StripOptions};
pub use error::{TryOnError, TryOnResult};
pub use landmarks::{LandmarkDetector, LandmarkSet, Point, load_landmarks};
pub use plan::BoundingBox;

use std::path::Path;

use image::{DynamicImage, RgbaImage};
use log::{debug, info, warn};

/// Entry point for configuring and running garment composition.
#[derive(Debug, Clone, Default)]
pub struct TryOn {
    strip: StripOptions,
    tuning: PlacementTuning,
    composite: CompositeOptions,
}

impl TryOn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backdrop thresholds used by background stripping.
    pub fn with_strip_options(mut self, options: StripOptions) -> Self {
        self.strip = options;
        self
    }

    /// Set the placement ratios used by the planner.
    pub fn with_tuning(mut self, tuning: PlacementTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Set the blending options used by the compositor.
    pub fn with_composite_options(mut self, options: CompositeOptions) -> Self {
        self.composite = options;
        self
    }

    /// Get a reference to the placement ratios.
    pub fn tuning(&self) -> &PlacementTuning {
        &self.tuning
    }

    /// Classify a garment and cut it out of its backdrop.
    ///
    /// This is the per-garment half of the pipeline; the returned piece is
    /// reusable across any number of subjects. When background removal
    /// keeps nothing the uncut garment is used as-is, flagged on the piece.
    pub fn prepare_garment(
        &self,
        garment: &DynamicImage,
        filename: Option<&str>,
    ) -> TryOnResult<GarmentPiece> {
        let rgb = garment.to_rgb8();
        ensure_nonzero("garment", rgb.width(), rgb.height())?;

        let kind = classify_garment(filename, &rgb);
        info!("garment classified as {kind}");

        let (cutout, stripped) = match strip::strip_background(&rgb, &self.strip) {
            Ok(cutout) => (cutout, true),
            Err(TryOnError::EmptyForeground) => {
                warn!("background removal kept nothing, using the uncut garment");
                (strip::opaque_cutout(&rgb), false)
            }
            Err(other) => return Err(other),
        };

        Ok(GarmentPiece {
            kind,
            cutout,
            stripped,
        })
    }

    /// One-call pipeline: classify, strip, plan, fit, and blend.
    pub fn compose(
        &self,
        subject: &DynamicImage,
        garment: &DynamicImage,
        garment_filename: Option<&str>,
        landmarks: Option<&LandmarkSet>,
    ) -> TryOnResult<RgbaImage> {
        let piece = self.prepare_garment(garment, garment_filename)?;
        Ok(self.render_prepared(subject, &piece, landmarks)?.into_canvas())
    }

    /// Like [`TryOn::compose`] with a garment that was already prepared.
    pub fn compose_prepared(
        &self,
        subject: &DynamicImage,
        piece: &GarmentPiece,
        landmarks: Option<&LandmarkSet>,
    ) -> TryOnResult<RgbaImage> {
        Ok(self.render_prepared(subject, piece, landmarks)?.into_canvas())
    }

    /// Like [`TryOn::compose`], asking an injected detector for the pose.
    pub fn compose_with_detector<D>(
        &self,
        subject: &DynamicImage,
        garment: &DynamicImage,
        garment_filename: Option<&str>,
        detector: &D,
    ) -> TryOnResult<RgbaImage>
    where
        D: LandmarkDetector + ?Sized,
    {
        let piece = self.prepare_garment(garment, garment_filename)?;
        Ok(self.render_with_detector(subject, &piece, detector)?.into_canvas())
    }

    /// Compose a prepared garment onto a subject, keeping the intermediate
    /// artifacts for inspection.
    pub fn render_prepared(
        &self,
        subject: &DynamicImage,
        piece: &GarmentPiece,
        landmarks: Option<&LandmarkSet>,
    ) -> TryOnResult<Composition> {
        let canvas = subject.to_rgba8();
        ensure_nonzero("subject", canvas.width(), canvas.height())?;
        Ok(self.render_on(canvas, piece, landmarks.cloned()))
    }

    /// [`TryOn::render_prepared`] with the pose supplied by a detector.
    pub fn render_with_detector<D>(
        &self,
        subject: &DynamicImage,
        piece: &GarmentPiece,
        detector: &D,
    ) -> TryOnResult<Composition>
    where
        D: LandmarkDetector + ?Sized,
    {
        let canvas = subject.to_rgba8();
        ensure_nonzero("subject", canvas.width(), canvas.height())?;
        let landmarks = detector.detect(&canvas);
        if landmarks.is_none() {
            info!("detector found no pose");
        }
        Ok(self.render_on(canvas, piece, landmarks))
    }

    fn render_on(
        &self,
        canvas: RgbaImage,
        piece: &GarmentPiece,
        landmarks: Option<LandmarkSet>,
    ) -> Composition {
        let placement = self.place(&canvas, piece.kind, landmarks.as_ref());
        let fitted = fit::scale_to_box(&piece.cutout, placement.width, placement.height);
        let (fitted, placement) =
            fit::enforce_coverage(piece.kind, fitted, placement, canvas.width(), &self.tuning);
        debug!(
            "placing {} at ({}, {}) sized {}x{}",
            piece.kind, placement.x, placement.y, placement.width, placement.height
        );
        let canvas =
            overlay::overlay_cutout(&canvas, &fitted, placement.x, placement.y, &self.composite);
        Composition {
            canvas,
            placement,
            kind: piece.kind,
            landmarks,
        }
    }

    /// Pick the placement box: anatomical strategies while landmarks allow,
    /// the centered fallback when they do not.
    fn place(
        &self,
        canvas: &RgbaImage,
        kind: GarmentKind,
        landmarks: Option<&LandmarkSet>,
    ) -> BoundingBox {
        if let Some(set) = landmarks {
            if set.is_empty() {
                warn!("empty landmark set, centering instead");
            } else {
                let planned = plan::plan_anatomical(set, kind, &self.tuning);
                if !planned.is_sentinel() {
                    return planned;
                }
                warn!("landmarks unusable for {kind}, centering instead");
            }
        }
        plan::plan_centered(canvas.width(), canvas.height(), &self.tuning)
    }
}

fn ensure_nonzero(role: &'static str, width: u32, height: u32) -> TryOnResult<()> {
    if width == 0 || height == 0 {
        return Err(TryOnError::EmptyImage {
            role,
            width,
            height,
        });
    }
    Ok(())
}

/// A garment prepared for composition: classified and cut out of its
/// backdrop.
#[derive(Debug, Clone)]
pub struct GarmentPiece {
    kind: GarmentKind,
    cutout: RgbaImage,
    stripped: bool,
}

impl GarmentPiece {
    /// The category the classifier decided on.
    pub fn kind(&self) -> GarmentKind {
        self.kind
    }

    /// Get a reference to the RGBA cutout.
    pub fn cutout(&self) -> &RgbaImage {
        &self.cutout
    }

    /// Consume the piece and return the RGBA cutout.
    pub fn into_cutout(self) -> RgbaImage {
        self.cutout
    }

    /// False when background removal kept nothing and the opaque original
    /// is standing in for the cutout.
    pub fn is_stripped(&self) -> bool {
        self.stripped
    }

    /// Save the RGBA cutout to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> TryOnResult<()> {
        self.cutout.save(path)?;
        Ok(())
    }
}

/// Result of composing one garment onto one subject, with the artifacts
/// that produced it.
#[derive(Debug, Clone)]
pub struct Composition {
    canvas: RgbaImage,
    placement: BoundingBox,
    kind: GarmentKind,
    landmarks: Option<LandmarkSet>,
}

impl Composition {
    /// Get a reference to the composited canvas.
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Consume the composition and return the canvas.
    pub fn into_canvas(self) -> RgbaImage {
        self.canvas
    }

    /// The final placement box, after any coverage adjustment.
    pub fn placement(&self) -> BoundingBox {
        self.placement
    }

    /// The category the garment was composed as.
    pub fn kind(&self) -> GarmentKind {
        self.kind
    }

    /// The landmarks that drove placement, if any were supplied or found.
    pub fn landmarks(&self) -> Option<&LandmarkSet> {
        self.landmarks.as_ref()
    }

    /// Save the composited canvas to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> TryOnResult<()> {
        self.canvas.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::names;
    use image::{Rgb, RgbImage, Rgba};

    fn subject(w: u32, h: u32, color: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(color)))
    }

    /// White-backed garment with a centered solid block.
    fn garment_shot(size: u32, inset: u32, color: [u8; 3]) -> DynamicImage {
        let mut img = RgbImage::from_pixel(size, size, Rgb([255, 255, 255]));
        for y in inset..size - inset {
            for x in inset..size - inset {
                img.put_pixel(x, y, Rgb(color));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    fn torso() -> LandmarkSet {
        LandmarkSet::new()
            .with(names::NECK, Point::new(50.0, 20.0))
            .with(names::R_SHOULDER, Point::new(30.0, 30.0))
            .with(names::L_SHOULDER, Point::new(70.0, 30.0))
    }

    fn reddish(px: &Rgba<u8>) -> bool {
        px[0] > 200 && px[1] < 60 && px[2] < 60 && px[3] == 255
    }

    mod prepare_garment {
        use super::*;

        #[test]
        fn classifies_and_strips() {
            let piece = TryOn::new()
                .prepare_garment(&garment_shot(40, 10, [255, 0, 0]), Some("tshirt.png"))
                .unwrap();
            assert_eq!(piece.kind(), GarmentKind::Top);
            assert!(piece.is_stripped());
            assert_eq!(piece.cutout().get_pixel(20, 20), &Rgba([255, 0, 0, 255]));
            assert_eq!(piece.cutout().get_pixel(0, 0)[3], 0);
        }

        #[test]
        fn failed_strip_falls_back_to_the_opaque_original() {
            let blank = DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 20, Rgb([255, 255, 255])));
            let piece = TryOn::new().prepare_garment(&blank, Some("tshirt.png")).unwrap();
            assert!(!piece.is_stripped());
            assert!(piece.cutout().pixels().all(|p| p[3] == 255));
        }

        #[test]
        fn zero_area_garment_is_rejected() {
            let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
            let err = TryOn::new().prepare_garment(&empty, None).unwrap_err();
            assert!(matches!(err, TryOnError::EmptyImage { role: "garment", .. }));
        }
    }

    mod compose {
        use super::*;

        #[test]
        fn anatomical_top_lands_on_the_shoulders() {
            let result = TryOn::new()
                .compose(
                    &subject(100, 100, [0, 0, 255, 255]),
                    &garment_shot(40, 10, [255, 0, 0]),
                    Some("tshirt.png"),
                    Some(&torso()),
                )
                .unwrap();

            assert_eq!(result.dimensions(), (100, 100));
            // deep inside the planned box the shirt is solid red
            assert!(reddish(result.get_pixel(50, 48)));
            // corners outside the box keep the subject
            assert_eq!(result.get_pixel(1, 98).0, [0, 0, 255, 255]);
            assert_eq!(result.get_pixel(98, 98).0, [0, 0, 255, 255]);
        }

        #[test]
        fn no_landmarks_centers_the_garment() {
            let result = TryOn::new()
                .compose(
                    &subject(90, 90, [0, 128, 0, 255]),
                    &garment_shot(24, 4, [255, 0, 0]),
                    Some("cap.png"),
                    None,
                )
                .unwrap();

            // centered box is (30, 30, 30, 30); its middle is garment
            assert!(reddish(result.get_pixel(45, 45)));
            assert_eq!(result.get_pixel(5, 5).0, [0, 128, 0, 255]);
        }

        #[test]
        fn empty_landmark_set_behaves_like_none() {
            let engine = TryOn::new();
            let canvas = subject(90, 90, [0, 128, 0, 255]);
            let garment = garment_shot(24, 4, [255, 0, 0]);

            let with_empty = engine
                .compose(&canvas, &garment, Some("cap.png"), Some(&LandmarkSet::new()))
                .unwrap();
            let with_none = engine.compose(&canvas, &garment, Some("cap.png"), None).unwrap();
            assert_eq!(with_empty.as_raw(), with_none.as_raw());
        }

        #[test]
        fn unusable_landmarks_degrade_to_the_center() {
            // ankles say nothing about where a top goes
            let set = LandmarkSet::new().with(names::R_ANKLE, Point::new(45.0, 80.0));
            let engine = TryOn::new();
            let canvas = subject(90, 90, [0, 128, 0, 255]);
            let garment = garment_shot(24, 4, [255, 0, 0]);

            let degraded = engine
                .compose(&canvas, &garment, Some("cap.png"), Some(&set))
                .unwrap();
            let centered = engine.compose(&canvas, &garment, Some("cap.png"), None).unwrap();
            assert_eq!(degraded.as_raw(), centered.as_raw());
        }

        #[test]
        fn unstrippable_garment_is_pasted_whole() {
            let blank = DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 20, Rgb([255, 255, 255])));
            let result = TryOn::new()
                .compose(&subject(60, 60, [40, 40, 40, 255]), &blank, None, None)
                .unwrap();

            // the shape pass calls it a top, so the centered 20px box is
            // widened to the 48px minimum spanning x 6..54
            assert_eq!(result.get_pixel(30, 30).0, [255, 255, 255, 255]);
            assert_eq!(result.get_pixel(5, 5).0, [40, 40, 40, 255]);
        }

        #[test]
        fn zero_area_subject_is_rejected() {
            let err = TryOn::new()
                .compose(
                    &DynamicImage::ImageRgba8(RgbaImage::new(0, 5)),
                    &garment_shot(24, 4, [255, 0, 0]),
                    None,
                    None,
                )
                .unwrap_err();
            assert!(matches!(err, TryOnError::EmptyImage { role: "subject", .. }));
        }
    }

    mod compose_with_detector {
        use super::*;
        use std::cell::Cell;

        #[test]
        fn detector_output_matches_explicit_landmarks() {
            let engine = TryOn::new();
            let canvas = subject(100, 100, [0, 0, 255, 255]);
            let garment = garment_shot(40, 10, [255, 0, 0]);

            let calls = Cell::new(0u32);
            let detector = |_: &RgbaImage| {
                calls.set(calls.get() + 1);
                Some(torso())
            };

            let detected = engine
                .compose_with_detector(&canvas, &garment, Some("tshirt.png"), &detector)
                .unwrap();
            let explicit = engine
                .compose(&canvas, &garment, Some("tshirt.png"), Some(&torso()))
                .unwrap();

            assert_eq!(calls.get(), 1);
            assert_eq!(detected.as_raw(), explicit.as_raw());
        }

        #[test]
        fn detector_finding_nothing_centers_the_garment() {
            let engine = TryOn::new();
            let canvas = subject(90, 90, [0, 128, 0, 255]);
            let garment = garment_shot(24, 4, [255, 0, 0]);

            let detector = |_: &RgbaImage| None;
            let detected = engine
                .compose_with_detector(&canvas, &garment, Some("cap.png"), &detector)
                .unwrap();
            let centered = engine.compose(&canvas, &garment, Some("cap.png"), None).unwrap();
            assert_eq!(detected.as_raw(), centered.as_raw());
        }
    }

    mod render_prepared {
        use super::*;

        #[test]
        fn one_piece_serves_many_subjects() {
            let engine = TryOn::new();
            let piece = engine
                .prepare_garment(&garment_shot(40, 10, [255, 0, 0]), Some("tshirt.png"))
                .unwrap();

            let small = engine
                .render_prepared(&subject(80, 80, [0, 0, 0, 255]), &piece, None)
                .unwrap();
            let large = engine
                .render_prepared(&subject(300, 200, [0, 0, 0, 255]), &piece, None)
                .unwrap();

            assert_eq!(small.canvas().dimensions(), (80, 80));
            assert_eq!(large.canvas().dimensions(), (300, 200));
            assert_eq!(small.kind(), GarmentKind::Top);
        }

        #[test]
        fn placement_reflects_the_coverage_adjustment() {
            let engine = TryOn::new();
            let piece = engine
                .prepare_garment(&garment_shot(40, 10, [255, 0, 0]), Some("tshirt.png"))
                .unwrap();
            let composition = engine
                .render_prepared(&subject(100, 100, [0, 0, 255, 255]), &piece, Some(&torso()))
                .unwrap();

            // the planned 72px top is widened to the 80px minimum
            assert_eq!(composition.placement(), BoundingBox::new(10, 0, 80, 96));
            assert!(composition.landmarks().is_some());
        }

        #[test]
        fn fallback_placement_is_the_centered_square() {
            let engine = TryOn::new();
            let piece = engine
                .prepare_garment(&garment_shot(24, 4, [255, 0, 0]), Some("cap.png"))
                .unwrap();
            let composition = engine
                .render_prepared(&subject(400, 600, [0, 0, 0, 255]), &piece, None)
                .unwrap();

            assert_eq!(composition.placement(), BoundingBox::new(134, 234, 133, 133));
            assert!(composition.landmarks().is_none());
        }
    }

    mod composition_dimensions {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// the composite always has the subject's dimensions, whatever
            /// the garment and canvas sizes are
            #[test]
            fn output_tracks_the_subject(
                sw in 8u32..64,
                sh in 8u32..64,
                gw in 8u32..48,
                gh in 8u32..48
            ) {
                let canvas = subject(sw, sh, [10, 10, 10, 255]);
                let garment = DynamicImage::ImageRgb8(
                    RgbImage::from_pixel(gw, gh, Rgb([200, 30, 30]))
                );
                let result = TryOn::new().compose(&canvas, &garment, None, None).unwrap();
                prop_assert_eq!(result.dimensions(), (sw, sh));
            }
        }
    }
}
