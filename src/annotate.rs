use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::landmarks::{LandmarkSet, SKELETON};
use crate::plan::BoundingBox;

const BONE_COLOR: Rgba<u8> = Rgba([255, 255, 0, 255]);
const KEYPOINT_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BOX_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
const KEYPOINT_RADIUS: i32 = 4;

/// Render the detected pose and the planned placement box onto a copy of
/// the subject, for eyeballing why a composition landed where it did.
///
/// Skeleton bones are drawn first so keypoints sit on top of them. A
/// sentinel box is skipped; landmarks may be absent entirely.
pub fn annotate_placement(
    subject: &RgbaImage,
    landmarks: Option<&LandmarkSet>,
    placement: BoundingBox,
) -> RgbaImage {
    let mut out = subject.clone();

    if let Some(set) = landmarks {
        for (from_name, to_name) in SKELETON {
            if let (Some(from), Some(to)) = (set.get(from_name), set.get(to_name)) {
                draw_line_segment_mut(&mut out, (from.x, from.y), (to.x, to.y), BONE_COLOR);
            }
        }
        for (_, point) in set.iter() {
            draw_filled_circle_mut(
                &mut out,
                (point.x as i32, point.y as i32),
                KEYPOINT_RADIUS,
                KEYPOINT_COLOR,
            );
        }
    }

    if !placement.is_sentinel() {
        let rect = Rect::at(placement.x as i32, placement.y as i32)
            .of_size(placement.width, placement.height);
        draw_hollow_rect_mut(&mut out, rect, BOX_COLOR);
    }

    out
}
