use image::{Rgba, RgbaImage};

use crate::config::CompositeOptions;

/// Blend a garment cutout onto the canvas at the given offset.
///
/// The write region is the intersection of the canvas with the garment
/// rectangle; placements partly or fully off-canvas are cropped silently
/// rather than rejected. Colors blend as `a * fg + (1 - a) * bg`, and the
/// canvas alpha is raised to the garment's where the garment is more
/// opaque. Pixels whose effective alpha is zero are skipped entirely, so a
/// fully transparent garment leaves the canvas bit-identical.
pub fn overlay_cutout(
    canvas: &RgbaImage,
    garment: &RgbaImage,
    x: u32,
    y: u32,
    options: &CompositeOptions,
) -> RgbaImage {
    let mut out = canvas.clone();
    let (canvas_width, canvas_height) = canvas.dimensions();
    let (garment_width, garment_height) = garment.dimensions();

    let x_end = x.saturating_add(garment_width).min(canvas_width);
    let y_end = y.saturating_add(garment_height).min(canvas_height);
    if x >= x_end || y >= y_end {
        return out;
    }

    let opacity = options.opacity.clamp(0.0, 1.0);
    for out_y in y..y_end {
        for out_x in x..x_end {
            let fg = garment.get_pixel(out_x - x, out_y - y);
            let alpha = (fg[3] as f32 / 255.0) * opacity;
            if alpha <= 0.0 {
                continue;
            }
            let bg = *out.get_pixel(out_x, out_y);
            let out_alpha = bg[3].max((fg[3] as f32 * opacity).round() as u8);
            let blended = if alpha >= 1.0 {
                Rgba([fg[0], fg[1], fg[2], out_alpha])
            } else {
                let inverse = 1.0 - alpha;
                let mix = |fg_c: u8, bg_c: u8| -> u8 {
                    (fg_c as f32 * alpha + bg_c as f32 * inverse)
                        .round()
                        .clamp(0.0, 255.0) as u8
                };
                Rgba([
                    mix(fg[0], bg[0]),
                    mix(fg[1], bg[1]),
                    mix(fg[2], bg[2]),
                    out_alpha,
                ])
            };
            out.put_pixel(out_x, out_y, blended);
        }
    }
    out
}
