use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::config::StripOptions;
use crate::error::{TryOnError, TryOnResult};

/// Cut the garment out of a light, low-saturation backdrop.
///
/// Returns an RGBA image where backdrop pixels are fully transparent and
/// the kept silhouette stays opaque with its original colors. Fails with
/// [`TryOnError::EmptyForeground`] when nothing survives mask cleanup;
/// callers that want a best-effort result fall back to
/// [`opaque_cutout`].
pub fn strip_background(garment: &RgbImage, options: &StripOptions) -> TryOnResult<RgbaImage> {
    let (width, height) = garment.dimensions();
    if width == 0 || height == 0 {
        return Err(TryOnError::EmptyImage {
            role: "garment",
            width,
            height,
        });
    }
    let mask = foreground_mask(garment, options);
    let mask = despeckle(&mask);
    let mask = keep_largest_component(&mask)?;
    let mask = fill_enclosed_holes(&mask);
    Ok(apply_alpha(garment, &mask))
}

/// Wrap an opaque garment in an all-opaque RGBA buffer, unchanged.
pub fn opaque_cutout(garment: &RgbImage) -> RgbaImage {
    let mut rgba = RgbaImage::new(garment.width(), garment.height());
    for (src, out) in garment.pixels().zip(rgba.pixels_mut()) {
        *out = Rgba([src[0], src[1], src[2], 255]);
    }
    rgba
}

/// Mark foreground pixels: everything that is not a bright, washed-out
/// backdrop pixel.
fn foreground_mask(garment: &RgbImage, options: &StripOptions) -> GrayImage {
    let (width, height) = garment.dimensions();
    let mut mask = GrayImage::new(width, height);
    for (src, out) in garment.pixels().zip(mask.pixels_mut()) {
        let (saturation, value) = saturation_value(src);
        let backdrop = saturation <= options.max_background_saturation
            && value >= options.min_background_value;
        *out = Luma([if backdrop { 0 } else { 255 }]);
    }
    mask
}

/// HSV saturation and value of one RGB pixel, both on a 0.0 to 1.0 scale.
fn saturation_value(px: &Rgb<u8>) -> (f32, f32) {
    let r = px[0] as f32 / 255.0;
    let g = px[1] as f32 / 255.0;
    let b = px[2] as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let saturation = if max > 0.0 { (max - min) / max } else { 0.0 };
    (saturation, max)
}

/// Erode one pixel then dilate two, with a square element. Lone specks
/// disappear, pinholes along the silhouette edge close, and the kept
/// region ends up one pixel fatter than it started.
fn despeckle(mask: &GrayImage) -> GrayImage {
    let eroded = erode(mask, Norm::LInf, 1);
    dilate(&eroded, Norm::LInf, 2)
}

/// Keep the single largest 8-connected foreground region.
///
/// A garment shot holds one subject; anything else the thresholds kept is
/// speckle or a stray prop.
fn keep_largest_component(mask: &GrayImage) -> TryOnResult<GrayImage> {
    let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));

    let mut areas: Vec<u64> = Vec::new();
    for label_px in labels.pixels() {
        let label = label_px[0] as usize;
        if label == 0 {
            continue;
        }
        if areas.len() < label {
            areas.resize(label, 0);
        }
        areas[label - 1] += 1;
    }
    let Some((largest, _)) = areas.iter().enumerate().max_by_key(|(_, area)| **area) else {
        return Err(TryOnError::EmptyForeground);
    };
    let keep = (largest + 1) as u32;

    let mut out = GrayImage::new(mask.width(), mask.height());
    for (label_px, out_px) in labels.pixels().zip(out.pixels_mut()) {
        *out_px = Luma([if label_px[0] == keep { 255 } else { 0 }]);
    }
    Ok(out)
}

/// Fill background regions fully enclosed by the kept component.
///
/// Flood-fills the border-connected background first; any dark region left
/// over is a hole inside the silhouette (a fabric cutout, the gap inside a
/// handle) and becomes opaque.
fn fill_enclosed_holes(mask: &GrayImage) -> GrayImage {
    let (width, height) = mask.dimensions();
    let w_usize = width as usize;
    let raw = mask.as_raw();
    let idx = |x: u32, y: u32| -> usize { (y as usize) * w_usize + x as usize };

    let mut outside = vec![false; w_usize * height as usize];
    let mut stack: Vec<(u32, u32)> = Vec::new();
    let visit = |x: u32, y: u32, outside: &mut Vec<bool>, stack: &mut Vec<(u32, u32)>| {
        let id = idx(x, y);
        if !outside[id] && raw[id] < 128 {
            outside[id] = true;
            stack.push((x, y));
        }
    };

    for x in 0..width {
        visit(x, 0, &mut outside, &mut stack);
        visit(x, height - 1, &mut outside, &mut stack);
    }
    for y in 0..height {
        visit(0, y, &mut outside, &mut stack);
        visit(width - 1, y, &mut outside, &mut stack);
    }
    while let Some((x, y)) = stack.pop() {
        if x > 0 {
            visit(x - 1, y, &mut outside, &mut stack);
        }
        if x + 1 < width {
            visit(x + 1, y, &mut outside, &mut stack);
        }
        if y > 0 {
            visit(x, y - 1, &mut outside, &mut stack);
        }
        if y + 1 < height {
            visit(x, y + 1, &mut outside, &mut stack);
        }
    }

    let mut out = GrayImage::new(width, height);
    for ((x, y, out_px), mask_px) in out.enumerate_pixels_mut().zip(mask.pixels()) {
        let keep = mask_px[0] >= 128 || !outside[idx(x, y)];
        *out_px = Luma([if keep { 255 } else { 0 }]);
    }
    out
}

/// Attach the mask as the alpha channel, keeping original colors.
fn apply_alpha(garment: &RgbImage, mask: &GrayImage) -> RgbaImage {
    let mut rgba = RgbaImage::new(garment.width(), garment.height());
    for ((src, mask_px), out) in garment.pixels().zip(mask.pixels()).zip(rgba.pixels_mut()) {
        *out = Rgba([src[0], src[1], src[2], mask_px[0]]);
    }
    rgba
}
