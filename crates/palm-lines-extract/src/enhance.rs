//! Texture enhancement: luminance conversion, contrast-limited adaptive
//! histogram equalization, and edge-preserving bilateral smoothing.
//!
//! Deterministic for identical input; no learned parameters.

use palm_lines_core::{GrayImage, RgbImageView};

use crate::params::EnhanceParams;

/// Enhance the palm ROI into a smoothed, contrast-boosted grayscale raster.
pub fn enhance(roi: &RgbImageView<'_>, params: &EnhanceParams) -> GrayImage {
    let gray = rgb_to_luma(roi);
    let equalized = clahe(&gray, params.clahe_clip_limit, params.clahe_tiles);
    bilateral_filter(
        &equalized,
        params.bilateral_diameter,
        params.bilateral_sigma_color,
        params.bilateral_sigma_space,
    )
}

/// BT.601 luminance.
fn rgb_to_luma(roi: &RgbImageView<'_>) -> GrayImage {
    let mut out = GrayImage::zeros(roi.width, roi.height);
    for y in 0..roi.height {
        for x in 0..roi.width {
            let [r, g, b] = roi.rgb(x, y);
            let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
            out.set(x, y, luma.round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}

/// Contrast-limited adaptive histogram equalization over a `tiles × tiles`
/// grid, with bilinear blending between neighbouring tile mappings.
fn clahe(img: &GrayImage, clip_limit: f32, tiles: usize) -> GrayImage {
    let mut out = GrayImage::zeros(img.width, img.height);
    if img.width == 0 || img.height == 0 {
        return out;
    }

    let tiles = tiles.max(1);
    let tile_w = img.width.div_ceil(tiles).max(1);
    let tile_h = img.height.div_ceil(tiles).max(1);
    let nx = img.width.div_ceil(tile_w);
    let ny = img.height.div_ceil(tile_h);

    // One clipped-equalization LUT per tile.
    let mut luts = vec![[0u8; 256]; nx * ny];
    for ty in 0..ny {
        for tx in 0..nx {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            let x1 = (x0 + tile_w).min(img.width);
            let y1 = (y0 + tile_h).min(img.height);

            let mut hist = [0u32; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    hist[img.data[y * img.width + x] as usize] += 1;
                }
            }

            let area = ((x1 - x0) * (y1 - y0)) as u32;
            clip_histogram(&mut hist, clip_limit, area);

            let scale = 255.0 / area.max(1) as f32;
            let mut cdf = 0u32;
            let lut = &mut luts[ty * nx + tx];
            for (v, &count) in hist.iter().enumerate() {
                cdf += count;
                lut[v] = (cdf as f32 * scale).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    for y in 0..img.height {
        let fy = (y as f32 + 0.5) / tile_h as f32 - 0.5;
        let ty0 = (fy.floor().max(0.0) as usize).min(ny - 1);
        let ty1 = (ty0 + 1).min(ny - 1);
        let wy = (fy - ty0 as f32).clamp(0.0, 1.0);

        for x in 0..img.width {
            let fx = (x as f32 + 0.5) / tile_w as f32 - 0.5;
            let tx0 = (fx.floor().max(0.0) as usize).min(nx - 1);
            let tx1 = (tx0 + 1).min(nx - 1);
            let wx = (fx - tx0 as f32).clamp(0.0, 1.0);

            let v = img.data[y * img.width + x] as usize;
            let v00 = luts[ty0 * nx + tx0][v] as f32;
            let v10 = luts[ty0 * nx + tx1][v] as f32;
            let v01 = luts[ty1 * nx + tx0][v] as f32;
            let v11 = luts[ty1 * nx + tx1][v] as f32;

            let top = v00 + wx * (v10 - v00);
            let bottom = v01 + wx * (v11 - v01);
            out.set(x, y, (top + wy * (bottom - top)).round() as u8);
        }
    }

    out
}

/// Clip histogram bins at `clip_limit` multiples of the uniform bin height
/// and redistribute the excess across all bins. Total mass is conserved so
/// the equalization LUT still maps the full CDF onto [0, 255].
fn clip_histogram(hist: &mut [u32; 256], clip_limit: f32, area: u32) {
    let limit = ((clip_limit * area as f32 / 256.0).max(1.0)) as u32;
    let mut excess = 0u32;
    for bin in hist.iter_mut() {
        if *bin > limit {
            excess += *bin - limit;
            *bin = limit;
        }
    }

    let bonus = excess / 256;
    for bin in hist.iter_mut() {
        *bin += bonus;
    }

    let mut rem = excess % 256;
    if rem > 0 {
        let step = (256 / rem).max(1) as usize;
        let mut i = 0;
        while rem > 0 && i < 256 {
            hist[i] += 1;
            rem -= 1;
            i += step;
        }
    }
}

/// Bilateral filter: Gaussian in both space and intensity, so smoothing
/// stops at line edges while skin-pore noise averages out.
fn bilateral_filter(img: &GrayImage, diameter: usize, sigma_color: f32, sigma_space: f32) -> GrayImage {
    let mut out = GrayImage::zeros(img.width, img.height);
    let diameter = diameter.max(1) | 1;
    let radius = (diameter / 2) as i32;

    let inv_2ss = 1.0 / (2.0 * sigma_space * sigma_space);
    let inv_2sc = 1.0 / (2.0 * sigma_color * sigma_color);

    let mut spatial = Vec::with_capacity(diameter * diameter);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            spatial.push(((dx, dy), (-((dx * dx + dy * dy) as f32) * inv_2ss).exp()));
        }
    }
    let range: Vec<f32> = (0..256)
        .map(|d| (-(d * d) as f32 * inv_2sc).exp())
        .collect();

    for y in 0..img.height {
        for x in 0..img.width {
            let center = img.data[y * img.width + x];
            let mut acc = 0.0f32;
            let mut norm = 0.0f32;
            for &((dx, dy), ws) in &spatial {
                let xx = x as i32 + dx;
                let yy = y as i32 + dy;
                if xx < 0 || yy < 0 || xx >= img.width as i32 || yy >= img.height as i32 {
                    continue;
                }
                let v = img.data[yy as usize * img.width + xx as usize];
                let w = ws * range[(v as i16 - center as i16).unsigned_abs() as usize];
                acc += w * v as f32;
                norm += w;
            }
            out.set(x, y, (acc / norm).round().clamp(0.0, 255.0) as u8);
        }
    }

    out
}
