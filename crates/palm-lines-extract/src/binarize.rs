//! Zone-masked binarization: local adaptive thresholding OR'd with a
//! bottom-hat dark-ridge response, re-masked to the zone.
//!
//! On a near-uniform region the adaptive path degenerates to noise; that
//! is not detected here — downstream length filtering and confidence
//! scoring suppress the garbage.

use palm_lines_core::GrayImage;

use crate::morphology::{close, Kernel};
use crate::params::BinarizeParams;

/// Binarize `gray` inside `mask` into a foreground-is-line raster.
pub fn binarize(gray: &GrayImage, mask: &GrayImage, params: &BinarizeParams) -> GrayImage {
    let masked = apply_mask(gray, mask);

    let block = adaptive_block(gray.width as u32, params);
    let mut combined = adaptive_threshold_inv(&masked, block, params.offset);

    if params.use_bottom_hat {
        let hat = bottom_hat_mask(&masked, params);
        for (c, h) in combined.data.iter_mut().zip(&hat.data) {
            *c |= *h;
        }
    }

    apply_mask(&combined, mask)
}

/// Zero out pixels outside the mask.
fn apply_mask(img: &GrayImage, mask: &GrayImage) -> GrayImage {
    let data = img
        .data
        .iter()
        .zip(&mask.data)
        .map(|(&v, &m)| if m != 0 { v } else { 0 })
        .collect();
    GrayImage {
        width: img.width,
        height: img.height,
        data,
    }
}

fn adaptive_block(width: u32, params: &BinarizeParams) -> usize {
    let mut block = (width / params.block_divisor.max(1)).max(params.min_block);
    if block % 2 == 0 {
        block += 1;
    }
    block as usize
}

/// Flag pixels darker than their local block mean minus `offset`
/// (inverted adaptive threshold, foreground = line).
fn adaptive_threshold_inv(img: &GrayImage, block: usize, offset: i16) -> GrayImage {
    let mut out = GrayImage::zeros(img.width, img.height);
    if img.width == 0 || img.height == 0 {
        return out;
    }

    // Summed-area table, one padding row/column of zeros.
    let w = img.width;
    let h = img.height;
    let mut integral = vec![0u64; (w + 1) * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0u64;
        for x in 0..w {
            row_sum += img.data[y * w + x] as u64;
            integral[(y + 1) * (w + 1) + (x + 1)] = integral[y * (w + 1) + (x + 1)] + row_sum;
        }
    }

    let r = (block / 2) as i64;
    for y in 0..h {
        let y0 = (y as i64 - r).max(0) as usize;
        let y1 = ((y as i64 + r + 1).min(h as i64)) as usize;
        for x in 0..w {
            let x0 = (x as i64 - r).max(0) as usize;
            let x1 = ((x as i64 + r + 1).min(w as i64)) as usize;
            let sum = integral[y1 * (w + 1) + x1] + integral[y0 * (w + 1) + x0]
                - integral[y0 * (w + 1) + x1]
                - integral[y1 * (w + 1) + x0];
            let count = ((y1 - y0) * (x1 - x0)) as u64;
            let mean = (sum / count) as i32;
            if (img.data[y * w + x] as i32) < mean - offset as i32 {
                out.set(x, y, 255);
            }
        }
    }

    out
}

/// Bottom-hat transform (closing minus source) thresholded at a fixed
/// cutoff: highlights narrow dark structures against a locally bright
/// background.
fn bottom_hat_mask(img: &GrayImage, params: &BinarizeParams) -> GrayImage {
    let k = ((img.width as u32 / params.hat_divisor.max(1)).max(3)) as usize;
    let closed = close(img, &Kernel::rect(k, k));

    let data = closed
        .data
        .iter()
        .zip(&img.data)
        .map(|(&c, &v)| {
            if c.saturating_sub(v) > params.hat_threshold {
                255
            } else {
                0
            }
        })
        .collect();
    GrayImage {
        width: img.width,
        height: img.height,
        data,
    }
}
