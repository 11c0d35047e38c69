//! Grayscale morphology on [`GrayImage`] rasters.
//!
//! Pixels outside the raster read as 0, so erosion strictly shrinks any
//! finite foreground — the termination argument for skeletonization
//! depends on this.

use palm_lines_core::GrayImage;

/// Flat structuring element given as center-relative pixel offsets.
#[derive(Clone, Debug)]
pub struct Kernel {
    offsets: Vec<(i32, i32)>,
}

impl Kernel {
    /// Full `width × height` rectangle, anchor at `(w/2, h/2)`.
    pub fn rect(width: usize, height: usize) -> Self {
        let (ax, ay) = (width as i32 / 2, height as i32 / 2);
        let mut offsets = Vec::with_capacity(width * height);
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                offsets.push((dx - ax, dy - ay));
            }
        }
        Self { offsets }
    }

    /// Filled ellipse inscribed in `width × height`.
    pub fn ellipse(width: usize, height: usize) -> Self {
        let (ax, ay) = (width as i32 / 2, height as i32 / 2);
        let rx = ((width as f32 - 1.0) * 0.5).max(0.5);
        let ry = ((height as f32 - 1.0) * 0.5).max(0.5);
        let mut offsets = Vec::new();
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                let nx = (dx - ax) as f32 / rx;
                let ny = (dy - ay) as f32 / ry;
                if nx * nx + ny * ny <= 1.0 {
                    offsets.push((dx - ax, dy - ay));
                }
            }
        }
        Self { offsets }
    }

    /// 4-connected cross inscribed in `size × size`.
    pub fn cross(size: usize) -> Self {
        let a = size as i32 / 2;
        let mut offsets = Vec::with_capacity(2 * size - 1);
        for d in 0..size as i32 {
            offsets.push((d - a, 0));
            if d - a != 0 {
                offsets.push((0, d - a));
            }
        }
        Self { offsets }
    }

    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }
}

/// Minimum filter over the kernel footprint.
pub fn erode(img: &GrayImage, kernel: &Kernel) -> GrayImage {
    let mut out = GrayImage::zeros(img.width, img.height);
    for y in 0..img.height {
        for x in 0..img.width {
            let mut m = u8::MAX;
            for &(dx, dy) in kernel.offsets() {
                m = m.min(img.get(x as i32 + dx, y as i32 + dy));
                if m == 0 {
                    break;
                }
            }
            out.set(x, y, m);
        }
    }
    out
}

/// Maximum filter over the kernel footprint.
pub fn dilate(img: &GrayImage, kernel: &Kernel) -> GrayImage {
    let mut out = GrayImage::zeros(img.width, img.height);
    for y in 0..img.height {
        for x in 0..img.width {
            let mut m = 0u8;
            for &(dx, dy) in kernel.offsets() {
                m = m.max(img.get(x as i32 + dx, y as i32 + dy));
                if m == u8::MAX {
                    break;
                }
            }
            out.set(x, y, m);
        }
    }
    out
}

/// Erosion followed by dilation: removes specks smaller than the kernel.
pub fn open(img: &GrayImage, kernel: &Kernel) -> GrayImage {
    dilate(&erode(img, kernel), kernel)
}

/// Dilation followed by erosion: bridges gaps smaller than the kernel.
pub fn close(img: &GrayImage, kernel: &Kernel) -> GrayImage {
    erode(&dilate(img, kernel), kernel)
}
