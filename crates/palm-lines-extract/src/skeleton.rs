//! Morphological skeletonization: iterative thinning with a cross-shaped
//! structuring element down to 1-pixel-wide medial curves.

use palm_lines_core::GrayImage;

use crate::morphology::{dilate, erode, Kernel};

/// Reduce a binary mask to its medial axis.
///
/// Each round accumulates `img − open(img)` into the skeleton and erodes
/// the working raster; the loop ends on exact emptiness. Erosion treats
/// out-of-bounds pixels as background, so a finite nonzero raster strictly
/// shrinks every round and termination is guaranteed.
pub fn skeletonize(mask: &GrayImage) -> GrayImage {
    let element = Kernel::cross(3);
    let mut img = mask.clone();
    let mut skeleton = GrayImage::zeros(mask.width, mask.height);

    while img.count_nonzero() != 0 {
        let eroded = erode(&img, &element);
        let opened = dilate(&eroded, &element);
        for i in 0..img.data.len() {
            skeleton.data[i] |= img.data[i].saturating_sub(opened.data[i]);
        }
        img = eroded;
    }

    skeleton
}
