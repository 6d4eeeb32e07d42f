//! Global binarization of 8-bit grayscale input.
//!
//! Strokes are assumed dark on a light background: a pixel becomes
//! foreground when its intensity is at or below the threshold. The default
//! policy picks the threshold with Otsu's method.
use crate::image::{BinaryMask, ImageU8, ImageView};
use imageproc::contrast::otsu_level;
use log::debug;

/// Inverted threshold: `v <= level` is foreground.
pub fn threshold_inverted(gray: &ImageU8<'_>, level: u8) -> BinaryMask {
    let mut mask = BinaryMask::new(gray.width(), gray.height());
    for (y, row) in gray.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            if v <= level {
                mask.set(x, y, true);
            }
        }
    }
    mask
}

/// Otsu threshold level of `gray`.
pub fn otsu_threshold(gray: &ImageU8<'_>) -> u8 {
    otsu_level(&gray.to_gray_image())
}

/// Binarize with an automatically selected (Otsu) threshold.
pub fn binarize_otsu(gray: &ImageU8<'_>) -> BinaryMask {
    let level = otsu_threshold(gray);
    let mask = threshold_inverted(gray, level);
    debug!(
        "binarize_otsu: level={} foreground={} of {}",
        level,
        mask.count(),
        gray.w * gray.h
    );
    mask
}
