//! Outer-contour bands.
//!
//! Borders are traced with `imageproc` (Suzuki–Abe) and only outer borders
//! are kept; hole borders are ignored. A band of the requested thickness is
//! produced by stamping a filled disk at every contour point.
use crate::image::BinaryMask;
use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::drawing::draw_filled_circle_mut;

/// Outer borders of `mask`, in tracing order. Points are `[x, y]`.
pub fn outer_contours(mask: &BinaryMask) -> Vec<Vec<[i32; 2]>> {
    indexed_outer_contours(mask)
        .into_iter()
        .map(|(_, points)| points)
        .collect()
}

/// Outer borders paired with their index in the full traced list, where
/// hole borders take up indices too.
pub fn indexed_outer_contours(mask: &BinaryMask) -> Vec<(usize, Vec<[i32; 2]>)> {
    if mask.is_empty() {
        return Vec::new();
    }
    find_contours::<i32>(&mask.to_gray_image())
        .into_iter()
        .enumerate()
        .filter(|(_, c)| c.border_type == BorderType::Outer)
        .map(|(i, c)| (i, c.points.into_iter().map(|p| [p.x, p.y]).collect()))
        .collect()
}

/// Outer contour drawn as a line `thickness` pixels wide, same size as
/// `mask`.
pub fn outer_band(mask: &BinaryMask, thickness: u32) -> BinaryMask {
    let mut canvas = GrayImage::new(mask.w as u32, mask.h as u32);
    let radius = (thickness / 2) as i32;
    for contour in outer_contours(mask) {
        for [x, y] in contour {
            draw_filled_circle_mut(&mut canvas, (x, y), radius, Luma([255u8]));
        }
    }
    BinaryMask::from_gray(&canvas)
}
