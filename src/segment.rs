//! Object segmentation: binary image → independent filled object masks.
//!
//! Each outer border found by contour tracing becomes one object; its
//! `object_id` is the border's index in the traced contour list, hole
//! borders included, so ids can skip values. The object mask covers the 8-connected component the border
//! encloses with every hole filled, so anything nested inside a hole belongs
//! to the enclosing object as well (and is also reported as its own object).
//!
//! Notes
//! - Masks are full image size so coordinates stay in image space.
//! - Hole filling is a 4-connected flood from the component's bounding box
//!   frame; whatever the flood cannot reach is inside the outline.
use crate::error::Result;
use crate::image::BinaryMask;
use crate::skeleton::outline::indexed_outer_contours;
use crate::types::ObjectMask;
use image::Luma;
use imageproc::region_labelling::{connected_components, Connectivity};
use log::debug;
use std::collections::VecDeque;

/// Binary mask → one [`ObjectMask`] per outer boundary.
pub trait ObjectSegmenter: Send + Sync {
    fn segment(&self, mask: &BinaryMask) -> Result<Vec<ObjectMask>>;
}

/// Default segmenter over `imageproc` contour tracing and labelling.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContourSegmenter;

impl ObjectSegmenter for ContourSegmenter {
    fn segment(&self, mask: &BinaryMask) -> Result<Vec<ObjectMask>> {
        let contours = indexed_outer_contours(mask);
        if contours.is_empty() {
            return Ok(Vec::new());
        }
        let labels = connected_components(&mask.to_gray_image(), Connectivity::Eight, Luma([0u8]));

        let mut objects = Vec::with_capacity(contours.len());
        for &(object_id, ref contour) in &contours {
            let Some(&[sx, sy]) = contour.first() else {
                continue;
            };
            let label = labels.get_pixel(sx as u32, sy as u32)[0];
            if label == 0 {
                continue;
            }
            let filled = fill_component(mask.w, mask.h, |x, y| {
                labels.get_pixel(x as u32, y as u32)[0] == label
            });
            objects.push(ObjectMask {
                object_id,
                mask: filled,
            });
        }
        debug!(
            "ContourSegmenter::segment contours={} objects={}",
            contours.len(),
            objects.len()
        );
        Ok(objects)
    }
}

/// Component selected by `inside`, with all enclosed pixels set.
fn fill_component(w: usize, h: usize, inside: impl Fn(usize, usize) -> bool) -> BinaryMask {
    let mut bbox: Option<[usize; 4]> = None;
    for y in 0..h {
        for x in 0..w {
            if inside(x, y) {
                let b = bbox.get_or_insert([x, y, x, y]);
                b[0] = b[0].min(x);
                b[1] = b[1].min(y);
                b[2] = b[2].max(x);
                b[3] = b[3].max(y);
            }
        }
    }
    let Some([x0, y0, x1, y1]) = bbox else {
        return BinaryMask::new(w, h);
    };

    // Flood the complement inside the bbox from its frame.
    let (bw, bh) = (x1 - x0 + 1, y1 - y0 + 1);
    let mut outside = vec![false; bw * bh];
    let mut queue = VecDeque::new();
    for by in 0..bh {
        for bx in 0..bw {
            let on_frame = bx == 0 || by == 0 || bx + 1 == bw || by + 1 == bh;
            if on_frame && !inside(x0 + bx, y0 + by) {
                outside[by * bw + bx] = true;
                queue.push_back((bx, by));
            }
        }
    }
    while let Some((bx, by)) = queue.pop_front() {
        let steps = [
            (bx.wrapping_sub(1), by),
            (bx + 1, by),
            (bx, by.wrapping_sub(1)),
            (bx, by + 1),
        ];
        for (nx, ny) in steps {
            if nx >= bw || ny >= bh {
                continue;
            }
            let i = ny * bw + nx;
            if !outside[i] && !inside(x0 + nx, y0 + ny) {
                outside[i] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    BinaryMask::from_fn(w, h, |x, y| {
        (x0..=x1).contains(&x) && (y0..=y1).contains(&y) && !outside[(y - y0) * bw + (x - x0)]
    })
}
