//! Topology-preserving thinning.
//!
//! Both routines delete foreground pixels whose 3×3 neighborhood shows a
//! single contiguous run of foreground around them (crossing number 1) and
//! that are not line ends, so connectivity and endpoints survive.
//!
//! Neighborhood labels, clockwise from north:
//!
//! ```text
//! P9 P2 P3
//! P8 P1 P4
//! P7 P6 P5
//! ```
use crate::image::BinaryMask;
use imageproc::distance_transform::euclidean_squared_distance_transform;

/// Offsets of P2..P9.
const RING: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

#[inline]
fn ring(mask: &BinaryMask, x: usize, y: usize) -> [bool; 8] {
    let (x, y) = (x as isize, y as isize);
    let mut out = [false; 8];
    for (slot, (dx, dy)) in out.iter_mut().zip(RING) {
        *slot = mask.get_signed(x + dx, y + dy);
    }
    out
}

/// Number of foreground neighbors, B(P1).
#[inline]
fn occupancy(n: &[bool; 8]) -> usize {
    n.iter().filter(|&&v| v).count()
}

/// Number of 0→1 transitions in P2, P3, …, P9, P2, A(P1).
#[inline]
fn crossings(n: &[bool; 8]) -> usize {
    (0..8).filter(|&i| !n[i] && n[(i + 1) % 8]).count()
}

/// Zhang–Suen parallel thinning, iterated until stable.
pub fn zhang_suen(mask: &BinaryMask) -> BinaryMask {
    let mut out = mask.clone();
    let mut doomed: Vec<[usize; 2]> = Vec::new();
    loop {
        let mut changed = false;
        for first_pass in [true, false] {
            doomed.clear();
            for [x, y] in out.iter_set() {
                let n = ring(&out, x, y);
                let b = occupancy(&n);
                if !(2..=6).contains(&b) || crossings(&n) != 1 {
                    continue;
                }
                let [p2, _, p4, _, p6, _, p8, _] = n;
                let removable = if first_pass {
                    !(p2 && p4 && p6) && !(p4 && p6 && p8)
                } else {
                    !(p2 && p4 && p8) && !(p2 && p6 && p8)
                };
                if removable {
                    doomed.push([x, y]);
                }
            }
            for &[x, y] in &doomed {
                out.set(x, y, false);
            }
            changed |= !doomed.is_empty();
        }
        if !changed {
            return out;
        }
    }
}

/// Medial-axis style thinning: pixels are visited once, nearest to the
/// background first, and deleted when they lie on the current border and
/// their removal keeps the local topology.
pub fn medial_axis(mask: &BinaryMask) -> BinaryMask {
    if mask.is_empty() {
        return mask.clone();
    }
    // Distance to the nearest background pixel: transform the inverted mask.
    let inverted = BinaryMask::from_fn(mask.w, mask.h, |x, y| !mask.get(x, y));
    let dist = if inverted.is_empty() {
        None
    } else {
        Some(euclidean_squared_distance_transform(&inverted.to_gray_image()))
    };

    let mut order: Vec<(f64, [usize; 2])> = mask
        .iter_set()
        .map(|[x, y]| {
            let d = dist
                .as_ref()
                .map_or(0.0, |d| d.get_pixel(x as u32, y as u32)[0]);
            (d, [x, y])
        })
        .collect();
    // Stable sort keeps row-major order among equal distances.
    order.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut out = mask.clone();
    for (_, [x, y]) in order {
        let n = ring(&out, x, y);
        let on_border = !(n[0] && n[2] && n[4] && n[6]);
        if on_border && occupancy(&n) >= 2 && crossings(&n) == 1 {
            out.set(x, y, false);
        }
    }
    out
}
