//! Coarse stroke-thickness proxy and its normalization into heights.
//!
//! From each path point four axis-aligned rays are cast inside the object
//! mask; each counts contiguous foreground pixels, starting at the adjacent
//! pixel, until the first background pixel, the mask border or `max_search`.
//! The sum of the four counts stands in for stroke width. It is not a
//! perpendicular width: a diagonal stroke reads thicker than a straight one.
use crate::image::BinaryMask;
use crate::types::Path;
use serde::Deserialize;

const RAY_DIRS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Guards the normalization denominator.
const NORMALIZE_EPS: f64 = 1e-6;

/// Sum of the four axis ray lengths at `(x, y)`.
pub fn local_thickness(mask: &BinaryMask, x: usize, y: usize, max_search: usize) -> u32 {
    let mut total = 0u32;
    for (dx, dy) in RAY_DIRS {
        let (mut nx, mut ny) = (x as isize + dx, y as isize + dy);
        let mut count = 0usize;
        while count < max_search && mask.get_signed(nx, ny) {
            count += 1;
            nx += dx;
            ny += dy;
        }
        total += count as u32;
    }
    total
}

/// Linearly rescale thickness samples into `[z_min, z_max]`.
///
/// A constant profile maps to `z_min` everywhere; otherwise the thinnest
/// sample maps to `z_min` and the thickest to just below `z_max`.
pub fn normalize_thickness(thickness: &[u32], z_min: f64, z_max: f64) -> Vec<f64> {
    let (Some(&lo), Some(&hi)) = (thickness.iter().min(), thickness.iter().max()) else {
        return Vec::new();
    };
    if lo == hi {
        return vec![z_min; thickness.len()];
    }
    let span = f64::from(hi - lo) + NORMALIZE_EPS;
    thickness
        .iter()
        .map(|&t| z_min + f64::from(t - lo) / span * (z_max - z_min))
        .collect()
}

/// Height range and ray bound for z-profiles.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ThicknessOptions {
    /// Height assigned to the thinnest sample of a path.
    pub z_min: f64,
    /// Height approached by the thickest sample of a path.
    pub z_max: f64,
    /// Maximum pixels counted per ray.
    pub max_search: usize,
}

impl Default for ThicknessOptions {
    fn default() -> Self {
        Self {
            z_min: 0.5,
            z_max: 3.0,
            max_search: 30,
        }
    }
}

/// Measures paths against one object's mask.
pub struct ThicknessProfiler<'a> {
    mask: &'a BinaryMask,
    opts: &'a ThicknessOptions,
}

impl<'a> ThicknessProfiler<'a> {
    pub fn new(mask: &'a BinaryMask, opts: &'a ThicknessOptions) -> Self {
        Self { mask, opts }
    }

    /// Raw thickness at a (possibly fractional) path point; rounds to the
    /// nearest pixel.
    pub fn thickness_at(&self, x: f64, y: f64) -> u32 {
        let (px, py) = (x.round(), y.round());
        if px < 0.0 || py < 0.0 {
            return 0;
        }
        let (px, py) = (px as usize, py as usize);
        if px >= self.mask.w || py >= self.mask.h {
            return 0;
        }
        local_thickness(self.mask, px, py, self.opts.max_search)
    }

    pub fn thickness_samples(&self, path: &Path) -> Vec<u32> {
        path.points
            .iter()
            .map(|p| self.thickness_at(p.x, p.y))
            .collect()
    }

    /// Per-point heights in `[z_min, z_max]`, in path order.
    pub fn z_profile(&self, path: &Path) -> Vec<f64> {
        normalize_thickness(
            &self.thickness_samples(path),
            self.opts.z_min,
            self.opts.z_max,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    #[test]
    fn rays_stop_at_background_and_border() {
        // 5-wide horizontal band, rows 2..=4 of a 9x7 mask.
        let mask = BinaryMask::from_fn(9, 7, |_, y| (2..=4).contains(&y));
        // Center row: up 1, down 1, left 4, right 4.
        assert_eq!(local_thickness(&mask, 4, 3, 30), 10);
        // Top row of the band: up 0, down 2.
        assert_eq!(local_thickness(&mask, 0, 2, 30), 2 + 8);
    }

    #[test]
    fn rays_are_capped_by_max_search() {
        let mask = BinaryMask::from_fn(101, 101, |_, _| true);
        assert_eq!(local_thickness(&mask, 50, 50, 30), 120);
        assert_eq!(local_thickness(&mask, 50, 50, 5), 20);
    }

    #[test]
    fn background_point_still_measures_neighbors() {
        let mut mask = BinaryMask::from_fn(5, 5, |_, _| true);
        mask.set(2, 2, false);
        assert_eq!(local_thickness(&mask, 2, 2, 30), 8);
    }

    #[test]
    fn constant_profile_maps_to_z_min() {
        let z = normalize_thickness(&[7, 7, 7, 7], 0.5, 3.0);
        assert_eq!(z, vec![0.5; 4]);
    }

    #[test]
    fn normalized_values_stay_in_range() {
        let z = normalize_thickness(&[2, 10, 6, 3, 10, 2], 0.5, 3.0);
        for &v in &z {
            assert!((0.5..=3.0).contains(&v), "z={v} out of range");
        }
        assert_relative_eq!(z[0], 0.5);
        assert_relative_eq!(z[1], 3.0, epsilon = 1e-5);
        assert_relative_eq!(z[2], 1.75, epsilon = 1e-5);
    }

    #[test]
    fn empty_profile_is_empty() {
        assert!(normalize_thickness(&[], 0.0, 1.0).is_empty());
    }

    #[test]
    fn uniform_stroke_profile_is_flat() {
        let mask = BinaryMask::from_fn(40, 9, |_, y| (3..=5).contains(&y));
        let path = Path {
            points: (10..30).step_by(2).map(|x| Point2::new(x as f64, 4.0)).collect(),
        };
        let opts = ThicknessOptions {
            max_search: 5,
            ..Default::default()
        };
        let z = ThicknessProfiler::new(&mask, &opts).z_profile(&path);
        assert_eq!(z.len(), path.len());
        assert!(z.iter().all(|&v| v == opts.z_min));
    }
}
