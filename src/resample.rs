//! Fixed-count resampling with gap splitting.
//!
//! Targets are spaced evenly in arc length, but each target snaps to the
//! existing sample with the closest cumulative arc length rather than being
//! interpolated. Output density is therefore bounded by the input sampling:
//! when a path has fewer native samples than `n_points`, several targets land
//! on the same sample, duplicates are skipped, and fewer points come out.
//! Heights are carried over from the selected samples unchanged.
//!
//! Consecutive selected samples farther apart than `max_gap` start a new
//! segment; segments shorter than two points are dropped.
use crate::types::Trajectory;
use log::debug;
use nalgebra::distance;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ResampleOptions {
    /// Number of evenly spaced arc-length targets.
    pub n_points: usize,
    /// Distance between consecutive selected samples that forces a split.
    pub max_gap: f64,
}

impl Default for ResampleOptions {
    fn default() -> Self {
        Self {
            n_points: 30,
            max_gap: 20.0,
        }
    }
}

/// Cumulative Euclidean arc length over the (x, y) samples; `s[0] == 0`.
pub fn cumulative_arc_length(traj: &Trajectory) -> Vec<f64> {
    let mut s = Vec::with_capacity(traj.len());
    let mut acc = 0.0f64;
    s.push(acc);
    for pair in traj.points.windows(2) {
        acc += distance(&pair[0].xy(), &pair[1].xy());
        s.push(acc);
    }
    s.truncate(traj.len());
    s
}

/// `n` evenly spaced values from 0 to `total`, both inclusive.
fn linspace(total: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 { total / (n - 1) as f64 } else { 0.0 };
    (0..n).map(move |i| if i + 1 == n { total } else { i as f64 * step })
}

/// Index of the sample whose arc length is closest to `target`; the lowest
/// index wins ties. `s` must be non-decreasing.
fn nearest_index(s: &[f64], target: f64) -> usize {
    let hi = s.partition_point(|&v| v < target);
    if hi == 0 {
        return 0;
    }
    let below = s[hi - 1];
    // First occurrence of the value just below the target.
    let lo = s.partition_point(|&v| v < below);
    if hi == s.len() {
        return lo;
    }
    if target - below <= s[hi] - target {
        lo
    } else {
        hi
    }
}

/// Arc-length targets mapped to a strictly increasing run of sample indices.
pub fn select_indices(s: &[f64], n_points: usize) -> Vec<usize> {
    let Some(&total) = s.last() else {
        return Vec::new();
    };
    let mut indices: Vec<usize> = Vec::with_capacity(n_points.min(s.len()));
    for target in linspace(total, n_points) {
        let idx = nearest_index(s, target);
        if indices.last() != Some(&idx) {
            indices.push(idx);
        }
    }
    indices
}

/// Resample one trajectory into gap-bounded segments of at most `n_points`
/// samples each.
///
/// Fewer than two input points, or `n_points < 2`, returns the trajectory
/// unchanged as the only segment.
pub fn resample_trajectory(traj: &Trajectory, n_points: usize, max_gap: f64) -> Vec<Trajectory> {
    if traj.len() < 2 || n_points < 2 {
        return vec![traj.clone()];
    }

    let s = cumulative_arc_length(traj);
    let indices = select_indices(&s, n_points);

    let mut segments = Vec::new();
    let mut current: Vec<usize> = Vec::with_capacity(indices.len());
    for &idx in &indices {
        if let Some(&prev) = current.last() {
            let gap = distance(&traj.points[prev].xy(), &traj.points[idx].xy());
            if gap > max_gap {
                segments.push(std::mem::take(&mut current));
            }
        }
        current.push(idx);
    }
    segments.push(current);

    let out: Vec<Trajectory> = segments
        .into_iter()
        .filter(|seg| seg.len() >= 2)
        .map(|seg| {
            Trajectory::new(
                traj.object_id,
                seg.into_iter().map(|i| traj.points[i]).collect(),
            )
        })
        .collect();

    debug!(
        "resample_trajectory: object={} in={} selected={} segments={}",
        traj.object_id,
        traj.len(),
        indices.len(),
        out.len()
    );
    out
}

/// Resample every trajectory and flatten the segments, keeping input order.
pub fn resample_all(trajectories: &[Trajectory], opts: &ResampleOptions) -> Vec<Trajectory> {
    trajectories
        .iter()
        .flat_map(|t| resample_trajectory(t, opts.n_points, opts.max_gap))
        .collect()
}
