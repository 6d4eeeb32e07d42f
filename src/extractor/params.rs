//! Parameters for [`super::TrajectoryExtractor`].
//!
//! All structs deserialize from JSON with every field optional; missing
//! fields take the defaults below. Values are checked once by
//! [`ExtractorParams::validate`] when the extractor is built.
use crate::error::{ExtractError, Result};
use crate::resample::ResampleOptions;
use crate::skeleton::SkeletonMode;
use crate::thickness::ThicknessOptions;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ExtractorParams {
    /// How object masks are reduced to skeletons.
    pub skeleton_mode: SkeletonMode,
    /// Height range and ray bound for z-profiles.
    pub thickness: ThicknessOptions,
    /// Minimum spacing between consecutive kept path points (pixels).
    pub min_dist: f64,
    /// Objects whose skeleton has fewer set pixels are skipped.
    pub min_skeleton_pixels: usize,
    /// Used by resampled extraction.
    pub resample: ResampleOptions,
    /// Process objects on the rayon pool.
    pub parallel: bool,
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            skeleton_mode: SkeletonMode::default(),
            thickness: ThicknessOptions::default(),
            min_dist: 2.0,
            min_skeleton_pixels: 10,
            resample: ResampleOptions::default(),
            parallel: false,
        }
    }
}

impl ExtractorParams {
    pub fn with_mode(mut self, mode: SkeletonMode) -> Self {
        self.skeleton_mode = mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let ThicknessOptions { z_min, z_max, .. } = self.thickness;
        if !z_min.is_finite() || !z_max.is_finite() {
            return Err(ExtractError::InvalidParams(format!(
                "z range must be finite (z_min={z_min}, z_max={z_max})"
            )));
        }
        if z_min > z_max {
            return Err(ExtractError::InvalidParams(format!(
                "z_min ({z_min}) exceeds z_max ({z_max})"
            )));
        }
        if !self.min_dist.is_finite() || self.min_dist < 0.0 {
            return Err(ExtractError::InvalidParams(format!(
                "min_dist must be finite and non-negative, got {}",
                self.min_dist
            )));
        }
        let max_gap = self.resample.max_gap;
        if max_gap.is_nan() || max_gap < 0.0 {
            return Err(ExtractError::InvalidParams(format!(
                "max_gap must be non-negative, got {max_gap}"
            )));
        }
        Ok(())
    }
}
