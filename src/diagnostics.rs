//! Structured report of one extraction run.
//!
//! Mirrors what [`crate::TrajectoryExtractor::extract`] does, object by
//! object, so tools can dump it as JSON next to the trajectories.
use crate::types::Trajectory;
use serde::Serialize;

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};

/// Stage labels used in [`TimingBreakdown`].
pub mod stage {
    pub const BINARIZE: &str = "binarize";
    pub const SEGMENT: &str = "segment";
    pub const SKELETON: &str = "skeleton";
    pub const DECOMPOSE: &str = "decompose";
    pub const CANONICAL: &str = "canonical";
    pub const PROFILE: &str = "profile";
    pub const RESAMPLE: &str = "resample";
}

/// What happened to one object.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ObjectOutcome {
    /// At least one trajectory was produced.
    Extracted,
    /// Skeleton smaller than the configured minimum.
    TooSmall,
    /// Every path collapsed below two points.
    NoPaths,
    /// The skeleton reducer failed; the object was skipped.
    Failed { reason: String },
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReport {
    pub object_id: usize,
    pub mask_pixels: usize,
    pub skeleton_pixels: usize,
    /// Paths emitted by the decomposer, including single-pixel ones.
    pub raw_paths: usize,
    /// Paths that survived canonicalization.
    pub kept_paths: usize,
    pub outcome: ObjectOutcome,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub skeleton_mode: String,
    pub objects: Vec<ObjectReport>,
    pub trajectories: Vec<Trajectory>,
    pub timings: TimingBreakdown,
}

impl ExtractionReport {
    pub fn extracted_objects(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| o.outcome == ObjectOutcome::Extracted)
            .count()
    }

    pub fn total_points(&self) -> usize {
        self.trajectories.iter().map(Trajectory::len).sum()
    }
}
