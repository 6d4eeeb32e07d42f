#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod image;
pub mod types;

// Pipeline stages, usable on their own.
pub mod binarize;
pub mod canonical;
pub mod decompose;
pub mod resample;
pub mod segment;
pub mod skeleton;
pub mod thickness;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{ExtractError, Result};
pub use crate::extractor::{ExtractorParams, TrajectoryExtractor};
pub use crate::skeleton::{SkeletonMode, SkeletonReducer};
pub use crate::segment::ObjectSegmenter;
pub use crate::types::{to_records, ObjectMask, Trajectory, TrajectoryPoint, TrajectoryRecord};

pub use crate::diagnostics::{ExtractionReport, ObjectOutcome, ObjectReport};
pub use crate::resample::{resample_all, resample_trajectory, ResampleOptions};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use stroke_trajectory::prelude::*;
///
/// # fn main() -> stroke_trajectory::Result<()> {
/// let (w, h) = (64usize, 32usize);
/// let gray = vec![255u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let extractor = TrajectoryExtractor::from_gray(&img, ExtractorParams::default())?;
/// for row in to_records(&extractor.extract_resampled()) {
///     println!("{} {} {:.1} {:.1} {:.2}", row.object_id, row.path_index, row.x, row.y, row.z);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{BinaryMask, ImageU8};
    pub use crate::{
        to_records, ExtractorParams, SkeletonMode, Trajectory, TrajectoryExtractor,
    };
}
