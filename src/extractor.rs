//! Trajectory extraction pipeline.
//!
//! A [`TrajectoryExtractor`] owns the segmented objects of one image and
//! turns each of them into trajectories:
//!
//! 1. reduce the object mask to a skeleton (injected [`SkeletonReducer`]),
//! 2. skip objects whose skeleton is smaller than `min_skeleton_pixels`,
//! 3. decompose the skeleton into raw pixel paths,
//! 4. canonicalize each path (proximity filter, then orientation),
//! 5. attach a thickness-derived z-profile measured in the object mask.
//!
//! Objects are independent. With `parallel` set they run on the rayon pool;
//! output order is object order, then path order, either way. A failure in
//! one object is logged and recorded in the report; the others still run.
//!
//! ```no_run
//! use stroke_trajectory::{ExtractorParams, SkeletonMode, TrajectoryExtractor};
//! use std::path::Path;
//!
//! # fn main() -> stroke_trajectory::Result<()> {
//! let params = ExtractorParams::default().with_mode(SkeletonMode::stroke());
//! let extractor = TrajectoryExtractor::from_image_path(Path::new("glyphs.png"), params)?;
//! for traj in extractor.extract_resampled() {
//!     println!("object {} -> {} points", traj.object_id, traj.len());
//! }
//! # Ok(())
//! # }
//! ```
use crate::binarize::binarize_otsu;
use crate::canonical::canonicalize;
use crate::decompose::decompose_skeleton;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{stage, ExtractionReport, ObjectOutcome, ObjectReport, TimingBreakdown};
use crate::error::{ExtractError, Result};
use crate::image::io::load_grayscale_image;
use crate::image::{BinaryMask, ImageU8};
use crate::resample::resample_all;
use crate::segment::{ContourSegmenter, ObjectSegmenter};
use crate::skeleton::{MorphologyReducer, SkeletonReducer};
use crate::thickness::ThicknessProfiler;
use crate::types::{ObjectMask, Path, Trajectory};
use log::{debug, warn};
use rayon::prelude::*;
use std::time::Instant;

pub mod params;

pub use params::ExtractorParams;

pub struct TrajectoryExtractor {
    params: ExtractorParams,
    binary: BinaryMask,
    objects: Vec<ObjectMask>,
    reducer: Box<dyn SkeletonReducer>,
    setup_timings: TimingBreakdown,
}

/// Result of processing one object.
struct ObjectRun {
    report: ObjectReport,
    trajectories: Vec<Trajectory>,
    timings: TimingBreakdown,
}

impl ObjectRun {
    fn empty(report: ObjectReport, timings: TimingBreakdown) -> Self {
        Self {
            report,
            trajectories: Vec::new(),
            timings,
        }
    }
}

impl TrajectoryExtractor {
    /// Build from already segmented objects. All masks must share one size;
    /// their union stands in for the binary image.
    pub fn new(objects: Vec<ObjectMask>, params: ExtractorParams) -> Result<Self> {
        let binary = match objects.first() {
            Some(first) => {
                let mut union = BinaryMask::new(first.mask.w, first.mask.h);
                for object in &objects {
                    first.mask.ensure_same_size(&object.mask)?;
                    for [x, y] in object.mask.iter_set() {
                        union.set(x, y, true);
                    }
                }
                union
            }
            None => BinaryMask::new(0, 0),
        };
        Self::assemble(params, binary, objects, TimingBreakdown::default())
    }

    /// Segment a binary image with `segmenter`.
    pub fn from_binary(
        binary: BinaryMask,
        params: ExtractorParams,
        segmenter: &dyn ObjectSegmenter,
    ) -> Result<Self> {
        params.validate()?;
        let mut timings = TimingBreakdown::default();
        let objects = timings.time(stage::SEGMENT, || segmenter.segment(&binary))?;
        for object in &objects {
            binary.ensure_same_size(&object.mask)?;
        }
        Self::assemble(params, binary, objects, timings)
    }

    /// Otsu-binarize `gray` (dark strokes become foreground) and segment it
    /// with the default [`ContourSegmenter`].
    pub fn from_gray(gray: &ImageU8<'_>, params: ExtractorParams) -> Result<Self> {
        params.validate()?;
        gray.validate()?;
        let start = Instant::now();
        let binary = binarize_otsu(gray);
        let binarize_ms = elapsed_ms(start);
        let mut extractor = Self::from_binary(binary, params, &ContourSegmenter)?;
        extractor.setup_timings.add(stage::BINARIZE, binarize_ms);
        Ok(extractor)
    }

    /// Load a grayscale image from disk, then proceed as [`Self::from_gray`].
    pub fn from_image_path(path: &std::path::Path, params: ExtractorParams) -> Result<Self> {
        params.validate()?;
        let gray = load_grayscale_image(path)?;
        debug!(
            "TrajectoryExtractor::from_image_path {} w={} h={}",
            path.display(),
            gray.width(),
            gray.height()
        );
        Self::from_gray(&gray.as_view(), params)
    }

    fn assemble(
        params: ExtractorParams,
        binary: BinaryMask,
        objects: Vec<ObjectMask>,
        setup_timings: TimingBreakdown,
    ) -> Result<Self> {
        params.validate()?;
        debug!(
            "TrajectoryExtractor: objects={} mode={} parallel={}",
            objects.len(),
            params.skeleton_mode,
            params.parallel
        );
        Ok(Self {
            params,
            binary,
            objects,
            reducer: Box::new(MorphologyReducer),
            setup_timings,
        })
    }

    /// Replace the default [`MorphologyReducer`].
    pub fn with_reducer(mut self, reducer: impl SkeletonReducer + 'static) -> Self {
        self.reducer = Box::new(reducer);
        self
    }

    pub fn params(&self) -> &ExtractorParams {
        &self.params
    }

    pub fn objects(&self) -> &[ObjectMask] {
        &self.objects
    }

    pub fn binary(&self) -> &BinaryMask {
        &self.binary
    }

    /// Raw trajectories of every object, in object then path order.
    pub fn extract(&self) -> Vec<Trajectory> {
        let trajectories: Vec<Trajectory> = self
            .run_all()
            .into_iter()
            .flat_map(|run| run.trajectories)
            .collect();
        debug!(
            "TrajectoryExtractor::extract objects={} trajectories={}",
            self.objects.len(),
            trajectories.len()
        );
        trajectories
    }

    /// Raw trajectories resampled with `params.resample` and flattened.
    pub fn extract_resampled(&self) -> Vec<Trajectory> {
        resample_all(&self.extract(), &self.params.resample)
    }

    /// Raw trajectories plus per-object diagnostics and stage timings.
    pub fn extract_report(&self) -> ExtractionReport {
        let start = Instant::now();
        let runs = self.run_all();
        let mut timings = self.setup_timings.clone();
        let mut objects = Vec::with_capacity(runs.len());
        let mut trajectories = Vec::new();
        for run in runs {
            timings.merge(&run.timings);
            objects.push(run.report);
            trajectories.extend(run.trajectories);
        }
        let setup_ms: f64 = self.setup_timings.stages.iter().map(|s| s.elapsed_ms).sum();
        timings.total_ms = setup_ms + elapsed_ms(start);
        ExtractionReport {
            skeleton_mode: self.params.skeleton_mode.to_string(),
            objects,
            trajectories,
            timings,
        }
    }

    /// Skeleton of the whole binary image, without segmentation.
    pub fn skeleton_of_image(&self) -> Result<BinaryMask> {
        let skel = self
            .reducer
            .reduce(&self.binary, self.params.skeleton_mode)?;
        self.binary.ensure_same_size(&skel)?;
        Ok(skel)
    }

    fn run_all(&self) -> Vec<ObjectRun> {
        if self.params.parallel {
            self.objects
                .par_iter()
                .map(|object| self.run_object(object))
                .collect()
        } else {
            self.objects
                .iter()
                .map(|object| self.run_object(object))
                .collect()
        }
    }

    fn reduce(&self, object: &ObjectMask) -> Result<BinaryMask> {
        let skel = self.reducer.reduce(&object.mask, self.params.skeleton_mode)?;
        object.mask.ensure_same_size(&skel)?;
        Ok(skel)
    }

    fn run_object(&self, object: &ObjectMask) -> ObjectRun {
        let object_id = object.object_id;
        let mut timings = TimingBreakdown::default();
        let mut report = ObjectReport {
            object_id,
            mask_pixels: object.mask.count(),
            skeleton_pixels: 0,
            raw_paths: 0,
            kept_paths: 0,
            outcome: ObjectOutcome::Extracted,
        };

        let skel = match timings.time(stage::SKELETON, || self.reduce(object)) {
            Ok(skel) => skel,
            Err(err) => {
                warn!("object {object_id}: skeleton reduction failed: {err}");
                report.outcome = err.into();
                return ObjectRun::empty(report, timings);
            }
        };
        report.skeleton_pixels = skel.count();
        if report.skeleton_pixels < self.params.min_skeleton_pixels {
            debug!(
                "object {}: skeleton has {} pixels (< {}), skipped",
                object_id, report.skeleton_pixels, self.params.min_skeleton_pixels
            );
            report.outcome = ObjectOutcome::TooSmall;
            return ObjectRun::empty(report, timings);
        }

        let raw = timings.time(stage::DECOMPOSE, || decompose_skeleton(&skel));
        report.raw_paths = raw.len();

        let min_dist = self.params.min_dist;
        let paths: Vec<Path> = timings.time(stage::CANONICAL, || {
            raw.iter()
                .filter_map(|p| canonicalize(p, min_dist))
                .collect()
        });
        report.kept_paths = paths.len();

        let profiler = ThicknessProfiler::new(&object.mask, &self.params.thickness);
        let trajectories: Vec<Trajectory> = timings.time(stage::PROFILE, || {
            paths
                .iter()
                .map(|path| Trajectory::from_path(object_id, path, &profiler.z_profile(path)))
                .collect()
        });
        if trajectories.is_empty() {
            report.outcome = ObjectOutcome::NoPaths;
        }
        debug!(
            "object {}: skeleton={} raw_paths={} kept={}",
            object_id, report.skeleton_pixels, report.raw_paths, report.kept_paths
        );
        ObjectRun {
            report,
            trajectories,
            timings,
        }
    }
}

impl std::fmt::Debug for TrajectoryExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrajectoryExtractor")
            .field("params", &self.params)
            .field("objects", &self.objects.len())
            .finish()
    }
}

impl From<ExtractError> for ObjectOutcome {
    fn from(err: ExtractError) -> Self {
        ObjectOutcome::Failed {
            reason: err.to_string(),
        }
    }
}
