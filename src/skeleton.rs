//! Skeleton reduction: object mask → thin centerline mask.
//!
//! The reduction is a collaborator of the pipeline, injected through
//! [`SkeletonReducer`], so callers (and tests) can substitute their own. The
//! mode is resolved once into a closed [`SkeletonMode`] when configuration is
//! parsed; an unknown name fails before any object is processed.
//!
//! Modes of the default [`MorphologyReducer`]:
//! - `skeletonize`: Zhang–Suen thinning of the object.
//! - `medial`: thinning ordered by Euclidean distance to the background.
//! - `outer`: the outer contour drawn as a thick band (no thinning).
//! - `stroke`: the outer contour drawn as a thinner band, then thinned.
use crate::error::{ExtractError, Result};
use crate::image::BinaryMask;
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub mod outline;
pub mod thinning;

pub const DEFAULT_OUTER_THICKNESS: u32 = 7;
pub const DEFAULT_STROKE_THICKNESS: u32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum SkeletonMode {
    #[default]
    Skeletonize,
    Medial,
    /// Outer contour band of the given line thickness.
    Outer { thickness: u32 },
    /// Outer contour band of the given thickness, thinned.
    Stroke { thickness: u32 },
}

impl SkeletonMode {
    pub fn outer() -> Self {
        SkeletonMode::Outer {
            thickness: DEFAULT_OUTER_THICKNESS,
        }
    }

    pub fn stroke() -> Self {
        SkeletonMode::Stroke {
            thickness: DEFAULT_STROKE_THICKNESS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SkeletonMode::Skeletonize => "skeletonize",
            SkeletonMode::Medial => "medial",
            SkeletonMode::Outer { .. } => "outer",
            SkeletonMode::Stroke { .. } => "stroke",
        }
    }
}

/// Accepts `skeletonize`, `medial`, `outer`, `stroke`, and `outer:<px>` /
/// `stroke:<px>` to override the band thickness.
impl FromStr for SkeletonMode {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, thickness) = match s.trim().split_once(':') {
            Some((name, t)) => {
                let t: u32 = t
                    .trim()
                    .parse()
                    .map_err(|_| ExtractError::UnknownSkeletonMode(s.to_string()))?;
                if t == 0 {
                    return Err(ExtractError::UnknownSkeletonMode(s.to_string()));
                }
                (name.trim(), Some(t))
            }
            None => (s.trim(), None),
        };
        match (name.to_ascii_lowercase().as_str(), thickness) {
            ("skeletonize", None) => Ok(SkeletonMode::Skeletonize),
            ("medial", None) => Ok(SkeletonMode::Medial),
            ("outer", t) => Ok(SkeletonMode::Outer {
                thickness: t.unwrap_or(DEFAULT_OUTER_THICKNESS),
            }),
            ("stroke", t) => Ok(SkeletonMode::Stroke {
                thickness: t.unwrap_or(DEFAULT_STROKE_THICKNESS),
            }),
            _ => Err(ExtractError::UnknownSkeletonMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for SkeletonMode {
    type Error = ExtractError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for SkeletonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkeletonMode::Outer { thickness } | SkeletonMode::Stroke { thickness } => {
                write!(f, "{}:{}", self.name(), thickness)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Object mask + mode → skeleton mask of the same size.
pub trait SkeletonReducer: Send + Sync {
    fn reduce(&self, mask: &BinaryMask, mode: SkeletonMode) -> Result<BinaryMask>;
}

/// Default reducer built on morphological thinning and `imageproc`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MorphologyReducer;

impl SkeletonReducer for MorphologyReducer {
    fn reduce(&self, mask: &BinaryMask, mode: SkeletonMode) -> Result<BinaryMask> {
        let skel = match mode {
            SkeletonMode::Skeletonize => thinning::zhang_suen(mask),
            SkeletonMode::Medial => thinning::medial_axis(mask),
            SkeletonMode::Outer { thickness } => outline::outer_band(mask, thickness),
            SkeletonMode::Stroke { thickness } => {
                thinning::zhang_suen(&outline::outer_band(mask, thickness))
            }
        };
        debug!(
            "MorphologyReducer::reduce mode={} in={} out={}",
            mode,
            mask.count(),
            skel.count()
        );
        Ok(skel)
    }
}
