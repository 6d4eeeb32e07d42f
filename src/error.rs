use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or running trajectory extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to open image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save image {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unknown skeleton mode `{0}` (expected skeletonize, medial, outer or stroke)")]
    UnknownSkeletonMode(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("mask size mismatch: expected {expected_w}x{expected_h}, got {actual_w}x{actual_h}")]
    DimensionMismatch {
        expected_w: usize,
        expected_h: usize,
        actual_w: usize,
        actual_h: usize,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error on {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
