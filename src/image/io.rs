//! Disk I/O for input rasters, debug masks and JSON outputs.
//!
//! Every failure carries the offending path in its [`ExtractError`].
use super::{BinaryMask, ImageU8};
use crate::error::{ExtractError, Result};
use image::GrayImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned grayscale image as loaded from disk.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    inner: GrayImage,
}

impl GrayImageU8 {
    pub fn width(&self) -> usize {
        self.inner.width() as usize
    }

    pub fn height(&self) -> usize {
        self.inner.height() as usize
    }

    /// Packed view for the pipeline.
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width(),
            h: self.height(),
            stride: self.width(),
            data: self.inner.as_raw(),
        }
    }
}

impl From<GrayImage> for GrayImageU8 {
    fn from(inner: GrayImage) -> Self {
        Self { inner }
    }
}

/// Decode any supported format and convert to 8-bit luma.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8> {
    let decoded = image::open(path).map_err(|source| ExtractError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decoded.into_luma8().into())
}

/// Save a mask as a grayscale PNG (foreground = 255).
pub fn save_mask_png(mask: &BinaryMask, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    mask.to_gray_image()
        .save(path)
        .map_err(|source| ExtractError::ImageSave {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| ExtractError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| ExtractError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
