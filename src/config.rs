//! JSON configuration for the `extract_trajectories` tool.
//!
//! ```json
//! {
//!   "input": "data/glyphs.png",
//!   "extractor": {
//!     "skeleton_mode": "stroke",
//!     "thickness": { "z_min": 0.5, "z_max": 3.0 },
//!     "resample": { "n_points": 30, "max_gap": 15.0 }
//!   },
//!   "output": {
//!     "trajectories_json": "out/trajectories.json",
//!     "skeleton_png": "out/skeleton.png"
//!   }
//! }
//! ```
use crate::error::{ExtractError, Result};
use crate::extractor::ExtractorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ExtractToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub extractor: ExtractorParams,
    /// Resample trajectories before writing them.
    #[serde(default = "default_resampled")]
    pub resampled: bool,
    pub output: ExtractOutputConfig,
}

fn default_resampled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ExtractOutputConfig {
    /// Flat `{object_id, path_index, x, y, z}` rows.
    pub trajectories_json: PathBuf,
    /// Per-object diagnostics and stage timings.
    #[serde(default)]
    pub report_json: Option<PathBuf>,
    /// Whole-image skeleton as a 0/255 PNG.
    #[serde(default)]
    pub skeleton_png: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ExtractToolConfig> {
    let data = fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&data, path)
}

fn parse_config(data: &str, path: &Path) -> Result<ExtractToolConfig> {
    let config: ExtractToolConfig =
        serde_json::from_str(data).map_err(|source| ExtractError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    config.extractor.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::SkeletonMode;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(
            r#"{ "input": "a.png", "output": { "trajectories_json": "t.json" } }"#,
            Path::new("cfg.json"),
        )
        .unwrap();
        assert_eq!(cfg.input, PathBuf::from("a.png"));
        assert!(cfg.resampled);
        assert_eq!(cfg.extractor.skeleton_mode, SkeletonMode::Skeletonize);
        assert!(cfg.output.skeleton_png.is_none());
    }

    #[test]
    fn unknown_mode_is_a_json_error() {
        let err = parse_config(
            r#"{ "input": "a.png", "extractor": { "skeleton_mode": "fuzzy" },
                 "output": { "trajectories_json": "t.json" } }"#,
            Path::new("cfg.json"),
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::Json { .. }));
        assert!(err.to_string().contains("fuzzy"));
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let err = parse_config(
            r#"{ "input": "a.png", "extractor": { "thickness": { "z_min": 3.0, "z_max": 1.0 } },
                 "output": { "trajectories_json": "t.json" } }"#,
            Path::new("cfg.json"),
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidParams(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Path::new("/nonexistent/stroke-trajectory.json")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }
}
