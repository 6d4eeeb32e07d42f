use std::env;
use std::path::Path;
use stroke_trajectory::{
    to_records, ExtractorParams, ResampleOptions, SkeletonMode, TrajectoryExtractor,
    TrajectoryRecord,
};

/// Rows printed per path.
const PREVIEW_ROWS: usize = 5;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let image_path = env::args().nth(1).ok_or_else(usage)?;

    let mut params = ExtractorParams::default().with_mode(SkeletonMode::stroke());
    params.thickness.z_min = 0.5;
    params.thickness.z_max = 3.0;
    params.resample = ResampleOptions {
        n_points: 30,
        max_gap: 15.0,
    };

    let extractor = TrajectoryExtractor::from_image_path(Path::new(&image_path), params)
        .map_err(|e| e.to_string())?;
    let records = to_records(&extractor.extract_resampled());

    for (path_index, rows) in records
        .chunk_by(|a, b| a.path_index == b.path_index)
        .enumerate()
    {
        println!("--- Path {path_index} ---");
        print_rows(rows);
    }
    Ok(())
}

fn print_rows(rows: &[TrajectoryRecord]) {
    println!("{:>4} {:>9} {:>8} {:>8} {:>7}", "", "object_id", "x", "y", "z");
    for (i, row) in rows.iter().take(PREVIEW_ROWS).enumerate() {
        println!(
            "{:>4} {:>9} {:>8.1} {:>8.1} {:>7.3}",
            i, row.object_id, row.x, row.y, row.z
        );
    }
}

fn usage() -> String {
    "Usage: stroke-trajectory <image_path>".to_string()
}
