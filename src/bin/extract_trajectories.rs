use log::info;
use std::env;
use std::path::Path;
use std::time::Instant;
use stroke_trajectory::config::load_config;
use stroke_trajectory::diagnostics::stage;
use stroke_trajectory::image::io::{save_mask_png, write_json_file};
use stroke_trajectory::{resample_all, to_records, ExtractionReport, TrajectoryExtractor};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;

    let extractor = TrajectoryExtractor::from_image_path(&config.input, config.extractor)
        .map_err(|e| e.to_string())?;
    let mut report = extractor.extract_report();

    if config.resampled {
        let start = Instant::now();
        report.trajectories = resample_all(&report.trajectories, &extractor.params().resample);
        let ms = start.elapsed().as_secs_f64() * 1000.0;
        report.timings.add(stage::RESAMPLE, ms);
        report.timings.total_ms += ms;
    }

    let records = to_records(&report.trajectories);
    write_json_file(&config.output.trajectories_json, &records).map_err(|e| e.to_string())?;

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report).map_err(|e| e.to_string())?;
    }
    if let Some(path) = &config.output.skeleton_png {
        let skeleton = extractor.skeleton_of_image().map_err(|e| e.to_string())?;
        save_mask_png(&skeleton, path).map_err(|e| e.to_string())?;
        info!("skeleton written to {}", path.display());
    }

    print_summary(&report, records.len());
    println!(
        "Trajectories written to {}",
        config.output.trajectories_json.display()
    );
    Ok(())
}

fn print_summary(report: &ExtractionReport, rows: usize) {
    println!(
        "mode={} objects={} extracted={} paths={} rows={}",
        report.skeleton_mode,
        report.objects.len(),
        report.extracted_objects(),
        report.trajectories.len(),
        rows
    );
    for stage in &report.timings.stages {
        println!("  {:<10} {:>8.2} ms", stage.label, stage.elapsed_ms);
    }
    println!("  {:<10} {:>8.2} ms", "total", report.timings.total_ms);
}

fn usage() -> String {
    "Usage: extract_trajectories <config.json>".to_string()
}
