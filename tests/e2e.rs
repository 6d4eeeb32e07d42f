mod common;

use common::synthetic_image::{canvas_u8, in_rect, in_ring, in_wedge, two_bars_u8, PAPER};
use nalgebra::{distance, Point2};
use stroke_trajectory::image::ImageU8;
use stroke_trajectory::{
    to_records, ExtractError, ExtractorParams, ObjectOutcome, ResampleOptions, SkeletonMode,
    Trajectory, TrajectoryExtractor,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn view(buffer: &[u8], width: usize, height: usize) -> ImageU8<'_> {
    ImageU8 {
        w: width,
        h: height,
        stride: width,
        data: buffer,
    }
}

fn x_span(traj: &Trajectory) -> f64 {
    let xs = traj.points.iter().map(|p| p.x);
    let lo = xs.clone().fold(f64::INFINITY, f64::min);
    let hi = xs.fold(f64::NEG_INFINITY, f64::max);
    hi - lo
}

#[test]
fn two_bars_give_two_objects_with_centerlines() {
    init_logger();
    let (width, height) = (80usize, 60usize);
    let buffer = two_bars_u8(width, height);
    let extractor =
        TrajectoryExtractor::from_gray(&view(&buffer, width, height), ExtractorParams::default())
            .expect("extractor");
    assert_eq!(extractor.objects().len(), 2);

    let trajs = extractor.extract();
    assert!(!trajs.is_empty());
    for id in 0..2 {
        let longest = trajs
            .iter()
            .filter(|t| t.object_id == id)
            .map(x_span)
            .fold(0.0, f64::max);
        assert!(longest > 30.0, "object {id} centerline too short: {longest}");
    }

    for traj in &trajs {
        let rows = if traj.object_id == 0 { 10.0..16.0 } else { 40.0..48.0 };
        for p in &traj.points {
            assert!(rows.contains(&p.y), "point {p:?} outside its bar");
            assert!((0.5..=3.0).contains(&p.z), "z={} out of range", p.z);
        }
        for w in traj.points.windows(2) {
            assert!(distance(&w[0].xy(), &w[1].xy()) >= 2.0);
        }
        assert!(traj.points[0].x.abs() <= traj.points[traj.len() - 1].x.abs());
    }
}

#[test]
fn thicker_end_of_a_wedge_sits_higher() {
    init_logger();
    let (width, height) = (120usize, 60usize);
    let buffer = canvas_u8(width, height, |x, y| in_wedge(x, y, 10, 110, 30.0, 2.0, 24.0));
    // Rays long enough for the half-height, short enough that the
    // horizontal rays saturate along most of the wedge.
    let mut params = ExtractorParams::default();
    params.thickness.max_search = 14;
    let extractor =
        TrajectoryExtractor::from_gray(&view(&buffer, width, height), params).expect("extractor");
    let trajs = extractor.extract();
    let main = trajs
        .iter()
        .max_by(|a, b| x_span(a).total_cmp(&x_span(b)))
        .expect("at least one trajectory");
    assert!(x_span(main) > 50.0);

    let tip = main
        .points
        .iter()
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .expect("points");
    let base = main
        .points
        .iter()
        .max_by(|a, b| a.x.total_cmp(&b.x))
        .expect("points");
    assert!(
        base.z > tip.z,
        "expected thick end higher: tip z={} base z={}",
        tip.z,
        base.z
    );
}

#[test]
fn stroke_mode_traces_ring_outline() {
    init_logger();
    let (width, height) = (80usize, 80usize);
    let buffer = canvas_u8(width, height, |x, y| in_ring(x, y, 40.0, 40.0, 12.0, 18.0));
    let params = ExtractorParams::default().with_mode(SkeletonMode::stroke());
    let extractor =
        TrajectoryExtractor::from_gray(&view(&buffer, width, height), params).expect("extractor");
    assert_eq!(extractor.objects().len(), 1);

    let trajs = extractor.extract();
    assert!(trajs.iter().any(|t| t.len() >= 10));
    let center = Point2::new(40.0, 40.0);
    for p in trajs.iter().flat_map(|t| t.points.iter()) {
        let r = distance(&p.xy(), &center);
        assert!((14.0..=22.0).contains(&r), "point {p:?} at radius {r}");
    }
}

#[test]
fn resampled_segments_respect_count_and_gap() {
    init_logger();
    let (width, height) = (80usize, 60usize);
    let buffer = two_bars_u8(width, height);
    let params = ExtractorParams {
        resample: ResampleOptions {
            n_points: 10,
            max_gap: 15.0,
        },
        ..Default::default()
    };
    let extractor =
        TrajectoryExtractor::from_gray(&view(&buffer, width, height), params).expect("extractor");
    let segments = extractor.extract_resampled();
    assert!(!segments.is_empty());
    for seg in &segments {
        assert!((2..=10).contains(&seg.len()));
        for w in seg.points.windows(2) {
            assert!(distance(&w[0].xy(), &w[1].xy()) <= 15.0);
        }
    }

    let records = to_records(&segments);
    assert_eq!(records.len(), segments.iter().map(Trajectory::len).sum::<usize>());
    assert!(records.windows(2).all(|w| w[1].path_index >= w[0].path_index));

    let rows: serde_json::Value = serde_json::to_value(&records).expect("json");
    let first = &rows[0];
    assert_eq!(first["object_id"], records[0].object_id);
    assert_eq!(first["path_index"], 0);
}

#[test]
fn parallel_run_matches_sequential() {
    let (width, height) = (80usize, 60usize);
    let buffer = two_bars_u8(width, height);
    let image = view(&buffer, width, height);
    let seq = TrajectoryExtractor::from_gray(&image, ExtractorParams::default())
        .expect("extractor")
        .extract();
    let par = TrajectoryExtractor::from_gray(
        &image,
        ExtractorParams {
            parallel: true,
            ..Default::default()
        },
    )
    .expect("extractor")
    .extract();
    assert_eq!(seq, par);
}

#[test]
fn report_serializes_per_object_diagnostics() {
    let (width, height) = (80usize, 60usize);
    let mut buffer = two_bars_u8(width, height);
    // A speck too small to yield a skeleton worth keeping.
    for (x, y) in [(75usize, 55usize), (76, 55)] {
        buffer[y * width + x] = common::synthetic_image::INK;
    }
    let extractor =
        TrajectoryExtractor::from_gray(&view(&buffer, width, height), ExtractorParams::default())
            .expect("extractor");
    let report = extractor.extract_report();
    assert_eq!(report.objects.len(), 3);
    assert_eq!(report.extracted_objects(), 2);
    assert_eq!(report.objects[2].outcome, ObjectOutcome::TooSmall);
    assert!(report.timings.total_ms >= 0.0);

    let json = serde_json::to_string(&report).expect("json");
    assert!(json.contains("\"objectId\""));
    assert!(json.contains("\"skeletonPixels\""));
    assert!(json.contains("\"tooSmall\""));
}

#[test]
fn whole_image_skeleton_matches_image_size() {
    let (width, height) = (80usize, 60usize);
    let buffer = canvas_u8(width, height, |x, y| in_rect(x, y, 5, 20, 75, 30));
    let extractor =
        TrajectoryExtractor::from_gray(&view(&buffer, width, height), ExtractorParams::default())
            .expect("extractor");
    let skel = extractor.skeleton_of_image().expect("skeleton");
    assert_eq!((skel.w, skel.h), (width, height));
    assert!(skel.count() > 40 && skel.count() < 200);
}

#[test]
fn image_file_round_trip() {
    init_logger();
    let (width, height) = (80usize, 60usize);
    let buffer = two_bars_u8(width, height);
    let dir = std::env::temp_dir().join(format!("stroke-trajectory-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("bars.png");
    image::GrayImage::from_raw(width as u32, height as u32, buffer.clone())
        .expect("buffer size")
        .save(&path)
        .expect("save png");

    let from_file = TrajectoryExtractor::from_image_path(&path, ExtractorParams::default())
        .expect("extractor")
        .extract();
    let from_memory =
        TrajectoryExtractor::from_gray(&view(&buffer, width, height), ExtractorParams::default())
            .expect("extractor")
            .extract();
    assert_eq!(from_file, from_memory);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_image_is_a_load_error() {
    let err = TrajectoryExtractor::from_image_path(
        std::path::Path::new("/nonexistent/stroke.png"),
        ExtractorParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ExtractError::ImageLoad { .. }));
}

#[test]
fn blank_page_has_no_objects() {
    let (width, height) = (32usize, 24usize);
    let buffer = canvas_u8(width, height, |_, _| false);
    let extractor =
        TrajectoryExtractor::from_gray(&view(&buffer, width, height), ExtractorParams::default())
            .expect("extractor");
    assert!(extractor.objects().is_empty());
    assert!(extractor.extract_resampled().is_empty());
}

#[test]
fn truncated_buffer_is_rejected() {
    let buffer = vec![PAPER; 10];
    let image = ImageU8 {
        w: 8,
        h: 8,
        stride: 8,
        data: &buffer,
    };
    let err = TrajectoryExtractor::from_gray(&image, ExtractorParams::default()).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidParams(_)));
}
