//! Pipeline tests with scripted input and synthetic correspondences.

use std::collections::VecDeque;

use calib_video::core::{object_grid, CameraIntrinsics, Key, PatternSize, ViewMode};
use calib_video::{
    calibrate, select_all_frames, select_frames_interactively, CalibrationSamples, FrameSink,
    FrameSource, PatternDetector, PipelineError, PointLists, Result, SolveOptions,
    UndistortionPlayer, Undistorter,
};
use nalgebra::{Matrix3, Rotation3, Vector3};
use opencv::core::{self, Mat, Point2f, Point3f, Scalar, Size, Vector, CV_8UC1, CV_8UC3};
use opencv::prelude::*;

/// In-memory frame stream.
struct VecSource {
    frames: VecDeque<Mat>,
}

impl VecSource {
    fn new(count: usize) -> Self {
        let frames = (0..count)
            .map(|i| {
                Mat::new_rows_cols_with_default(48, 64, CV_8UC3, Scalar::all((i % 200) as f64))
                    .unwrap()
            })
            .collect();
        Self { frames }
    }
}

impl FrameSource for VecSource {
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        Ok(self.frames.pop_front())
    }
}

/// Display stub fed from a key script; records how many frames were shown.
struct ScriptedSink {
    keys: VecDeque<Option<Key>>,
    shown: usize,
}

impl ScriptedSink {
    fn new(keys: impl IntoIterator<Item = Option<Key>>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            shown: 0,
        }
    }
}

impl FrameSink for ScriptedSink {
    fn show(&mut self, _frame: &Mat) -> Result<()> {
        self.shown += 1;
        Ok(())
    }

    fn wait_key(&mut self, _delay_ms: i32) -> Result<Option<Key>> {
        Ok(self.keys.pop_front().unwrap_or(None))
    }
}

#[test]
fn select_all_accepts_every_frame_without_prompting() {
    let mut source = VecSource::new(7);
    let selected = select_all_frames(&mut source).unwrap();
    assert_eq!(selected.len(), 7);
}

#[test]
fn empty_stream_is_a_fatal_selection_error() {
    let mut source = VecSource::new(0);
    assert!(matches!(
        select_all_frames(&mut source),
        Err(PipelineError::EmptySelection)
    ));
}

#[test]
fn interactive_commit_and_early_exit() {
    let mut source = VecSource::new(5);
    // Space previews frame 1, Enter commits it, Escape ends on frame 2.
    let mut sink = ScriptedSink::new([Some(Key::Space), Some(Key::Enter), Some(Key::Escape)]);
    let detector = PatternDetector::new(PatternSize::new(10, 7));
    let selected = select_frames_interactively(&mut source, &mut sink, &detector, 10).unwrap();
    assert_eq!(selected.len(), 1);
    // Two browsing frames plus one preview.
    assert_eq!(sink.shown, 3);
}

#[test]
fn discarding_every_preview_leaves_nothing_selected() {
    let mut source = VecSource::new(2);
    let mut sink = ScriptedSink::new([
        Some(Key::Space),
        Some(Key::Other(113)),
        Some(Key::Escape),
    ]);
    let detector = PatternDetector::new(PatternSize::new(10, 7));
    assert!(matches!(
        select_frames_interactively(&mut source, &mut sink, &detector, 10),
        Err(PipelineError::EmptySelection)
    ));
}

#[test]
fn frames_without_a_board_are_skipped_and_fatal_in_aggregate() {
    let mut samples = CalibrationSamples::new(PatternSize::new(10, 7), 0.025);
    let frames: Vec<Mat> = (0..3)
        .map(|_| Mat::new_rows_cols_with_default(48, 64, CV_8UC3, Scalar::all(40.0)).unwrap())
        .collect();
    samples.observe_all(&frames).unwrap();
    assert!(samples.is_empty());
    assert_eq!(samples.skipped(), 3);
    assert!(matches!(
        samples.into_point_lists(),
        Err(PipelineError::NoDetections)
    ));
}

fn ground_truth_k() -> Matrix3<f64> {
    Matrix3::new(800.0, 0.0, 320.0, 0.0, 800.0, 240.0, 0.0, 0.0, 1.0)
}

/// Pinhole projection of the board template under a known pose.
fn project_view(k: &Matrix3<f64>, rot: &Rotation3<f64>, tvec: &Vector3<f64>) -> Vector<Point2f> {
    object_grid(PatternSize::new(10, 7), 0.025)
        .iter()
        .map(|p| {
            let pc = rot * Vector3::new(p.x as f64, p.y as f64, p.z as f64) + tvec;
            let u = k[(0, 0)] * pc.x / pc.z + k[(0, 2)];
            let v = k[(1, 1)] * pc.y / pc.z + k[(1, 2)];
            Point2f::new(u as f32, v as f32)
        })
        .collect()
}

fn synthetic_point_lists() -> PointLists {
    let k = ground_truth_k();
    let template: Vector<Point3f> = object_grid(PatternSize::new(10, 7), 0.025)
        .iter()
        .map(|p| Point3f::new(p.x, p.y, p.z))
        .collect();

    let views = [
        (0.0, 0.0, 0.60),
        (0.25, 0.0, 0.62),
        (-0.25, 0.0, 0.58),
        (0.0, 0.25, 0.61),
        (0.0, -0.25, 0.59),
        (0.15, 0.20, 0.63),
        (-0.20, -0.15, 0.57),
    ];

    let mut object_points = Vector::<Vector<Point3f>>::new();
    let mut image_points = Vector::<Vector<Point2f>>::new();
    for (rx, ry, z) in views {
        let rot = Rotation3::from_euler_angles(rx, ry, 0.0);
        let tvec = Vector3::new(-0.11, -0.075, z);
        object_points.push(template.clone());
        image_points.push(project_view(&k, &rot, &tvec));
    }
    PointLists {
        object_points,
        image_points,
        image_size: Size::new(640, 480),
    }
}

#[test]
fn solver_recovers_synthetic_intrinsics() {
    let points = synthetic_point_lists();
    let view_count = points.object_points.len();
    let outcome = calibrate(&points, &SolveOptions::default()).unwrap();

    assert!(outcome.rms >= 0.0);
    assert!(outcome.rms < 0.1, "rms = {}", outcome.rms);
    assert_eq!(outcome.poses.len(), view_count);

    let k = outcome.intrinsics.camera_matrix;
    let truth = ground_truth_k();
    for (r, c) in [(0, 0), (1, 1), (0, 2), (1, 2)] {
        assert!(
            (k[(r, c)] - truth[(r, c)]).abs() < 0.5,
            "K[{r},{c}] = {}, expected {}",
            k[(r, c)],
            truth[(r, c)]
        );
    }
    // Homogeneous row is fixed by construction.
    assert_eq!(k[(2, 0)], 0.0);
    assert_eq!(k[(2, 1)], 0.0);
    assert_eq!(k[(2, 2)], 1.0);

    // Perfect pinhole data: the distortion estimate stays near zero.
    assert!(outcome.intrinsics.dist_coeffs.iter().all(|d| d.abs() < 0.05));
}

#[test]
fn zero_distortion_remap_is_identity() {
    let intrinsics = CameraIntrinsics {
        camera_matrix: Matrix3::new(100.0, 0.0, 32.0, 0.0, 100.0, 24.0, 0.0, 0.0, 1.0),
        dist_coeffs: vec![0.0; 5],
    };
    let mut undistorter = Undistorter::new(&intrinsics).unwrap();

    let data: Vec<u8> = (0..48 * 64).map(|i| (i % 251) as u8).collect();
    let src = Mat::new_rows_cols_with_data(48, 64, &data).unwrap().try_clone().unwrap();

    // Second call exercises the cached maps.
    for _ in 0..2 {
        let out = undistorter.apply(&src).unwrap();
        assert_eq!(out.size().unwrap(), src.size().unwrap());
        assert_eq!(out.typ(), CV_8UC1);
        let mut diff = Mat::default();
        core::absdiff(&src, &out, &mut diff).unwrap();
        assert_eq!(core::count_non_zero(&diff).unwrap(), 0);
    }
}

#[test]
fn playback_toggles_and_exits_on_escape() {
    let intrinsics = CameraIntrinsics {
        camera_matrix: Matrix3::new(100.0, 0.0, 32.0, 0.0, 100.0, 24.0, 0.0, 0.0, 1.0),
        dist_coeffs: vec![0.0; 5],
    };
    let mut player = UndistortionPlayer::new(&intrinsics, 10).unwrap();

    let mut source = VecSource::new(4);
    let mut sink = ScriptedSink::new([Some(Key::Tab), None, Some(Key::Escape)]);
    let state = player.play(&mut source, &mut sink, None).unwrap();

    // Tab on frame 1 switches to the original view; Escape stops on frame 3.
    assert_eq!(state.view, ViewMode::Original);
    assert!(!state.paused);
    assert_eq!(sink.shown, 3);
}
