mod common;

use common::synthetic_image::{
    GRAY, busy, checkerboard, saturated_patch, textured_block, uniform,
};
use image::DynamicImage;
use smartcrop::{
    CropSettings, Error, MemorySink, Rect, RecordingLog, SmartCropAnalyzer, smart_crop,
};

fn analyzer_with(f: impl FnOnce(&mut CropSettings)) -> SmartCropAnalyzer {
    let mut settings = CropSettings::default();
    f(&mut settings);
    SmartCropAnalyzer::with_settings(settings)
}

fn aspect_close(rect: &Rect, tw: u32, th: u32) -> bool {
    let lhs = rect.width() as f64 * th as f64;
    let rhs = rect.height() as f64 * tw as f64;
    (lhs - rhs).abs() <= (tw.max(th) as f64) * 2.0
}

#[test]
fn zero_target_is_invalid() {
    let img = DynamicImage::ImageRgba8(uniform(32, 32, GRAY));
    assert!(matches!(smart_crop(&img, 0, 0), Err(Error::InvalidDimensions)));
}

#[test]
fn empty_image_has_no_candidates() {
    let img = DynamicImage::new_rgba8(0, 0);
    assert!(matches!(
        smart_crop(&img, 10, 10),
        Err(Error::NoCandidates { .. })
    ));
}

#[test]
fn oversized_scale_range_has_no_candidates() {
    let analyzer = analyzer_with(|s| {
        s.params.max_scale = 2.0;
        s.params.min_scale = 1.5;
    });
    let img = DynamicImage::ImageRgba8(uniform(100, 100, GRAY));
    match analyzer.analyze(&img, 50, 50) {
        Err(Error::NoCandidates {
            image_width,
            target_width,
            ..
        }) => {
            assert_eq!(image_width, 100);
            assert_eq!(target_width, 50);
        }
        other => panic!("expected NoCandidates, got {other:?}"),
    }
}

#[test]
fn heavily_penalised_candidates_still_produce_a_crop() {
    // a 16x1 crop on a busy 16x4000 strip leaves almost every sample outside
    // the crop, driving all totals far below -1
    let img = DynamicImage::ImageRgba8(checkerboard(16, 4000, 1, [0, 255, 0, 255], [0, 0, 0, 255]));
    let mut crops = Vec::new();
    for parallel in [true, false] {
        let analysis = analyzer_with(|s| s.parallel = parallel)
            .analyze(&img, 16, 1)
            .unwrap();
        assert_eq!(analysis.candidates, 500);
        assert!(analysis.score.total < -1.0, "{}", analysis.score.total);
        assert_eq!((analysis.crop.width(), analysis.crop.height()), (16, 1));
        assert!(Rect::new(0, 0, 16, 4000).contains_rect(&analysis.crop));
        crops.push(analysis.crop);
    }
    assert_eq!(crops[0], crops[1]);
}

#[test]
fn uniform_image_picks_first_candidate() {
    let img = DynamicImage::ImageRgba8(uniform(200, 200, GRAY));
    let analysis = SmartCropAnalyzer::new().analyze(&img, 20, 20).unwrap();
    assert_eq!(analysis.crop, Rect::new(0, 0, 200, 200));
    assert_eq!(analysis.score.total, 0.0);
    assert_eq!(analysis.candidates, 10);
}

#[test]
fn crop_is_canonical_and_inside_the_image() {
    let img = DynamicImage::ImageRgba8(busy(240, 160));
    let bounds = Rect::new(0, 0, 240, 160);
    for (tw, th) in [(100, 100), (16, 9), (9, 16), (300, 50), (0, 80), (120, 0), (1, 1)] {
        let rect = smart_crop(&img, tw, th).unwrap();
        assert_eq!(rect, rect.canon());
        assert!(!rect.is_empty(), "{tw}x{th} -> {rect}");
        assert!(bounds.contains_rect(&rect), "{tw}x{th} -> {rect}");
        if tw > 0 && th > 0 {
            assert!(aspect_close(&rect, tw, th), "{tw}x{th} -> {rect}");
        }
    }
}

#[test]
fn analysis_is_deterministic() {
    let img = DynamicImage::ImageRgba8(busy(180, 140));
    let analyzer = SmartCropAnalyzer::new();
    let a = analyzer.analyze(&img, 64, 48).unwrap();
    let b = analyzer.analyze(&img, 64, 48).unwrap();
    assert_eq!(a.crop, b.crop);
    assert_eq!(a.analysis_crop, b.analysis_crop);
    assert_eq!(a.score, b.score);
}

#[test]
fn parallel_matches_sequential() {
    let img = DynamicImage::ImageRgba8(busy(220, 150));
    let par = analyzer_with(|s| s.parallel = true)
        .analyze(&img, 80, 60)
        .unwrap();
    let seq = analyzer_with(|s| s.parallel = false)
        .analyze(&img, 80, 60)
        .unwrap();
    assert_eq!(par.crop, seq.crop);
    assert_eq!(par.score, seq.score);
    assert_eq!(par.candidates, seq.candidates);
}

#[test]
fn textured_block_stays_in_crop() {
    let img = DynamicImage::ImageRgba8(textured_block(100, 100, 40, 40, 20, 2));
    let rect = smart_crop(&img, 50, 50).unwrap();
    assert!(
        rect.contains_rect(&Rect::new(40, 40, 60, 60)),
        "block not covered by {rect}"
    );
}

#[test]
fn saturated_patch_pulls_crop_towards_it() {
    let img = DynamicImage::ImageRgba8(saturated_patch(300, 100, 220, 20, 60, 60));
    let analysis = SmartCropAnalyzer::new().analyze(&img, 100, 100).unwrap();
    let rect = analysis.crop;
    assert_eq!(rect.height(), 100);
    assert!(rect.min_x >= 150, "crop {rect} ignores the patch");
    assert!(analysis.score.total > 0.0);
}

#[test]
fn small_images_are_analysed_at_full_resolution() {
    let img = DynamicImage::ImageRgba8(busy(320, 240));
    let with = SmartCropAnalyzer::new().analyze(&img, 100, 100).unwrap();
    let without = analyzer_with(|s| s.params.prescale = false)
        .analyze(&img, 100, 100)
        .unwrap();
    assert_eq!(with.context.prescale_factor, 1.0);
    assert_eq!((with.working_width, with.working_height), (320, 240));
    assert_eq!(with.crop, without.crop);
}

#[test]
fn large_images_are_prescaled_and_mapped_back() {
    let img = DynamicImage::ImageRgba8(busy(800, 600));
    let analysis = SmartCropAnalyzer::new().analyze(&img, 100, 100).unwrap();

    assert!(analysis.context.prescale_factor < 1.0);
    assert!(analysis.working_width < 800);
    assert!(analysis.working_height.min(analysis.working_width) <= 401);

    let rect = analysis.crop;
    assert!(Rect::new(0, 0, 800, 600).contains_rect(&rect), "{rect}");
    assert!(rect.width().abs_diff(rect.height()) <= 3, "{rect}");
    // the working crop is at least 90% of 400px, mapped back by 1.5
    assert!(rect.width() >= 530, "{rect}");
}

#[test]
fn prescale_can_be_disabled() {
    let img = DynamicImage::ImageRgba8(busy(500, 450));
    let analysis = analyzer_with(|s| s.params.prescale = false)
        .analyze(&img, 100, 100)
        .unwrap();
    assert_eq!(analysis.context.prescale_factor, 1.0);
    assert_eq!((analysis.working_width, analysis.working_height), (500, 450));
    assert!(Rect::new(0, 0, 500, 450).contains_rect(&analysis.crop));
}

#[test]
fn debug_mode_emits_checkpoints_in_order() {
    let sink = MemorySink::new();
    let analyzer = analyzer_with(|s| s.debug_mode = true).with_debug_sink(sink.clone());
    let img = DynamicImage::ImageRgba8(textured_block(96, 64, 30, 20, 24, 3));
    analyzer.analyze(&img, 32, 32).unwrap();

    assert_eq!(
        sink.tags(),
        ["prescale", "edge", "skin", "saturation", "features", "final"]
    );
    let features = sink.get("features").unwrap();
    assert_eq!(features.dimensions(), (96, 64));
}

#[test]
fn debug_sink_is_ignored_without_debug_mode() {
    let sink = MemorySink::new();
    let analyzer = SmartCropAnalyzer::new().with_debug_sink(sink.clone());
    let img = DynamicImage::ImageRgba8(busy(64, 64));
    analyzer.analyze(&img, 32, 32).unwrap();
    assert!(sink.tags().is_empty());
}

#[test]
fn stage_timings_are_reported() {
    let log = RecordingLog::new();
    let analyzer = SmartCropAnalyzer::new().with_logger(log.clone());
    let img = DynamicImage::ImageRgba8(busy(120, 90));
    let analysis = analyzer.analyze(&img, 40, 40).unwrap();

    let labels: Vec<String> = log.timings().into_iter().map(|t| t.label).collect();
    for stage in ["prescale", "edge", "skin", "saturation", "features", "crops", "score", "total"] {
        assert!(labels.iter().any(|l| l == stage), "missing {stage} in {labels:?}");
    }
    let crops = analysis.timings.stage("crops").unwrap();
    assert_eq!(crops.count, Some(analysis.candidates));
    assert!(log.lines().iter().any(|l| l.starts_with("original resolution")));
}

#[test]
fn analysis_serialises_to_json() {
    let img = DynamicImage::ImageRgba8(busy(64, 48));
    let analysis = SmartCropAnalyzer::new().analyze(&img, 32, 32).unwrap();
    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["crop"]["max_x"], analysis.crop.max_x);
    assert!(json["timings"]["stages"].is_array());
}
