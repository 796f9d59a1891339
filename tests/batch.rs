mod common;

use std::fs;

use common::synthetic_image::{busy, textured_block};
use smartcrop::{
    CropSettings, DirectorySink, SmartCropAnalyzer, crop_directory, crop_to_size, iterate_images,
};

#[test]
fn crops_every_image_and_skips_the_rest() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    busy(120, 80).save(input.path().join("a.png")).unwrap();
    textured_block(90, 90, 20, 30, 30, 3)
        .save(input.path().join("b.png"))
        .unwrap();
    fs::write(input.path().join("notes.txt"), "not an image").unwrap();
    fs::create_dir(input.path().join("nested")).unwrap();

    let analyzer = SmartCropAnalyzer::new();
    let report = crop_directory(
        input.path(),
        output.path(),
        40,
        40,
        &analyzer,
        true,
        false,
    )
    .unwrap();

    assert_eq!((report.processed, report.skipped, report.errors), (2, 2, 0));
    let listed = iterate_images(input.path()).unwrap().count();
    assert_eq!(listed, report.processed + report.errors);
    for name in ["a.png", "b.png"] {
        let out = image::open(output.path().join(name)).unwrap();
        assert_eq!((out.width(), out.height()), (40, 40));
    }
    assert!(!output.path().join("notes.txt").exists());
}

#[test]
fn broken_files_are_counted_when_continuing() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    busy(64, 64).save(input.path().join("good.png")).unwrap();
    fs::write(input.path().join("broken.png"), b"definitely not a png").unwrap();

    let analyzer = SmartCropAnalyzer::new();
    let report =
        crop_directory(input.path(), output.path(), 32, 32, &analyzer, false, true).unwrap();
    assert_eq!((report.processed, report.skipped, report.errors), (1, 0, 1));

    // without continue_on_error the first failure aborts; "broken" sorts first
    let stopped = crop_directory(input.path(), output.path(), 32, 32, &analyzer, false, false);
    assert!(stopped.is_err());
}

#[test]
fn lists_images_sorted() {
    let input = tempfile::tempdir().unwrap();
    for name in ["c.png", "a.jpg", "b.JPEG"] {
        fs::write(input.path().join(name), b"").unwrap();
    }
    fs::write(input.path().join("z.md"), "").unwrap();

    let names: Vec<String> = iterate_images(input.path())
        .unwrap()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.jpg", "b.JPEG", "c.png"]);
}

#[test]
fn crop_to_size_follows_the_free_axis() {
    let img = image::DynamicImage::ImageRgba8(busy(200, 100));
    let analyzer = SmartCropAnalyzer::new();

    let cropped = crop_to_size(&analyzer, &img, 50, 50, false).unwrap();
    assert_eq!(cropped.width(), cropped.height());

    let resized = crop_to_size(&analyzer, &img, 0, 60, true).unwrap();
    assert_eq!(resized.height(), 60);
    assert_eq!(resized.width(), 60);
}

#[test]
fn directory_sink_writes_debug_images() {
    let debug = tempfile::tempdir().unwrap();
    let settings = CropSettings {
        debug_mode: true,
        ..CropSettings::default()
    };
    let analyzer = SmartCropAnalyzer::with_settings(settings)
        .with_debug_sink(DirectorySink::new(debug.path()));
    let img = image::DynamicImage::ImageRgba8(busy(80, 60));
    analyzer.analyze(&img, 30, 30).unwrap();

    for tag in ["prescale", "edge", "skin", "saturation", "features", "final"] {
        let path = debug.path().join(format!("smartcrop_{tag}.jpg"));
        assert!(path.exists(), "missing {path:?}");
    }
}

#[test]
fn settings_load_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{"resample":"nearest","parallel":false,"params":{"prescale":false}}"#,
    )
    .unwrap();

    let settings = CropSettings::from_json_file(&path).unwrap();
    assert!(!settings.parallel);
    assert!(!settings.params.prescale);
    assert_eq!(settings.params.step, 8);
}
