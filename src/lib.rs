#![doc = r#"
smartcrop: content-aware image cropping.

Given an image and a target size, smartcrop finds the rectangle with the target's aspect
ratio that best preserves the interesting content. Every candidate is scored against three
feature planes: edges (detail), skin tones and saturated colour. Those planes are weighted
by an importance field that favours the centre and the rule-of-thirds lines. The crate
powers the `smartcrop` CLI and can be embedded in your own Rust applications.

Stability
---------
The public library API is experimental in initial releases and may evolve as the crate
stabilizes. Breaking changes can occur.

Add dependency
--------------
```toml
[dependencies]
smartcrop = "0.1"
```

Quick start: best crop for a size
---------------------------------
```rust,no_run
use smartcrop::{smart_crop, crop_image};

fn main() -> smartcrop::Result<()> {
    let img = image::open("/data/photo.jpg")?;
    let rect = smart_crop(&img, 250, 250)?;
    println!("best crop: {rect}");

    let cropped = crop_image(&img, &rect);
    cropped.save("/out/photo_250.png")?;
    Ok(())
}
```

Configured analyzer with diagnostics
------------------------------------
```rust,no_run
use smartcrop::{CropSettings, DirectorySink, RecordingLog, ResampleMethod, SmartCropAnalyzer};

fn main() -> smartcrop::Result<()> {
    let mut settings = CropSettings::default();
    settings.resample = ResampleMethod::Lanczos3;
    settings.debug_mode = true;
    settings.params.rule_of_thirds = false;

    let log = RecordingLog::new();
    let analyzer = SmartCropAnalyzer::with_settings(settings)
        .with_logger(log.clone())
        .with_debug_sink(DirectorySink::new("/tmp/smartcrop-debug"));

    let img = image::open("/data/portrait.png")?;
    let analysis = analyzer.analyze(&img, 400, 300)?;
    println!("crop {} score {:.4}", analysis.crop, analysis.score.total);
    for t in log.timings() {
        println!("{:>10}: {:.2} ms", t.label, t.elapsed_ms);
    }
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use smartcrop::{crop_directory, SmartCropAnalyzer};

fn main() -> smartcrop::Result<()> {
    let analyzer = SmartCropAnalyzer::new();
    let report = crop_directory(
        Path::new("/data/photos"),
        Path::new("/out/thumbs"),
        200,
        200,
        &analyzer,
        true, // resize to the exact target size
        true, // continue_on_error
    )?;

    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);
    Ok(())
}
```

Error handling
--------------
All public functions return `smartcrop::Result<T>`; match on `smartcrop::Error` to handle
specific cases.

```rust,no_run
use smartcrop::{smart_crop, Error};

fn main() {
    let img = image::DynamicImage::new_rgba8(64, 64);
    match smart_crop(&img, 0, 0) {
        Ok(rect) => println!("{rect}"),
        Err(Error::InvalidDimensions) => eprintln!("need a non-zero target width or height"),
        Err(Error::NoCandidates { .. }) => eprintln!("no crop fits this image"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`]: high-level, ergonomic entry points.
- [`core`]: feature passes, importance, candidates, scoring and the pipeline.
- [`types`]: crop rectangles, scores and `ResampleMethod`.
- [`logging`]: `CropLog` sinks and stage timings.
- [`io`]: image loading/saving and debug image sinks.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod logging;
pub mod types;

// Curated public API surface
// Types
pub use core::params::{AnalysisParams, CropSettings};
pub use core::processing::pipeline::CropAnalysis;
pub use error::{Error, Result};
pub use types::{Crop, Rect, ResampleMethod, Score, ScoredCrop};

// Diagnostics
pub use io::{DebugSink, DirectorySink, MemorySink};
pub use logging::{CropLog, NullLog, RecordingLog, StageTiming, TimingBreakdown, TracingLog};

// High-level API re-exports
pub use api::{
    Analyzer, BatchReport, SmartCropAnalyzer, crop_directory, crop_image, crop_to_size,
    iterate_images, resize_to_target, smart_crop,
};
