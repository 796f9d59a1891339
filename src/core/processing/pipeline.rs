use std::borrow::Cow;
use std::time::Instant;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::params::CropSettings;
use crate::core::processing::candidates::CandidateGrid;
use crate::core::processing::features::{FeatureChannel, FeatureMap, extract_features};
use crate::core::processing::overlay::draw_importance_overlay;
use crate::core::processing::prescale::AnalysisContext;
use crate::core::processing::resize::resize_rgba;
use crate::core::processing::select::{par_select_best, select_best};
use crate::error::{Error, Result};
use crate::io::DebugSink;
use crate::logging::{CropLog, StageTiming, TimingBreakdown};
use crate::types::{Crop, Rect, Score, ScoredCrop};

/// Everything one analysis produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropAnalysis {
    /// Best crop in source-image coordinates
    pub crop: Rect,
    /// The same crop in working-image coordinates
    pub analysis_crop: Crop,
    pub score: Score,
    pub context: AnalysisContext,
    pub working_width: u32,
    pub working_height: u32,
    pub candidates: usize,
    pub timings: TimingBreakdown,
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

struct Reporter<'a> {
    log: &'a dyn CropLog,
    sink: Option<&'a dyn DebugSink>,
    debug: bool,
    timings: TimingBreakdown,
}

impl Reporter<'_> {
    fn timing(&mut self, timing: StageTiming) {
        self.log.timing(&timing);
        self.timings.push(timing);
    }

    fn emit(&self, tag: &str, image: impl FnOnce() -> RgbaImage) {
        if !self.debug {
            return;
        }
        if let Some(sink) = self.sink {
            if let Err(e) = sink.emit(tag, &image()) {
                warn!("Failed to emit debug image '{}': {}", tag, e);
            }
        }
    }
}

/// Runs the full analysis on `img`: pre-scale, feature extraction, candidate
/// search and rescaling of the winner.
pub fn find_best_crop(
    img: &RgbaImage,
    target_width: u32,
    target_height: u32,
    settings: &CropSettings,
    log: &dyn CropLog,
    sink: Option<&dyn DebugSink>,
) -> Result<CropAnalysis> {
    settings.validate()?;
    let params = &settings.params;
    let started = Instant::now();
    let (source_width, source_height) = img.dimensions();

    let context = AnalysisContext::new(
        source_width,
        source_height,
        target_width,
        target_height,
        params,
    )?;
    let no_candidates = || Error::NoCandidates {
        image_width: source_width,
        image_height: source_height,
        target_width,
        target_height,
    };
    if source_width == 0 || source_height == 0 {
        return Err(no_candidates());
    }

    if settings.debug_mode && sink.is_none() {
        log.line("debug mode is enabled but no debug sink is attached");
    }
    let mut reporter = Reporter {
        log,
        sink,
        debug: settings.debug_mode,
        timings: TimingBreakdown::default(),
    };

    log.line(&format!("prescale factor: {}", context.prescale_factor));
    let now = Instant::now();
    let working: Cow<'_, RgbaImage> = if context.prescale_factor < 1.0 {
        Cow::Owned(resize_rgba(img, context.working_width(), settings.resample)?)
    } else {
        Cow::Borrowed(img)
    };
    reporter.timing(StageTiming::new("prescale", elapsed_ms(now)));
    reporter.emit("prescale", || RgbaImage::clone(&working));

    let (working_width, working_height) = working.dimensions();
    let context = context.fit_to_working(working_width, working_height);

    log.line(&format!(
        "original resolution: {}x{}",
        source_width, source_height
    ));
    log.line(&format!(
        "scale: {}, cropw: {}, croph: {}, minscale: {}",
        context.scale, context.crop_width, context.crop_height, context.min_scale
    ));

    let (best, candidates) = analyse(&working, &context, settings, &mut reporter);
    let best = best.ok_or_else(no_candidates)?;

    let crop = context.rescale(&best.crop);
    reporter.timings.total_ms = elapsed_ms(started);
    log.timing(&StageTiming::new("total", reporter.timings.total_ms));

    info!(
        "Best crop {} (score {:.6}) from {} candidates on {}x{} working image",
        crop, best.score.total, candidates, working_width, working_height
    );

    Ok(CropAnalysis {
        crop,
        analysis_crop: best.crop,
        score: best.score,
        context,
        working_width,
        working_height,
        candidates,
        timings: reporter.timings,
    })
}

fn analyse(
    working: &RgbaImage,
    context: &AnalysisContext,
    settings: &CropSettings,
    reporter: &mut Reporter<'_>,
) -> (Option<ScoredCrop>, usize) {
    let params = &settings.params;

    let now = Instant::now();
    let (features, passes) = extract_features(working, params, settings.parallel);
    reporter.timing(StageTiming::new("luma", passes.luma.as_secs_f64() * 1000.0));
    reporter.timing(StageTiming::new("edge", passes.edge.as_secs_f64() * 1000.0));
    reporter.emit("edge", || features.channel_image(FeatureChannel::Detail));
    reporter.timing(StageTiming::new("skin", passes.skin.as_secs_f64() * 1000.0));
    reporter.emit("skin", || features.channel_image(FeatureChannel::Skin));
    reporter.timing(StageTiming::new(
        "saturation",
        passes.saturation.as_secs_f64() * 1000.0,
    ));
    reporter.emit("saturation", || features.channel_image(FeatureChannel::Saturation));
    reporter.timing(StageTiming::new("features", elapsed_ms(now)));
    reporter.emit("features", || features.to_rgba());

    let now = Instant::now();
    let grid = CandidateGrid::new(
        working.width(),
        working.height(),
        context.crop_width,
        context.crop_height,
        context.min_scale,
        params,
    );
    let crops: Vec<Crop> = grid.iter().collect();
    reporter.timing(StageTiming::new("crops", elapsed_ms(now)).with_count(crops.len()));

    let now = Instant::now();
    let selection = if settings.parallel {
        par_select_best(&features, &crops, params)
    } else {
        select_best(&features, crops.iter().copied(), params)
    };
    reporter.timing(StageTiming::new("score", elapsed_ms(now)).with_count(selection.evaluated));

    if let Some(best) = &selection.best {
        reporter.emit("final", || final_overlay(&features, &best.crop, settings));
    }

    (selection.best, selection.evaluated)
}

fn final_overlay(features: &FeatureMap, crop: &Crop, settings: &CropSettings) -> RgbaImage {
    draw_importance_overlay(&features.to_rgba(), crop, &settings.params)
}
