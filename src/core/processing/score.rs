use crate::core::params::AnalysisParams;
use crate::core::processing::features::FeatureMap;
use crate::core::processing::importance::importance;
use crate::types::{Crop, Score};

/// Importance-weighted feature sum for one candidate, sampled on a
/// `score_down_sample` grid over the whole feature map.
pub fn score(features: &FeatureMap, crop: &Crop, params: &AnalysisParams) -> Score {
    let width = features.width();
    let height = features.height();
    let ds = params.score_down_sample.max(1);
    let mut score = Score::default();

    let mut y = 0;
    while y + ds <= height {
        let mut x = 0;
        while x + ds <= width {
            let [r, g, b, _] = features.pixel(x as usize, y as usize);
            let imp = importance(params, crop, x, y);
            let det = g as f64 / 255.0;

            score.skin += r as f64 / 255.0 * (det + params.skin_bias) * imp;
            score.detail += det * imp;
            score.saturation += b as f64 / 255.0 * (det + params.saturation_bias) * imp;
            x += ds;
        }
        y += ds;
    }

    score.total = (score.detail * params.detail_weight
        + score.skin * params.skin_weight
        + score.saturation * params.saturation_weight)
        / crop.area();
    score
}
