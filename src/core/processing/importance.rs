//! Compositional weight of a pixel relative to a crop.
use crate::core::params::AnalysisParams;
use crate::types::Crop;

/// Rule-of-thirds bump: 1 at `v == 1/3`, falling to 0 within 1/8 either side.
#[inline]
pub fn thirds(v: f64) -> f64 {
    let t = (((v - 1.0 / 3.0 + 1.0) % 2.0) * 0.5 - 0.5) * 16.0;
    (1.0 - t * t).max(0.0)
}

/// Weight of pixel `(x, y)` for `crop`.
///
/// Pixels outside the crop get `outside_importance`. Inside, the weight
/// falls off radially from the centre, drops steeply within `edge_radius`
/// of the border and, with rule-of-thirds enabled, is boosted near the
/// third lines.
#[inline]
pub fn importance(params: &AnalysisParams, crop: &Crop, x: u32, y: u32) -> f64 {
    if !crop.contains(x, y) {
        return params.outside_importance;
    }

    let xf = (x - crop.x) as f64 / crop.width as f64;
    let yf = (y - crop.y) as f64 / crop.height as f64;

    let px = (0.5 - xf).abs() * 2.0;
    let py = (0.5 - yf).abs() * 2.0;

    let dx = (px - 1.0 + params.edge_radius).max(0.0);
    let dy = (py - 1.0 + params.edge_radius).max(0.0);
    let d = (dx * dx + dy * dy) * params.edge_weight;

    let mut s = 1.41 - (px * px + py * py).sqrt();
    if params.rule_of_thirds {
        s += (s + d + 0.5).max(0.0) * 1.2 * (thirds(px) + thirds(py));
    }

    s + d
}
