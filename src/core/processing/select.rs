use rayon::prelude::*;

use crate::core::params::AnalysisParams;
use crate::core::processing::features::FeatureMap;
use crate::core::processing::score::score;
use crate::types::{Crop, ScoredCrop};

/// Outcome of a selection run.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    /// `None` only when there was nothing to score
    pub best: Option<ScoredCrop>,
    pub evaluated: usize,
}

/// Scores candidates in order. The first candidate is the initial winner
/// whatever its total; later ones replace it only with a strictly higher total.
pub fn select_best<I>(features: &FeatureMap, candidates: I, params: &AnalysisParams) -> Selection
where
    I: IntoIterator<Item = Crop>,
{
    let mut best: Option<ScoredCrop> = None;
    let mut evaluated = 0;

    for crop in candidates {
        let s = score(features, &crop, params);
        evaluated += 1;
        let improves = best.as_ref().map_or(true, |top| s.total > top.score.total);
        if improves {
            best = Some(ScoredCrop { crop, score: s });
        }
    }

    Selection { best, evaluated }
}

/// Parallel variant of [`select_best`]. Among equal totals the candidate with
/// the lowest enumeration index wins, so the result matches the sequential run.
pub fn par_select_best(
    features: &FeatureMap,
    candidates: &[Crop],
    params: &AnalysisParams,
) -> Selection {
    let best = candidates
        .par_iter()
        .enumerate()
        .map(|(idx, crop)| {
            (
                idx,
                ScoredCrop {
                    crop: *crop,
                    score: score(features, crop, params),
                },
            )
        })
        .reduce_with(|a, b| {
            if b.1.score.total > a.1.score.total
                || (b.1.score.total == a.1.score.total && b.0 < a.0)
            {
                b
            } else {
                a
            }
        })
        .map(|(_, scored)| scored);

    Selection {
        best,
        evaluated: candidates.len(),
    }
}
