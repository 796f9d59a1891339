use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ResampleMethod;

/// Tunable constants of the analysis: feature thresholds, score weights,
/// search-grid steps and the importance shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    pub detail_weight: f64,
    /// Reference skin tone as a unit vector in R,G,B order
    pub skin_color: [f64; 3],
    pub skin_bias: f64,
    pub skin_brightness_min: f64,
    pub skin_brightness_max: f64,
    pub skin_threshold: f64,
    pub skin_weight: f64,
    pub saturation_brightness_min: f64,
    pub saturation_brightness_max: f64,
    pub saturation_threshold: f64,
    pub saturation_bias: f64,
    pub saturation_weight: f64,
    /// Sample every n-th pixel on both axes when scoring
    pub score_down_sample: u32,
    /// Pixel step of the candidate grid
    pub step: u32,
    pub scale_step: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub edge_radius: f64,
    pub edge_weight: f64,
    pub outside_importance: f64,
    pub rule_of_thirds: bool,
    /// Downscale the source before analysis
    pub prescale: bool,
    /// Shorter side of the working image when prescaling
    pub prescale_min: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            detail_weight: 0.2,
            skin_color: [0.78, 0.57, 0.44],
            skin_bias: 0.01,
            skin_brightness_min: 0.2,
            skin_brightness_max: 1.0,
            skin_threshold: 0.8,
            skin_weight: 1.8,
            saturation_brightness_min: 0.05,
            saturation_brightness_max: 0.9,
            saturation_threshold: 0.4,
            saturation_bias: 0.2,
            saturation_weight: 0.3,
            score_down_sample: 8,
            step: 8,
            scale_step: 0.1,
            min_scale: 0.9,
            max_scale: 1.0,
            edge_radius: 0.4,
            edge_weight: -20.0,
            outside_importance: -0.5,
            rule_of_thirds: true,
            prescale: true,
            prescale_min: 400.0,
        }
    }
}

impl AnalysisParams {
    /// Rejects values that would stall the candidate search or divide by zero.
    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(Error::InvalidArgument {
                arg: "step",
                value: self.step.to_string(),
            });
        }
        if self.score_down_sample == 0 {
            return Err(Error::InvalidArgument {
                arg: "score_down_sample",
                value: self.score_down_sample.to_string(),
            });
        }
        if !(self.scale_step > 0.0) {
            return Err(Error::InvalidArgument {
                arg: "scale_step",
                value: self.scale_step.to_string(),
            });
        }
        if !(self.min_scale > 0.0) || self.min_scale > self.max_scale {
            return Err(Error::InvalidArgument {
                arg: "min_scale",
                value: format!("{} (max_scale={})", self.min_scale, self.max_scale),
            });
        }
        if self.prescale && !(self.prescale_min > 0.0) {
            return Err(Error::InvalidArgument {
                arg: "prescale_min",
                value: self.prescale_min.to_string(),
            });
        }
        if !(self.skin_threshold < 1.0) {
            return Err(Error::InvalidArgument {
                arg: "skin_threshold",
                value: self.skin_threshold.to_string(),
            });
        }
        if !(self.saturation_threshold < 1.0) {
            return Err(Error::InvalidArgument {
                arg: "saturation_threshold",
                value: self.saturation_threshold.to_string(),
            });
        }
        Ok(())
    }
}

/// Crop settings suitable for config files and CLI presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropSettings {
    pub resample: ResampleMethod,
    /// Emit intermediate images to the analyzer's debug sink
    pub debug_mode: bool,
    /// Score candidates and run the feature passes on the rayon pool
    pub parallel: bool,
    pub params: AnalysisParams,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            resample: ResampleMethod::Bicubic,
            debug_mode: false,
            parallel: true,
            params: AnalysisParams::default(),
        }
    }
}

impl CropSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: CropSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.params.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let s = CropSettings::from_json_str(
            r#"{"resample":"lanczos3","params":{"step":4,"rule_of_thirds":false}}"#,
        )
        .unwrap();
        assert_eq!(s.resample, ResampleMethod::Lanczos3);
        assert_eq!(s.params.step, 4);
        assert!(!s.params.rule_of_thirds);
        assert_eq!(s.params.score_down_sample, 8);
        assert_eq!(s.params.prescale_min, 400.0);
        assert!(s.parallel);
    }

    #[test]
    fn zero_step_is_rejected() {
        let err = CropSettings::from_json_str(r#"{"params":{"step":0}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "step", .. }));
    }

    #[test]
    fn inverted_scale_range_is_rejected() {
        let params = AnalysisParams {
            min_scale: 1.2,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidArgument { arg: "min_scale", .. })
        ));
    }
}
