//! Multi-scale sliding-window enumeration of crop candidates.
use crate::core::params::AnalysisParams;
use crate::types::Crop;

/// Search grid over one working image. Cheap to copy; every call to
/// [`CandidateGrid::iter`] restarts the enumeration.
///
/// Order is scale descending, then `y` ascending, then `x` ascending. The
/// selector relies on it to break ties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateGrid {
    image_width: u32,
    image_height: u32,
    crop_width: f64,
    crop_height: f64,
    min_scale: f64,
    max_scale: f64,
    scale_step: f64,
    step: u32,
}

impl CandidateGrid {
    /// A zero `crop_width` or `crop_height` leaves that axis unconstrained;
    /// it is replaced by the shorter image side.
    pub fn new(
        image_width: u32,
        image_height: u32,
        crop_width: f64,
        crop_height: f64,
        min_scale: f64,
        params: &AnalysisParams,
    ) -> Self {
        let min_dimension = image_width.min(image_height) as f64;
        Self {
            image_width,
            image_height,
            crop_width: if crop_width != 0.0 {
                crop_width
            } else {
                min_dimension
            },
            crop_height: if crop_height != 0.0 {
                crop_height
            } else {
                min_dimension
            },
            min_scale,
            max_scale: params.max_scale,
            scale_step: params.scale_step,
            step: params.step.max(1),
        }
    }

    pub fn crop_size(&self) -> (f64, f64) {
        (self.crop_width, self.crop_height)
    }

    pub fn iter(&self) -> Candidates {
        Candidates {
            grid: *self,
            scale: self.max_scale,
            x: 0,
            y: 0,
        }
    }
}

impl IntoIterator for &CandidateGrid {
    type Item = Crop;
    type IntoIter = Candidates;

    fn into_iter(self) -> Candidates {
        self.iter()
    }
}

/// Lazy iterator over a [`CandidateGrid`].
#[derive(Debug, Clone)]
pub struct Candidates {
    grid: CandidateGrid,
    scale: f64,
    x: u32,
    y: u32,
}

impl Candidates {
    fn next_scale(&mut self) {
        self.scale -= self.grid.scale_step;
        self.x = 0;
        self.y = 0;
    }
}

impl Iterator for Candidates {
    type Item = Crop;

    fn next(&mut self) -> Option<Crop> {
        let g = self.grid;
        let (width, height) = (g.image_width as f64, g.image_height as f64);
        loop {
            if self.scale < g.min_scale {
                return None;
            }
            let cw = g.crop_width * self.scale;
            let ch = g.crop_height * self.scale;
            let (w, h) = (cw as u32, ch as u32);

            // nothing fits (or the crop collapsed to zero pixels) at this scale
            if cw > width || ch > height || w == 0 || h == 0 {
                self.next_scale();
                continue;
            }
            if self.y as f64 + ch > height {
                self.next_scale();
                continue;
            }
            if self.x as f64 + cw > width {
                self.x = 0;
                self.y += g.step;
                continue;
            }

            let crop = Crop::new(self.x, self.y, w, h);
            self.x += g.step;
            return Some(crop);
        }
    }
}
