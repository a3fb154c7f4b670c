use log::debug;
use rayon::prelude::*;

use crate::error::{MapError, Result};
use crate::grid::Grid;

/// Global elevation bounds of one heightfield snapshot. `max >= min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElevationRange {
    pub min: f32,
    pub max: f32,
}

impl ElevationRange {
    #[inline]
    fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    fn include(self, h: f32) -> Self {
        Self {
            min: if h < self.min { h } else { self.min },
            max: if h > self.max { h } else { self.max },
        }
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Map an elevation into `[0, 1]`. A flat world normalizes to 0.
    #[inline]
    pub fn normalize(&self, h: f32) -> f32 {
        let span = self.span();
        if span > 0.0 { (h - self.min) / span } else { 0.0 }
    }
}

/// Find the lowest and highest sample in one pass over the heightfield.
///
/// The running minimum starts at `ceiling` (the tallest elevation the world
/// can hold) and the running maximum at zero, so the result does not depend
/// on visit order. Rows are scanned in parallel and merged afterwards.
pub fn scan_elevation(height: &Grid<f32>, ceiling: f32) -> Result<ElevationRange> {
    if height.is_empty() {
        return Err(MapError::EmptyHeightfield {
            w: height.w,
            h: height.h,
        });
    }

    let seed = ElevationRange {
        min: ceiling,
        max: 0.0,
    };
    let range = height
        .data
        .par_chunks(height.w)
        .map(|row| row.iter().fold(seed, |acc, &h| acc.include(h)))
        .reduce(|| seed, ElevationRange::merge);

    debug!("Elevation range: {:.2}..{:.2}", range.min, range.max);
    Ok(range)
}
