use rayon::prelude::*;

use crate::config::Params;
use crate::error::{MapError, Result};
use crate::grid::Grid;
use crate::host::{TerrainSampler, WorldPos};
use crate::range::ElevationRange;
use crate::transform::WorldTransform;

#[inline]
fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Render the minimap: one RGBA pixel per map cell, row 0 at the north edge.
///
/// A cell is land when its normalized height is strictly above the host's
/// water depth plus `params.water_depth_bias`. Land takes the host's surface
/// color and alpha; everything else gets the flat water color. Rows are
/// rendered in parallel into disjoint slices. The first host failure aborts
/// the render.
pub fn render_minimap<S: TerrainSampler + ?Sized>(
    height: &Grid<f32>,
    range: ElevationRange,
    transform: &WorldTransform,
    sampler: &S,
    params: &Params,
) -> Result<Vec<u8>> {
    let w = transform.map_w;
    let h = transform.map_h;
    if height.w < w || height.h < h {
        return Err(MapError::HeightfieldMismatch {
            w: height.w,
            h: height.h,
            map_w: w,
            map_h: h,
        });
    }

    let mut rgba = vec![0u8; w * h * 4];
    rgba.par_chunks_mut(w * 4)
        .enumerate()
        .try_for_each(|(y, row)| -> Result<()> {
            for x in 0..w {
                let (wx, wz) = transform.map_to_world(x, y);
                let pos = WorldPos::flat(wx, wz);

                let current = range.normalize(height.get(x, y));
                let threshold = sampler.water_depth(pos)? + params.water_depth_bias;

                let color = if current > threshold {
                    let [r, g, b] = sampler.surface_color(pos, params.surface_mask)?;
                    let a = sampler.alpha(x, y)?;
                    [channel(r), channel(g), channel(b), channel(a)]
                } else {
                    params.water_color
                };

                row[x * 4..x * 4 + 4].copy_from_slice(&color);
            }
            Ok(())
        })?;

    Ok(rgba)
}

/// Diagnostic: grayscale heightmap over the map area.
pub fn render_heightmap(height: &Grid<f32>, range: ElevationRange, transform: &WorldTransform) -> Vec<u8> {
    let w = transform.map_w.min(height.w);
    let h = transform.map_h.min(height.h);
    let mut rgba = vec![0u8; w * h * 4];
    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let v = channel(range.normalize(height.get(x, y)));
            row[x * 4..x * 4 + 4].copy_from_slice(&[v, v, v, 255]);
        }
    });
    rgba
}
