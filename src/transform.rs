use crate::error::{MapError, Result};
use crate::grid::Grid;

/// Affine mapping between the world's `x`/`z` plane and the output raster.
///
/// World `x` grows to the east (image right). World `z` grows to the north
/// and is mirrored across the world's extent, so the northern edge
/// `origin + size` lands on image row 0. All per-run constants are computed
/// once here instead of per pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldTransform {
    pub world_size: f32,
    pub map_w: usize,
    pub map_h: usize,
    pub origin: f32,
    cell_w: f32,
    cell_h: f32,
}

impl WorldTransform {
    /// Transform for a world centered on the origin.
    pub fn new(world_size: f32, map_w: usize, map_h: usize) -> Result<Self> {
        Self::with_origin(world_size, map_w, map_h, -world_size / 2.0)
    }

    pub fn with_origin(world_size: f32, map_w: usize, map_h: usize, origin: f32) -> Result<Self> {
        if !(world_size.is_finite() && world_size > 0.0) {
            return Err(MapError::InvalidWorldSize(world_size));
        }
        if map_w == 0 || map_h == 0 {
            return Err(MapError::InvalidMapSize { w: map_w, h: map_h });
        }
        Ok(Self {
            world_size,
            map_w,
            map_h,
            origin,
            cell_w: world_size / map_w as f32,
            cell_h: world_size / map_h as f32,
        })
    }

    /// The map covers the heightfield's cells, one fewer than its samples per axis.
    pub fn for_heightfield(height: &Grid<f32>, world_size: f32, origin: f32) -> Result<Self> {
        if height.w < 2 || height.h < 2 {
            return Err(MapError::HeightfieldTooSmall {
                w: height.w,
                h: height.h,
            });
        }
        Self::with_origin(world_size, height.w - 1, height.h - 1, origin)
    }

    /// World units covered by one pixel along x and y.
    #[inline]
    pub fn cell_size(&self) -> (f32, f32) {
        (self.cell_w, self.cell_h)
    }

    /// World position to pixel indices, truncating toward zero.
    ///
    /// Positions on the world boundary land on the last pixel. Positions
    /// outside the world come back outside the map; see [`Self::clamp_to_map`].
    #[inline]
    pub fn world_to_map(&self, world_x: f32, world_z: f32) -> (i32, i32) {
        let flipped_z = 2.0 * self.origin + self.world_size - world_z;
        (
            self.axis_to_map(world_x, self.map_w),
            self.axis_to_map(flipped_z, self.map_h),
        )
    }

    /// Pixel indices to the world position at that pixel's corner.
    #[inline]
    pub fn map_to_world(&self, map_x: usize, map_y: usize) -> (f32, f32) {
        let world_x = self.origin + map_x as f32 * self.cell_w;
        let world_z = self.origin + self.world_size - map_y as f32 * self.cell_h;
        (world_x, world_z)
    }

    pub fn clamp_to_map(&self, (x, y): (i32, i32)) -> (usize, usize) {
        (
            x.clamp(0, self.map_w as i32 - 1) as usize,
            y.clamp(0, self.map_h as i32 - 1) as usize,
        )
    }

    #[inline]
    fn axis_to_map(&self, v: f32, n: usize) -> i32 {
        let frac = (v - self.origin) / self.world_size;
        let m = (frac * n as f32) as i32;
        if (0.0..=1.0).contains(&frac) {
            m.min(n as i32 - 1)
        } else {
            m
        }
    }
}
