//! Capabilities the pipeline borrows from whatever owns the world.
//!
//! The core never builds terrain itself. A host hands over a heightfield
//! snapshot plus three samplers, and the synthesis stays testable against
//! synthetic data.

use crate::error::HostError;
use crate::grid::Grid;

/// Material bits understood by [`TerrainSampler::surface_color`].
pub mod mask {
    pub const EVERYTHING: i32 = -1;
    pub const NOTHING: i32 = 0;
    pub const DIRT: i32 = 1;
    pub const SNOW: i32 = 2;
    pub const SAND: i32 = 4;
    pub const ROCK: i32 = 8;
    pub const GRASS: i32 = 16;
    pub const FOREST: i32 = 32;
    pub const STONES: i32 = 64;
    pub const GRAVEL: i32 = 128;

    #[inline]
    pub fn contains(mask: i32, material: i32) -> bool {
        mask & material != 0
    }
}

/// Point in world space. `y` is up; the map plane is `x`/`z`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Position on the ground plane at height 0.
    pub const fn flat(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }
}

/// Something placed in the world with a free-text name, e.g. a prefab path.
#[derive(Clone, Debug)]
pub struct WorldEntity {
    pub position: WorldPos,
    pub name: String,
}

impl WorldEntity {
    pub fn new(name: impl Into<String>, position: WorldPos) -> Self {
        Self {
            position,
            name: name.into(),
        }
    }
}

/// Per-location sampling. Implementations must be callable from worker threads.
pub trait TerrainSampler: Sync {
    /// Surface color as linear RGB in `[0, 1]`, filtered by a material mask.
    fn surface_color(&self, pos: WorldPos, mask: i32) -> Result<[f32; 3], HostError>;

    /// Blend weight in `[0, 1]` for output pixel `(x, y)`.
    fn alpha(&self, x: usize, y: usize) -> Result<f32, HostError>;

    /// Water depth at a world position, in the same normalized units as terrain height.
    fn water_depth(&self, pos: WorldPos) -> Result<f32, HostError>;
}

/// A full world snapshot: terrain samplers plus the scalars and entities
/// that end up in the payload.
pub trait WorldHost: TerrainSampler {
    /// Elevation samples, row 0 at the northern edge. The output map is one
    /// cell smaller than this grid in each axis.
    fn heightfield(&self) -> &Grid<f32>;

    /// Edge length of the square world.
    fn world_size(&self) -> f32;

    /// World coordinate of the map's western/southern edge.
    fn world_origin(&self) -> f32 {
        -self.world_size() / 2.0
    }

    /// Highest elevation the world can hold; seeds the minimum scan.
    fn max_elevation(&self) -> f32;

    /// World seed as the host reports it; may be negative.
    fn seed(&self) -> i32;

    fn protocol(&self) -> String;

    fn entities(&self) -> Vec<WorldEntity>;
}
