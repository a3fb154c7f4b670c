//! A seed-driven stand-in for a live world host.
//!
//! Builds an island heightfield from fractal noise, a sea at a fixed
//! normalized level, elevation-banded surface materials and a scattering of
//! named landmarks. Used by the binaries and the tests.

use crate::error::{HostError, Result};
use crate::grid::Grid;
use crate::host::{TerrainSampler, WorldEntity, WorldHost, WorldPos, mask};
use crate::noise::{draw_index, draw_range, fbm, hash2, hash2_unit, salted};
use crate::transform::WorldTransform;

const SALT_TERRAIN: u64 = 0x7E22_A1B0_0000_0001;
const SALT_ALPHA: u64 = 0xA1FA_0000_5EED_0002;
const SALT_WAVES: u64 = 0x0CEA_7AFE_0000_0003;
const SALT_PLACE: u64 = 0x91AC_E000_5EED_0004;

pub const MAX_ELEVATION: f32 = 1000.0;

/// Sea surface as a fraction of the elevation ceiling.
const SEA_LEVEL: f32 = 0.32;
/// Host water depths carry this offset; the pipeline's default bias removes it.
const WATER_OFFSET: f32 = -0.5;
const WAVE_AMPLITUDE: f32 = 0.004;

const SAND: [f32; 3] = [0.82, 0.76, 0.56];
const GRASS: [f32; 3] = [0.42, 0.55, 0.27];
const FOREST: [f32; 3] = [0.24, 0.38, 0.18];
const ROCK: [f32; 3] = [0.50, 0.47, 0.43];
const SNOW: [f32; 3] = [0.93, 0.94, 0.96];
const BARE: [f32; 3] = [0.36, 0.30, 0.24];

const PREFABS: &[&str] = &[
    "assets/bundled/prefabs/autospawn/monument/lighthouse/lighthouse.prefab",
    "assets/bundled/prefabs/autospawn/monument/cave/cave_small_easy.prefab",
    "assets/bundled/prefabs/autospawn/monument/cave/cave_medium_hard.prefab",
    "assets/bundled/prefabs/autospawn/monument/cave/cave_large_sewers_hard.prefab",
    "assets/bundled/prefabs/autospawn/monument/tiny/power_sub_small_1.prefab",
    "assets/bundled/prefabs/autospawn/monument/tiny/power_sub_big_2.prefab",
    "assets/bundled/prefabs/autospawn/monument/small/warehouse.prefab",
    "assets/bundled/prefabs/autospawn/monument/small/sphere_tank.prefab",
    "assets/bundled/prefabs/autospawn/monument/small/satellite_dish.prefab",
    "assets/bundled/prefabs/autospawn/monument/medium/radtown_small_3.prefab",
    "assets/bundled/prefabs/autospawn/monument/large/powerplant_1.prefab",
    "assets/bundled/prefabs/autospawn/monument/large/trainyard_1.prefab",
    "assets/bundled/prefabs/autospawn/monument/large/airfield_1.prefab",
    "assets/bundled/prefabs/autospawn/monument/large/military_tunnel_1.prefab",
    "assets/bundled/prefabs/autospawn/monument/large/water_treatment_plant_1.prefab",
    "assets/bundled/prefabs/autospawn/monuments/harbor_1.prefab",
    "assets/content/nature/rocks/rock_formation_large.prefab",
];

pub struct SyntheticWorld {
    seed: i32,
    protocol: String,
    transform: WorldTransform,
    height: Grid<f32>,
    entities: Vec<WorldEntity>,
}

impl SyntheticWorld {
    /// `resolution` is the output map edge; the heightfield has one more sample.
    pub fn new(seed: i32, world_size: f32, resolution: usize) -> Result<Self> {
        let transform = WorldTransform::new(world_size, resolution, resolution)?;
        let terrain_seed = salted(seed, SALT_TERRAIN);

        let height = Grid::from_fn(resolution + 1, resolution + 1, |x, y| {
            let (wx, wz) = transform.map_to_world(x, y);
            island_height(wx / world_size, wz / world_size, terrain_seed)
        });

        let place = salted(seed, SALT_PLACE);
        let count = 12 + draw_index(-1, 0, place, PREFABS.len());
        let reach = world_size * 0.45;
        let entities = (0..count as i32)
            .map(|i| {
                let name = PREFABS[draw_index(i, 0, place, PREFABS.len())];
                let x = draw_range(i, 1, place, -reach, reach);
                let z = draw_range(i, 2, place, -reach, reach);
                WorldEntity::new(name, WorldPos::new(x, 0.0, z))
            })
            .collect();

        Ok(Self {
            seed,
            protocol: "synthetic.1".to_string(),
            transform,
            height,
            entities,
        })
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    fn elevation_at(&self, pos: WorldPos) -> f32 {
        let (x, y) = self.transform.clamp_to_map(self.transform.world_to_map(pos.x, pos.z));
        self.height.get(x, y)
    }
}

/// Fractal terrain with a radial falloff so the edges sink into the sea.
fn island_height(nx: f32, nz: f32, seed: u32) -> f32 {
    let n = fbm(nx * 5.0 + 17.0, nz * 5.0 - 9.0, seed, 6, 2.0, 0.5) * 0.5 + 0.5;
    let d = (nx * nx + nz * nz).sqrt() * 2.0;
    let falloff = (1.0 - d * d).max(0.0);
    (n * (0.35 + 0.9 * falloff)).clamp(0.0, 1.0) * MAX_ELEVATION
}

fn material(h: f32) -> (i32, [f32; 3]) {
    let t = h / MAX_ELEVATION;
    if t < SEA_LEVEL + 0.04 {
        (mask::SAND, SAND)
    } else if t < 0.55 {
        (mask::GRASS, GRASS)
    } else if t < 0.7 {
        (mask::FOREST, FOREST)
    } else if t < 0.85 {
        (mask::ROCK, ROCK)
    } else {
        (mask::SNOW, SNOW)
    }
}

impl TerrainSampler for SyntheticWorld {
    fn surface_color(&self, pos: WorldPos, mask: i32) -> Result<[f32; 3], HostError> {
        let h = self.elevation_at(pos);
        if !h.is_finite() {
            return Err(HostError::new(format!("no terrain at ({}, {})", pos.x, pos.z)));
        }
        let (material, color) = material(h);
        Ok(if mask::contains(mask, material) { color } else { BARE })
    }

    fn alpha(&self, x: usize, y: usize) -> Result<f32, HostError> {
        // Sparse speckle the alpha map is meant to soften.
        let v = hash2_unit(x as i32, y as i32, salted(self.seed, SALT_ALPHA));
        Ok(if v < 0.02 { 0.85 } else { 1.0 })
    }

    fn water_depth(&self, pos: WorldPos) -> Result<f32, HostError> {
        let cell = (pos.x.floor() as i32, pos.z.floor() as i32);
        let wave = (hash2(cell.0, cell.1, salted(self.seed, SALT_WAVES)) & 0xFFFF) as f32 / 65535.0;
        Ok(SEA_LEVEL + WATER_OFFSET + (wave - 0.5) * WAVE_AMPLITUDE)
    }
}

impl WorldHost for SyntheticWorld {
    fn heightfield(&self) -> &Grid<f32> {
        &self.height
    }

    fn world_size(&self) -> f32 {
        self.transform.world_size
    }

    fn max_elevation(&self) -> f32 {
        MAX_ELEVATION
    }

    fn seed(&self) -> i32 {
        self.seed
    }

    fn protocol(&self) -> String {
        self.protocol.clone()
    }

    fn entities(&self) -> Vec<WorldEntity> {
        self.entities.clone()
    }
}
