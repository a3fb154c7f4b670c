pub mod config;
pub mod error;
pub mod grid;
pub mod host;
pub mod monuments;
pub mod noise;
pub mod package;
pub mod range;
pub mod render;
pub mod sink;
pub mod synthetic;
pub mod transform;

use std::time::Instant;

use log::info;

use config::Params;
use error::{MapError, Result};
use host::WorldHost;
use monuments::MapMonument;
use transform::WorldTransform;

/// Output of one synthesis run. Owns the raster until it is packaged.
pub struct SynthesisResult {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
    pub monuments: Vec<MapMonument>,
    pub seed: i32,
    pub world_size: u32,
    pub protocol: String,
}

impl SynthesisResult {
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

fn stage<T>(timings: &mut Vec<Timing>, name: &'static str, f: impl FnOnce() -> T) -> T {
    let t = Instant::now();
    let out = f();
    timings.push(Timing {
        name,
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });
    out
}

/// Turn one world snapshot into a minimap raster plus its landmarks.
pub fn generate<H: WorldHost + ?Sized>(host: &H, params: &Params) -> Result<(SynthesisResult, Vec<Timing>)> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let world_size = host.world_size();
    if !(world_size.is_finite() && world_size > 0.0) {
        return Err(MapError::InvalidWorldSize(world_size));
    }
    let height = host.heightfield();
    let transform = WorldTransform::for_heightfield(height, world_size, host.world_origin())?;
    info!(
        "Generating a terrain texture of size: {}x{}",
        transform.map_w, transform.map_h
    );

    // 1. Elevation bounds for normalization
    let range = stage(&mut timings, "height_range", || {
        range::scan_elevation(height, host.max_elevation())
    })?;

    // 2. Pixels
    let rgba = stage(&mut timings, "render", || {
        render::render_minimap(height, range, &transform, host, params)
    })?;

    // 3. Landmarks
    let monuments = stage(&mut timings, "monuments", || {
        monuments::classify_monuments(&host.entities(), &transform)
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    let result = SynthesisResult {
        width: transform.map_w,
        height: transform.map_h,
        rgba,
        monuments,
        seed: host.seed(),
        world_size: world_size as u32,
        protocol: host.protocol(),
    };

    Ok((result, timings))
}
