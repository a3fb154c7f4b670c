use crate::host::mask;

/// Water color for every cell below the water threshold (RGB 72, 61, 139).
pub const WATER_COLOR: [u8; 4] = [72, 61, 139, 255];

/// Transport filename. Persistence sinks use [`crate::package::MapPayload::file_stem`] instead.
pub const MAP_FILENAME: &str = "map.png";

/// Tuning values for one synthesis run. Everything else comes from the host.
#[derive(Clone, Debug)]
pub struct Params {
    /// Added to the host's water depth before comparing against normalized
    /// terrain height. The source water map oscillates around the surface.
    pub water_depth_bias: f32,
    /// Material mask handed to the host's surface color sampler.
    pub surface_mask: i32,
    pub water_color: [u8; 4],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            water_depth_bias: 0.5,
            surface_mask: mask::EVERYTHING,
            water_color: WATER_COLOR,
        }
    }
}
