use thiserror::Error;

/// Failure reported by the host that owns the terrain. The pipeline never
/// retries these; they abort the run.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("heightfield has no samples ({w}x{h})")]
    EmptyHeightfield { w: usize, h: usize },
    #[error("heightfield must be at least 2x2 to cover a map, got {w}x{h}")]
    HeightfieldTooSmall { w: usize, h: usize },
    #[error("world size must be positive and finite, got {0}")]
    InvalidWorldSize(f32),
    #[error("map dimensions must be non-zero, got {w}x{h}")]
    InvalidMapSize { w: usize, h: usize },
    #[error("heightfield {w}x{h} does not cover a {map_w}x{map_h} map")]
    HeightfieldMismatch {
        w: usize,
        h: usize,
        map_w: usize,
        map_h: usize,
    },
    #[error("host sampling failed: {0}")]
    Host(#[from] HostError),
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("decoded image is {actual_w}x{actual_h}, expected {expected_w}x{expected_h}")]
    ImageSize {
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = MapError> = std::result::Result<T, E>;
