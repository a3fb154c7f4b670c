use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::SynthesisResult;
use crate::config::MAP_FILENAME;
use crate::error::{MapError, Result};
use crate::monuments::MapMonument;

/// Everything a transport needs: PNG bytes, the monument list as JSON text,
/// and the world scalars.
#[derive(Clone, Debug, PartialEq)]
pub struct MapPayload {
    pub png: Vec<u8>,
    pub monuments: String,
    pub seed: i32,
    pub size: u32,
    pub protocol: String,
}

/// Text-safe field set sent over the wire. `data` is base64 PNG.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadForm {
    pub protocol: String,
    pub size: u32,
    pub seed: i32,
    pub monuments: String,
    pub filename: String,
    pub data: String,
}

pub fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)?;
    Ok(buf)
}

/// Encode the raster and serialize the monuments. Consumes the result so the
/// pixel buffer is freed as soon as the PNG exists.
pub fn package(result: SynthesisResult) -> Result<MapPayload> {
    let SynthesisResult {
        width,
        height,
        rgba,
        monuments,
        seed,
        world_size,
        protocol,
    } = result;

    let png = encode_png(&rgba, width, height)?;
    drop(rgba);

    Ok(MapPayload {
        png,
        monuments: serde_json::to_string(&monuments)?,
        seed,
        size: world_size,
        protocol,
    })
}

impl MapPayload {
    /// `{seed}_{size}_{protocol}`, the name persistence sinks store under.
    pub fn file_stem(&self) -> String {
        format!("{}_{}_{}", self.seed, self.size, self.protocol)
    }

    pub fn to_form(&self) -> UploadForm {
        UploadForm {
            protocol: self.protocol.clone(),
            size: self.size,
            seed: self.seed,
            monuments: self.monuments.clone(),
            filename: MAP_FILENAME.to_string(),
            data: STANDARD.encode(&self.png),
        }
    }

    pub fn from_form(form: &UploadForm) -> Result<Self> {
        Ok(Self {
            png: STANDARD.decode(&form.data)?,
            monuments: form.monuments.clone(),
            seed: form.seed,
            size: form.size,
            protocol: form.protocol.clone(),
        })
    }

    pub fn decode_image(&self) -> Result<RgbaImage> {
        Ok(image::load_from_memory_with_format(&self.png, ImageFormat::Png)?.to_rgba8())
    }

    /// Decode and check the raster against the expected map size.
    pub fn decode_image_sized(&self, w: u32, h: u32) -> Result<RgbaImage> {
        let img = self.decode_image()?;
        if img.dimensions() != (w, h) {
            return Err(MapError::ImageSize {
                expected_w: w,
                expected_h: h,
                actual_w: img.width(),
                actual_h: img.height(),
            });
        }
        Ok(img)
    }

    pub fn decode_monuments(&self) -> Result<Vec<MapMonument>> {
        Ok(serde_json::from_str(&self.monuments)?)
    }
}
