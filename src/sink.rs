use std::fs;
use std::path::PathBuf;

use log::info;
use serde::Serialize;

use crate::error::Result;
use crate::monuments::MapMonument;
use crate::package::MapPayload;

/// Metadata written next to the PNG.
#[derive(Serialize)]
struct Sidecar<'a> {
    protocol: &'a str,
    size: u32,
    seed: i32,
    monuments: Vec<MapMonument>,
}

/// Persists payloads as `{seed}_{size}_{protocol}.png` plus a `.json` sidecar.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the payload, returning the PNG path.
    pub fn save(&self, payload: &MapPayload) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let stem = payload.file_stem();
        let png_path = self.dir.join(format!("{stem}.png"));
        fs::write(&png_path, &payload.png)?;

        let sidecar = Sidecar {
            protocol: &payload.protocol,
            size: payload.size,
            seed: payload.seed,
            monuments: payload.decode_monuments()?,
        };
        fs::write(
            self.dir.join(format!("{stem}.json")),
            serde_json::to_vec_pretty(&sidecar)?,
        )?;

        info!("Saved {}", png_path.display());
        Ok(png_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_png_and_sidecar() {
        let dir = tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("maps"));
        let payload = MapPayload {
            png: vec![0x89, b'P', b'N', b'G'],
            monuments: r#"[{"X":1,"Y":2,"Name":"Satellite"}]"#.into(),
            seed: 7,
            size: 2000,
            protocol: "2100.1".into(),
        };

        let path = sink.save(&payload).unwrap();

        assert_eq!(path, dir.path().join("maps").join("7_2000_2100.1.png"));
        assert_eq!(fs::read(&path).unwrap(), payload.png);
        let meta: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.path().join("maps/7_2000_2100.1.json")).unwrap()).unwrap();
        assert_eq!(meta["seed"], 7);
        assert_eq!(meta["size"], 2000);
        assert_eq!(meta["protocol"], "2100.1");
        assert_eq!(meta["monuments"][0]["Name"], "Satellite");
    }
}
