use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use minimap::config::Params;
use minimap::host::WorldHost;
use minimap::package::{encode_png, package};
use minimap::range::scan_elevation;
use minimap::render::render_heightmap;
use minimap::sink::FileSink;
use minimap::synthetic::SyntheticWorld;
use minimap::transform::WorldTransform;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let seed: i32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let world_size: f32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(3000.0);
    let resolution: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(1024);
    let out_dir: PathBuf = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    let world = SyntheticWorld::new(seed, world_size, resolution).context("failed to build synthetic world")?;
    let params = Params::default();

    info!(
        "Generating {}x{} map with seed={}, world_size={}",
        resolution, resolution, seed, world_size
    );

    let (result, timings) = minimap::generate(&world, &params).context("map synthesis failed")?;

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    for m in &result.monuments {
        info!("  {:28} ({}, {})", m.name, m.x, m.y);
    }

    let payload = package(result).context("failed to package map")?;
    let sink = FileSink::new(&out_dir);
    sink.save(&payload).context("failed to save map")?;

    // Diagnostic grayscale heightmap
    let height = world.heightfield();
    let range = scan_elevation(height, world.max_elevation())?;
    let transform = WorldTransform::for_heightfield(height, world.world_size(), world.world_origin())?;
    let gray = render_heightmap(height, range, &transform);
    let path = out_dir.join("heightmap.png");
    std::fs::write(&path, encode_png(&gray, transform.map_w, transform.map_h)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Saved {}", path.display());

    eprintln!("\nDone.");
    Ok(())
}
