use std::net::SocketAddr;

use anyhow::Context;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use log::{error, info};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use minimap::config::Params;
use minimap::package::{UploadForm, package};
use minimap::synthetic::SyntheticWorld;

const MAX_RESOLUTION: usize = 4096;

#[derive(Deserialize)]
struct GenerateRequest {
    seed: Option<i32>,
    world_size: Option<f32>,
    resolution: Option<usize>,
    protocol: Option<String>,
    water_depth_bias: Option<f32>,
}

fn build_form(req: GenerateRequest) -> minimap::error::Result<UploadForm> {
    let seed = req.seed.unwrap_or(42);
    let world_size = req.world_size.unwrap_or(3000.0);
    let resolution = req.resolution.unwrap_or(1024).min(MAX_RESOLUTION);

    let defaults = Params::default();
    let params = Params {
        water_depth_bias: req.water_depth_bias.unwrap_or(defaults.water_depth_bias),
        ..defaults
    };

    let mut world = SyntheticWorld::new(seed, world_size, resolution)?;
    if let Some(protocol) = req.protocol {
        world = world.with_protocol(protocol);
    }

    let (result, timings) = minimap::generate(&world, &params)?;
    for t in &timings {
        info!("  {:20} {:8.1} ms", t.name, t.ms);
    }
    Ok(package(result)?.to_form())
}

async fn generate_handler(Json(req): Json<GenerateRequest>) -> Result<Json<UploadForm>, (StatusCode, String)> {
    let form = tokio::task::spawn_blocking(move || build_form(req))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| {
            error!("generate failed: {e}");
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        })?;

    Ok(Json(form))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        .fallback_service(frontend)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("minimap server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}
