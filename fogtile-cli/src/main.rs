//! Fogtile CLI - Command-line interface
//!
//! This binary renders a single fog-of-war map tile to a PNG file,
//! driving the same service facade a host map application would.

use clap::Parser;
use fogtile::interceptor::{DataManifest, FetchOutcome};
use fogtile::logging::init_logging;
use fogtile::service::{FogTileService, ServiceConfig};
use fogtile::tile::TileStyle;

mod demo;
mod error;

use demo::{DemoFogSource, MemoryStore};
use error::CliError;

#[derive(Parser)]
#[command(name = "fogtile")]
#[command(about = "Render a fog-of-war map tile to a PNG file", long_about = None)]
struct Args {
    /// Zoom level of the requested tile
    #[arg(long)]
    zoom: i16,

    /// Tile column
    #[arg(long)]
    x: i64,

    /// Tile row
    #[arg(long)]
    y: i64,

    /// Output PNG file path
    #[arg(long)]
    output: String,

    /// Tile edge length in pixels (256, 512 or 1024)
    #[arg(long, default_value = "1024")]
    tile_size: u32,

    /// Draw a translucent border around the tile
    #[arg(long)]
    border: bool,

    /// Stamp the tile coordinates onto the image
    #[arg(long)]
    label: bool,

    /// Directory for the session log
    #[arg(long, default_value = "logs")]
    log_dir: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _guard = match init_logging(&args.log_dir, "fogtile.log") {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let config = ServiceConfig {
        tile_size: args.tile_size,
        manifest: DataManifest::Files(demo::manifest_names()),
        style: TileStyle {
            border: args.border,
            label: args.label,
        },
        ..ServiceConfig::default()
    };

    let tile_size = args.tile_size;
    let service = match FogTileService::new(config, MemoryStore::new(), move || {
        DemoFogSource::new(tile_size)
    }) {
        Ok(service) => service,
        Err(e) => CliError::ServiceCreation(e).exit(),
    };

    service.install();
    if let Err(e) = service.activate().await {
        CliError::Fetch(e).exit();
    }

    println!("Rendering tile:");
    println!("  Tile: x={}, y={}, zoom={}", args.x, args.y, args.zoom);
    println!("  Size: {}x{}", tile_size, tile_size);

    let path = format!("/custom-tile/{}/{}/{}", args.zoom, args.x, args.y);
    let outcome = match service.handle_fetch(&path).await {
        Ok(outcome) => outcome,
        Err(e) => CliError::Fetch(e).exit(),
    };

    let response = match outcome {
        FetchOutcome::Intercepted(response) => response,
        FetchOutcome::PassThrough => CliError::UnroutedPath(path).exit(),
    };

    match std::fs::write(&args.output, &response.body) {
        Ok(()) => {
            println!(
                "✓ Saved successfully: {} ({:.1} KB)",
                args.output,
                response.body.len() as f64 / 1024.0
            );
        }
        Err(error) => CliError::FileWrite {
            path: args.output.clone(),
            error,
        }
        .exit(),
    }
}
