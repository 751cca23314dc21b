use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brickify::assets::AssetLoader;
use brickify::models::{AppConfig, CatalogPart};
use brickify::server;
use brickify::services::{exporter, load_image_file, Converter, RenderService};

#[derive(Parser)]
#[command(name = "brickify")]
#[command(about = "Brickify - turn photos into brick mosaics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert an image file to a mosaic preview and parts list
    Convert {
        /// Input image (PNG, JPEG, ...)
        input: PathBuf,

        /// Mosaic width in bricks (default: from config)
        #[arg(short, long)]
        width: Option<String>,

        /// Preview pixels per brick (default: from config)
        #[arg(short, long)]
        cell_size: Option<u32>,

        /// Output PNG file path
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,

        /// Also write the parts list as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Catalog part id used in the CSV: 4073, 3070b or 35381
        #[arg(short, long)]
        part: Option<CatalogPart>,
    },
    /// List the palette colors mosaics are built from
    Palette,
    /// Write the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Convert {
            input,
            width,
            cell_size,
            output,
            csv,
            part,
        }) => run_convert_command(&input, width.as_deref(), cell_size, &output, csv, part),
        Some(Commands::Palette) => run_palette_command(),
        Some(Commands::Init { force }) => run_init_command(force),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brickify=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_cli_config() -> AppConfig {
    let loader = AssetLoader::from_env();
    AppConfig::load_from_assets(&loader)
}

/// Convert an image file without starting the server
fn run_convert_command(
    input: &PathBuf,
    width: Option<&str>,
    cell_size: Option<u32>,
    output: &PathBuf,
    csv: Option<PathBuf>,
    part: Option<CatalogPart>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = load_cli_config();
    let palette = config
        .build_palette()
        .map_err(|e| anyhow::anyhow!("Invalid palette in configuration: {e}"))?;
    let limits = &config.limits;
    let converter = Converter::new(palette, limits.max_grid_width, limits.max_grid_cells);
    let renderer = RenderService::new(
        limits.max_cell_size,
        limits.max_preview_pixels,
        config.export.optimize_png,
    );

    let width = match width {
        Some(raw) => converter.parse_width(raw)?,
        None => converter.validate_width(f64::from(config.defaults.grid_width))?,
    };
    let cell_size = renderer.validate_cell_size(cell_size.unwrap_or(config.defaults.cell_size))?;
    let part = part.unwrap_or(config.defaults.part);

    let source = load_image_file(input)?;
    let conversion = converter.convert(&source, width)?;
    renderer.validate_preview(conversion.mosaic(), cell_size)?;
    let png = renderer.render_png_blocking(&conversion, cell_size)?;

    std::fs::write(output, &png)?;

    let mosaic = conversion.mosaic();
    println!(
        "Rendered {}x{} mosaic ({} bricks) to {}",
        mosaic.width(),
        mosaic.height(),
        conversion.total_bricks(),
        output.display()
    );

    if let Some(csv_path) = csv {
        std::fs::write(&csv_path, exporter::parts_csv(conversion.parts(), part))?;
        println!("Wrote parts list to {}", csv_path.display());
    }

    println!("\nParts ({part}):");
    for entry in conversion.parts() {
        println!(
            "  {:>6}  {:<16} {} (catalog {})",
            entry.count,
            entry.color.name(),
            entry.color.hex(),
            entry.color.catalog_id()
        );
    }

    Ok(())
}

/// Print the palette in matching order
fn run_palette_command() -> anyhow::Result<()> {
    init_cli_tracing();

    let config = load_cli_config();
    let palette = config
        .build_palette()
        .map_err(|e| anyhow::anyhow!("Invalid palette in configuration: {e}"))?;

    println!("Palette ({} colors):", palette.len());
    for color in palette.iter() {
        println!(
            "  {:<16} {}  {:>3}  {}",
            color.name(),
            color.hex(),
            color.catalog_id(),
            color.catalog_name()
        );
    }

    Ok(())
}

/// Write config.yaml next to the binary's working directory (or CONFIG_FILE)
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let loader = AssetLoader::from_env();
    let report = loader.init(force)?;

    for f in &report.written {
        println!("Wrote {f}");
    }
    for f in &report.skipped {
        println!("Skipped existing {f} (use --force to overwrite)");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let backend_url = std::env::var("BACKEND_URL").ok();

    println!("Brickify v{VERSION}");
    println!("Photo to brick mosaic converter\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  BACKEND_URL = {}",
        backend_url.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::from_env();
    println!("\nAsset Sources:");
    println!("  Config:  {}", loader.config_source());

    println!("\nCommands:");
    println!("  brickify serve             Start the HTTP server");
    println!("  brickify convert <image>   Convert an image to a mosaic preview");
    println!("  brickify palette           List the palette colors");
    println!("  brickify init              Write config.yaml for customization");
    println!("\nRun 'brickify --help' for more options.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brickify=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(config = %asset_loader.config_source(), "Asset sources configured");

    let state = server::create_app_state(asset_loader)?;
    let app = server::build_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Brickify server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
