use clap::Parser;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod environment;
mod flower;
mod growable;
mod leaf;
mod plant;
mod policy;
mod random;
mod vec2;
mod world;

use config::SimulationConfig;
use random::Mulberry32;
use world::World;

#[cfg(feature = "ui")]
mod controls;
#[cfg(feature = "ui")]
mod visualization;

#[cfg(feature = "ui")]
use macroquad::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run in headless mode (HTTP API server)
    #[arg(long)]
    headless: bool,

    /// Port for headless API server
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Configuration file path (YAML or JSON). If not specified, searches for config.yaml, config.yml, or config.json in current directory.
    #[arg(short, long)]
    config: Option<String>,

    /// Seed for the random generator; a random one is drawn when omitted
    #[arg(long)]
    seed: Option<u32>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn build_world(config: SimulationConfig, seed: Option<u32>) -> World {
    let random = match seed {
        Some(seed) => Mulberry32::new(seed),
        None => Mulberry32::from_entropy(),
    };
    tracing::info!(seed = random.seed(), "world created");
    World::with_config(random, config)
}

#[cfg(not(feature = "ui"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Headless mode only
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    headless_main(args.port, config, args.seed).await
}

#[cfg(feature = "ui")]
#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    let args = Args::parse();

    // Load configuration
    let config = match load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    if args.headless {
        // Run headless mode even with UI feature enabled
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            if let Err(e) = headless_main(args.port, config, args.seed).await {
                eprintln!("Error running headless mode: {}", e);
                std::process::exit(1);
            }
        });
    } else {
        // Run UI mode
        ui_main(config, args.seed).await;
    }
}

/// Load configuration from file or use default
fn load_config(config_path: Option<&str>) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    if let Some(path) = config_path {
        // User specified a config file
        SimulationConfig::from_file(path)
            .map_err(|e| format!("Failed to load config from {}: {}", path, e).into())
    } else {
        // Try default paths
        Ok(SimulationConfig::from_default_paths())
    }
}

#[cfg(feature = "ui")]
async fn ui_main(config: SimulationConfig, seed: Option<u32>) {
    use controls::{handle_controls, InputState};
    use visualization::{draw_backdrop, draw_plant, draw_stats_and_help};

    let mut world = build_world(config, seed);
    let mut input = InputState::default();

    loop {
        // Handle player controls
        handle_controls(&mut world, &mut input);

        draw_backdrop(&world);
        draw_plant(&world);

        // Update world only if not paused
        // Handle speed multiplier with accumulator for fractional speeds
        if !world.paused {
            world.speed_accumulator += world.speed_multiplier;
            let steps = world.speed_accumulator.floor() as usize;
            world.speed_accumulator -= steps as f64;

            for _ in 0..steps {
                world.update(get_frame_time() as f64 * 1000.0);
            }
        }

        // Draw statistics overlay (always visible)
        draw_stats_and_help(&world);

        // Take screenshot if requested
        if input.take_screenshot {
            input.take_screenshot = false;
            let timestamp = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_secs();
            let filename = format!("sproutling_screenshot_{}.png", timestamp);

            match capture_screenshot(&filename) {
                Ok(_) => {
                    println!("Screenshot saved: {}", filename);
                }
                Err(e) => {
                    eprintln!("Failed to save screenshot {}: {}", filename, e);
                }
            }
        }

        next_frame().await;
    }
}

#[cfg(feature = "ui")]
fn window_conf() -> Conf {
    // Try to load config to set window size, fall back to defaults if not available
    let config = SimulationConfig::from_default_paths();

    Conf {
        window_title: "Sproutling - Plant Growth Simulation".to_owned(),
        window_width: config.width as i32,
        window_height: config.height as i32,
        ..Default::default()
    }
}

#[cfg(feature = "ui")]
/// Capture a screenshot of the current screen
fn capture_screenshot(filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Get the screen data from macroquad
    // This returns an Image struct with pixel data in RGBA format
    let screen_image = get_screen_data();

    let width = screen_image.width as u32;
    let height = screen_image.height as u32;
    let bytes = &screen_image.bytes;

    // Convert macroquad Image to image crate format
    // macroquad's Image has bytes in RGBA format, stored row by row
    let mut img = image::RgbaImage::new(width, height);

    // OpenGL has origin at bottom-left, images at top-left, so flip vertically
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize * 4;
            if idx + 3 < bytes.len() {
                let r = bytes[idx];
                let g = bytes[idx + 1];
                let b = bytes[idx + 2];
                let a = bytes[idx + 3];

                let img_y = height - 1 - y;
                img.put_pixel(x, img_y, image::Rgba([r, g, b, a]));
            }
        }
    }

    // Save the image as PNG
    img.save(filename)?;

    Ok(())
}

/// Headless mode - runs HTTP API server
async fn headless_main(
    port: u16,
    config: SimulationConfig,
    seed: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    use api::run_server;
    use api::ApiState;

    let world = build_world(config, seed);
    let api_state = ApiState::new(world);

    run_server(api_state, port).await?;

    Ok(())
}
