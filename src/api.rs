// API module for headless mode - HTTP endpoints to interact with the world

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use crate::config::SimulationConfig;
use crate::environment::{Environment, Resources};
use crate::plant::PlantState;
use crate::world::World;

// Serializable views of the world for API responses

#[derive(Serialize, Clone)]
pub struct SegmentData {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

#[derive(Serialize, Clone)]
pub struct LeafData {
    pub stem: SegmentData,
    pub area: i32,
    pub fully_grown: bool,
}

#[derive(Serialize, Clone)]
pub struct FlowerData {
    pub x: f64,
    pub y: f64,
    pub petal_count: i32,
    pub size: i32,
    pub fully_grown: bool,
}

#[derive(Serialize, Clone)]
pub struct PlantData {
    pub state: PlantState,
    pub age: u64,
    pub top_x: f64,
    pub top_y: f64,
    pub stem: Vec<SegmentData>,
    pub roots: Vec<Vec<SegmentData>>,
    pub leaves: Vec<LeafData>,
    pub flower: Option<FlowerData>,
}

#[derive(Serialize, Clone)]
pub struct StatsData {
    pub age: u64,
    pub state: PlantState,
    pub stem_fill: f64,
    pub stem_length: f64,
    pub root_fill: f64,
    pub leaf_count: usize,
    pub flower_size: i32,
    pub seed: u32,
    pub paused: bool,
}

#[derive(Serialize, Clone)]
pub struct WorldStateResponse {
    pub plant: PlantData,
    pub environment: Environment,
    pub resources: Resources,
    pub width: f64,
    pub height: f64,
    pub sun_x: f64,
    pub sun_y: f64,
    pub gravity: f64,
    pub ground_y: f64,
    pub stats: StatsData,
}

#[derive(Deserialize)]
pub struct StepQuery {
    pub steps: Option<usize>,
}

#[derive(Deserialize)]
pub struct EnvironmentUpdate {
    pub light_hours: Option<i32>,
    pub temperature: Option<i32>,
}

#[derive(Deserialize)]
pub struct ResourcesUpdate {
    pub water: Option<i32>,
    pub nutrients: Option<i32>,
    pub carbon_dioxide: Option<i32>,
}

#[derive(Deserialize)]
pub struct SunUpdate {
    pub offset: i32,
}

#[derive(Deserialize)]
pub struct GravityUpdate {
    pub magnitude: f64,
}

// Shared state for the API server
#[derive(Clone)]
pub struct ApiState {
    pub world: Arc<Mutex<World>>,
}

impl ApiState {
    pub fn new(world: World) -> Self {
        Self {
            world: Arc::new(Mutex::new(world)),
        }
    }
}

fn segment_data(segment: &crate::growable::Segment) -> SegmentData {
    SegmentData {
        start_x: segment.start.x,
        start_y: segment.start.y,
        end_x: segment.end.x,
        end_y: segment.end.y,
    }
}

// Helper function to convert world state to an API response
fn world_to_response(world: &World) -> WorldStateResponse {
    let plant = world.plant();
    let (age, state, stem_fill, root_fill, leaf_count, flower_size) = world.stats();

    WorldStateResponse {
        plant: PlantData {
            state: plant.state(),
            age: plant.age(),
            top_x: plant.top_position().x,
            top_y: plant.top_position().y,
            stem: plant.stem_segments().iter().map(segment_data).collect(),
            roots: plant
                .root_segments()
                .map(|segments| segments.iter().map(segment_data).collect())
                .collect(),
            leaves: plant
                .leaves()
                .iter()
                .map(|leaf| LeafData {
                    stem: segment_data(&leaf.stem_segment()),
                    area: leaf.area(),
                    fully_grown: leaf.is_fully_grown(),
                })
                .collect(),
            flower: plant.flower().map(|flower| FlowerData {
                x: flower.position().x,
                y: flower.position().y,
                petal_count: flower.petal_count(),
                size: flower.size(),
                fully_grown: flower.is_fully_grown(),
            }),
        },
        environment: world.environment(),
        resources: world.resources(),
        width: world.width(),
        height: world.height(),
        sun_x: world.sun_position().x,
        sun_y: world.sun_position().y,
        gravity: -world.gravity().y,
        ground_y: world.ground_y(),
        stats: StatsData {
            age,
            state,
            stem_fill,
            stem_length: plant.stem_length(),
            root_fill,
            leaf_count,
            flower_size,
            seed: world.seed(),
            paused: world.paused,
        },
    }
}

// GET /state - Get current world state
async fn get_state(
    State(api_state): State<ApiState>,
) -> Result<Json<WorldStateResponse>, StatusCode> {
    let world = api_state
        .world
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(world_to_response(&world)))
}

// GET /stats - Get headline statistics
async fn get_stats(State(api_state): State<ApiState>) -> Result<Json<StatsData>, StatusCode> {
    let world = api_state
        .world
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let (age, state, stem_fill, root_fill, leaf_count, flower_size) = world.stats();
    Ok(Json(StatsData {
        age,
        state,
        stem_fill,
        stem_length: world.plant().stem_length(),
        root_fill,
        leaf_count,
        flower_size,
        seed: world.seed(),
        paused: world.paused,
    }))
}

// POST /step - Step the world forward
async fn step_world(
    Query(params): Query<StepQuery>,
    State(api_state): State<ApiState>,
) -> Result<Json<WorldStateResponse>, StatusCode> {
    let mut world = api_state
        .world
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let steps = params.steps.unwrap_or(1);
    for _ in 0..steps {
        world.update(1.0);
    }

    Ok(Json(world_to_response(&world)))
}

// POST /reset - Replay the seed from scratch
async fn reset_world(
    State(api_state): State<ApiState>,
) -> Result<Json<WorldStateResponse>, StatusCode> {
    let mut world = api_state
        .world
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    world.reset();
    Ok(Json(world_to_response(&world)))
}

// POST /pause - Toggle pause
async fn pause_world(
    State(api_state): State<ApiState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut world = api_state
        .world
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    world.toggle_pause();
    Ok(Json(serde_json::json!({ "paused": world.paused })))
}

// GET /config - Get the active configuration
async fn get_config(
    State(api_state): State<ApiState>,
) -> Result<Json<SimulationConfig>, StatusCode> {
    let world = api_state
        .world
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(world.config().clone()))
}

// POST /environment - Adjust light hours and temperature. Out-of-range
// values are logged and ignored, mirroring the slider behavior, so the
// response always reflects what actually stuck.
async fn set_environment(
    State(api_state): State<ApiState>,
    Json(update): Json<EnvironmentUpdate>,
) -> Result<Json<Environment>, StatusCode> {
    let mut world = api_state
        .world
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    if let Some(hours) = update.light_hours {
        world.set_light_hours(hours);
    }
    if let Some(degrees) = update.temperature {
        world.set_temperature(degrees);
    }
    Ok(Json(world.environment()))
}

// POST /resources - Adjust water, nutrients and CO2
async fn set_resources(
    State(api_state): State<ApiState>,
    Json(update): Json<ResourcesUpdate>,
) -> Result<Json<Resources>, StatusCode> {
    let mut world = api_state
        .world
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    if let Some(level) = update.water {
        world.set_water(level);
    }
    if let Some(level) = update.nutrients {
        world.set_nutrients(level);
    }
    if let Some(ppm) = update.carbon_dioxide {
        world.set_carbon_dioxide(ppm);
    }
    Ok(Json(world.resources()))
}

// POST /sun - Slide the sun across its movement band
async fn set_sun(
    State(api_state): State<ApiState>,
    Json(update): Json<SunUpdate>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut world = api_state
        .world
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    world.move_sun(update.offset);
    let sun = world.sun_position();
    Ok(Json(serde_json::json!({ "sun_x": sun.x, "sun_y": sun.y })))
}

// POST /gravity - Set the gravity magnitude
async fn set_gravity(
    State(api_state): State<ApiState>,
    Json(update): Json<GravityUpdate>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut world = api_state
        .world
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    world.set_gravity(update.magnitude);
    Ok(Json(serde_json::json!({ "gravity": -world.gravity().y })))
}

// Create the API router
pub fn create_router(api_state: ApiState) -> Router {
    Router::new()
        .route("/state", get(get_state))
        .route("/stats", get(get_stats))
        .route("/step", post(step_world))
        .route("/reset", post(reset_world))
        .route("/pause", post(pause_world))
        .route("/config", get(get_config))
        .route("/environment", post(set_environment))
        .route("/resources", post(set_resources))
        .route("/sun", post(set_sun))
        .route("/gravity", post(set_gravity))
        .layer(CorsLayer::permissive())
        .with_state(api_state)
}

// Run the API server with automatic world stepping
pub async fn run_server(api_state: ApiState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(api_state.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    println!(
        "Sproutling headless API server running on http://localhost:{}",
        port
    );
    println!("Endpoints:");
    println!("  GET  /state  - Get full world state");
    println!("  GET  /stats  - Get headline statistics");
    println!("  POST /step?steps=N - Step world N times (default: 1)");
    println!("  POST /reset - Replay the seed from scratch");
    println!("  POST /pause - Toggle pause");
    println!("  GET  /config - Get the active configuration");
    println!("  POST /environment - Set light_hours / temperature");
    println!("  POST /resources - Set water / nutrients / carbon_dioxide");
    println!("  POST /sun - Set the sun offset in [-100, 100]");
    println!("  POST /gravity - Set the gravity magnitude in [0, 10]");
    println!();
    println!("World is stepping automatically at ~60 FPS (respects pause state)");

    // Spawn background task to continuously step the world
    let stepping_task = tokio::spawn(stepping_loop(api_state.clone()));

    // Run the server
    let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

    // Wait for either task to complete
    tokio::select! {
        result = server_handle => {
            result??;
        }
        _ = stepping_task => {
            eprintln!("Stepping loop ended unexpectedly");
        }
    }

    Ok(())
}

// Background task that continuously steps the world
async fn stepping_loop(api_state: ApiState) {
    const TARGET_FPS: f64 = 60.0;
    let frame_duration = std::time::Duration::from_secs_f64(1.0 / TARGET_FPS);

    loop {
        let start = std::time::Instant::now();

        {
            let mut world = match api_state.world.lock() {
                Ok(world) => world,
                Err(_) => break,
            };

            if !world.paused {
                // Handle speed multiplier with accumulator for fractional speeds
                world.speed_accumulator += world.speed_multiplier;
                let steps = world.speed_accumulator.floor() as usize;
                world.speed_accumulator -= steps as f64;

                for _ in 0..steps {
                    world.update(frame_duration.as_secs_f64() * 1000.0);
                }
            }
        }

        // Sleep to maintain target FPS
        let elapsed = start.elapsed();
        if elapsed < frame_duration {
            tokio::time::sleep(frame_duration - elapsed).await;
        }
    }
}
