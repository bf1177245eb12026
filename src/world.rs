// The world owns everything a run needs: geometry constants, the sun and
// gravity, the environment and resource dials, the seeded generator and the
// single plant. All outside mutation goes through validated setters that
// warn and ignore bad input instead of failing the caller.

use crate::config::SimulationConfig;
use crate::environment::{Environment, Resources};
use crate::plant::{Plant, PlantState};
use crate::policy::EnvironmentPolicy;
use crate::random::Mulberry32;
use crate::vec2::Vec2;

// Vertical layout: the bottom quarter is soil, the sun baseline sits at the
// very top, and the sun may slide across three quarters of the width.
const SKY_RATIO: f64 = 3.0 / 4.0;
const SUN_RATIO: f64 = 0.0 / 8.0;
const SUN_MOVEMENT_MAX: f64 = 3.0 / 4.0;

/// The slice of world state growth code reads: where the sun is, which way
/// gravity pulls, and where the ground line sits. Copied out per tick so
/// the plant never needs a reference back into the world that owns it.
#[derive(Clone, Copy, Debug)]
pub struct Surroundings {
    pub sun_position: Vec2,
    pub gravity: Vec2,
    pub ground_y: f64,
}

impl Surroundings {
    pub fn is_exposed_to_sun(&self, position: Vec2) -> bool {
        position.y >= self.ground_y
    }

    /// Unit vector from the sun toward `position`; zero below ground.
    pub fn normalized_sun_ray_to(&self, position: Vec2) -> Vec2 {
        if !self.is_exposed_to_sun(position) {
            return Vec2::ZERO;
        }
        (position - self.sun_position).normalized()
    }
}

pub struct World {
    config: SimulationConfig,
    width: f64,
    height: f64,
    middle_x: f64,
    ground_y: f64,
    sun_y: f64,
    sun_position: Vec2,
    gravity: Vec2,
    environment: Environment,
    resources: Resources,
    rng: Mulberry32,
    plant: Plant,
    // Run control, driven by the UI loop and the API server.
    pub paused: bool,
    pub speed_multiplier: f64,
    pub speed_accumulator: f64,
}

impl World {
    pub fn new(random: Mulberry32, width: f64, height: f64) -> Self {
        let config = SimulationConfig {
            width,
            height,
            ..SimulationConfig::default()
        };
        Self::with_config(random, config)
    }

    pub fn with_config(random: Mulberry32, config: SimulationConfig) -> Self {
        let width = config.width;
        let height = config.height;
        let middle_x = (width / 2.0).round();
        let sun_y = (height * (1.0 - SUN_RATIO)).round();
        let ground_y = (height * (1.0 - SKY_RATIO)).round();

        let plant = Plant::new(
            Vec2::new(middle_x, ground_y),
            &config,
            Box::new(EnvironmentPolicy),
        );
        let environment = config.environment;
        let resources = config.resources;

        Self {
            config,
            width,
            height,
            middle_x,
            ground_y,
            sun_y,
            sun_position: Vec2::new(middle_x, sun_y),
            gravity: Vec2::ZERO,
            environment,
            resources,
            rng: random,
            plant,
            paused: false,
            speed_multiplier: 1.0,
            speed_accumulator: 0.0,
        }
    }

    /// One discrete growth step. `delta_time` is accepted for caller
    /// convenience but never used for pacing.
    pub fn update(&mut self, _delta_time: f64) {
        let surroundings = self.surroundings();
        self.plant.update(
            &surroundings,
            self.environment,
            self.resources,
            &mut self.rng,
        );
    }

    /// Discards all growth and replays the original seed from scratch.
    pub fn reset(&mut self) {
        self.rng.reset();
        self.plant = Plant::new(
            Vec2::new(self.middle_x, self.ground_y),
            &self.config,
            Box::new(EnvironmentPolicy),
        );
    }

    // --- validated mutators -------------------------------------------------

    pub fn move_sun(&mut self, offset: i32) {
        if !(-100..=100).contains(&offset) {
            tracing::warn!(offset, "sun offset not in [-100, 100], ignoring");
            return;
        }
        let movement_percent = offset as f64 / 100.0;
        let movement = movement_percent * 0.5 * (SUN_MOVEMENT_MAX * self.width);
        self.sun_position = Vec2::new(self.middle_x + movement, self.sun_y);
    }

    pub fn set_gravity(&mut self, magnitude: f64) {
        if !(0.0..=10.0).contains(&magnitude) {
            tracing::warn!(magnitude, "gravity not in [0, 10], ignoring");
            return;
        }
        self.gravity = Vec2::new(0.0, -magnitude);
    }

    pub fn set_light_hours(&mut self, hours: i32) {
        if !(0..=24).contains(&hours) || hours % 2 != 0 {
            tracing::warn!(hours, "light hours must be even and in [0, 24], ignoring");
            return;
        }
        self.environment.light_hours = hours;
    }

    pub fn set_temperature(&mut self, degrees: i32) {
        if !(0..=40).contains(&degrees) || degrees % 5 != 0 {
            tracing::warn!(
                degrees,
                "temperature must be a multiple of 5 in [0, 40], ignoring"
            );
            return;
        }
        self.environment.temperature = degrees;
    }

    pub fn set_carbon_dioxide(&mut self, ppm: i32) {
        if !(0..=900).contains(&ppm) || ppm % 100 != 0 {
            tracing::warn!(ppm, "CO2 must be a multiple of 100 in [0, 900], ignoring");
            return;
        }
        self.resources.carbon_dioxide = ppm;
    }

    pub fn set_water(&mut self, level: i32) {
        if !(0..=4).contains(&level) {
            tracing::warn!(level, "water level not in [0, 4], ignoring");
            return;
        }
        self.resources.water = level;
    }

    pub fn set_nutrients(&mut self, level: i32) {
        if !(0..=4).contains(&level) {
            tracing::warn!(level, "nutrient level not in [0, 4], ignoring");
            return;
        }
        self.resources.nutrients = level;
    }

    // --- run control --------------------------------------------------------

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn increase_speed(&mut self) {
        self.speed_multiplier = (self.speed_multiplier * 1.5).min(10.0);
    }

    pub fn decrease_speed(&mut self) {
        self.speed_multiplier = (self.speed_multiplier / 1.5).max(0.1);
    }

    pub fn reset_speed(&mut self) {
        self.speed_multiplier = 1.0;
    }

    // --- read access --------------------------------------------------------

    pub fn surroundings(&self) -> Surroundings {
        Surroundings {
            sun_position: self.sun_position,
            gravity: self.gravity,
            ground_y: self.ground_y,
        }
    }

    pub fn is_exposed_to_sun(&self, position: Vec2) -> bool {
        self.surroundings().is_exposed_to_sun(position)
    }

    pub fn normalized_sun_ray_to(&self, position: Vec2) -> Vec2 {
        self.surroundings().normalized_sun_ray_to(position)
    }

    /// The ray the renderer draws: from the sun toward the spot the seed
    /// was planted.
    pub fn sun_ray(&self) -> Vec2 {
        self.normalized_sun_ray_to(Vec2::new(self.middle_x, self.ground_y))
    }

    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    pub fn sun_position(&self) -> Vec2 {
        self.sun_position
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn resources(&self) -> Resources {
        self.resources
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn middle_x(&self) -> f64 {
        self.middle_x
    }

    pub fn ground_y(&self) -> f64 {
        self.ground_y
    }

    /// Headline numbers for the stats overlay and the API:
    /// (age, state, stem fill, root fill, leaf count, flower size).
    pub fn stats(&self) -> (u64, PlantState, f64, f64, usize, i32) {
        let snapshot = self.plant.snapshot();
        let flower_size = self.plant.flower().map(|f| f.size()).unwrap_or(0);
        (
            snapshot.age,
            snapshot.state,
            snapshot.stem_fill,
            snapshot.root_fill,
            snapshot.leaf_count,
            flower_size,
        )
    }
}
