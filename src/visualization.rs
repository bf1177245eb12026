// Rendering of the world and the plant. Everything here reads the world
// through its public accessors; simulation state is never touched.

use macroquad::prelude::*;

use crate::plant::PlantState;
use crate::vec2::Vec2;
use crate::world::World;

const SKY_COLOR: Color = Color::new(0.68, 0.85, 0.90, 1.0);
const SOIL_COLOR: Color = Color::new(0.60, 0.46, 0.33, 1.0);
const GROUND_LINE_COLOR: Color = Color::new(0.30, 0.20, 0.16, 1.0);
const SUN_COLOR: Color = Color::new(1.0, 0.87, 0.13, 1.0);
const SEED_COLOR: Color = Color::new(0.40, 0.26, 0.13, 1.0);
const ROOT_COLOR: Color = Color::new(0.82, 0.74, 0.54, 1.0);
const STEM_COLOR: Color = Color::new(0.0, 0.50, 0.0, 1.0);
const PETAL_EVEN_COLOR: Color = Color::new(0.93, 0.75, 0.0, 1.0);
const PETAL_ODD_COLOR: Color = Color::new(1.0, 0.85, 0.01, 1.0);
const OUTLINE_COLOR: Color = BLACK;

// World coordinates grow upward; the screen grows downward.
fn to_screen(position: Vec2) -> macroquad::prelude::Vec2 {
    vec2(position.x as f32, screen_height() - position.y as f32)
}

pub fn draw_backdrop(world: &World) {
    let width = screen_width();
    let height = screen_height();
    let ground_y = height - world.ground_y() as f32;

    // Sky and soil
    draw_rectangle(0.0, 0.0, width, ground_y, SKY_COLOR);
    draw_rectangle(0.0, ground_y, width, height - ground_y, SOIL_COLOR);
    draw_line(0.0, ground_y, width, ground_y, 4.0, GROUND_LINE_COLOR);

    // Three parallel sun rays toward the planting spot
    let sun = world.sun_position();
    let ray = world.sun_ray().scale(200.0);
    let side_step = Vec2::new(ray.y, -ray.x).normalized().scale(55.0);
    for offset in [Vec2::ZERO, side_step, side_step.scale(-1.0)] {
        let start = to_screen(sun + offset);
        let end = to_screen(Vec2::sum(&[sun, ray, offset]));
        draw_line(start.x, start.y, end.x, end.y, 8.0, SUN_COLOR);
    }

    // Sun disc with a sky-colored halo so the rays do not touch it
    let sun_screen = to_screen(sun);
    draw_circle(sun_screen.x, sun_screen.y, 125.0, SKY_COLOR);
    draw_circle(sun_screen.x, sun_screen.y, 100.0, SUN_COLOR);

    // The seed the plant sprouted from
    let seed = to_screen(Vec2::new(world.middle_x(), world.ground_y() - 15.0));
    draw_ellipse(seed.x, seed.y, 15.0, 20.0, 0.0, SEED_COLOR);
}

pub fn draw_plant(world: &World) {
    let plant = world.plant();

    for segments in plant.root_segments() {
        draw_polyline(segments, 8.0, OUTLINE_COLOR);
        draw_polyline(segments, 6.0, ROOT_COLOR);
    }

    draw_polyline(plant.stem_segments(), 10.0, OUTLINE_COLOR);
    draw_polyline(plant.stem_segments(), 8.0, STEM_COLOR);

    for leaf in plant.leaves() {
        let stalk = leaf.stem_segment();
        let start = to_screen(stalk.start);
        let end = to_screen(stalk.end);
        draw_line(start.x, start.y, end.x, end.y, 4.0, STEM_COLOR);

        if leaf.area() > 0 {
            let is_left = stalk.end.x <= world.middle_x();
            draw_leaf_blade(end, leaf.area() as f32, is_left);
        }
    }

    if let Some(flower) = plant.flower() {
        draw_flower(flower);
    }

    if plant.state() == PlantState::Dead {
        let label = "the plant has died - press R to replant";
        let size = 32.0;
        let text_width = measure_text(label, None, size as u16, 1.0).width;
        draw_text(
            label,
            (screen_width() - text_width) / 2.0,
            screen_height() / 3.0,
            size,
            Color::new(0.9, 0.2, 0.2, 0.9),
        );
    }
}

fn draw_polyline(segments: &[crate::growable::Segment], thickness: f32, color: Color) {
    for segment in segments {
        let start = to_screen(segment.start);
        let end = to_screen(segment.end);
        draw_line(start.x, start.y, end.x, end.y, thickness, color);
    }
}

// A stylized blade: two triangles sharing the stalk tip, pointed away from
// the stem. `area` doubles as the pixel scale, matching how the leaf grows.
fn draw_leaf_blade(tip: macroquad::prelude::Vec2, area: f32, is_left: bool) {
    let reach = if is_left { -area } else { area };
    let far = vec2(tip.x + reach, tip.y - area * 0.35);
    let upper = vec2(tip.x + reach * 0.45, tip.y - area * 0.45);
    let lower = vec2(tip.x + reach * 0.45, tip.y + area * 0.25);

    draw_triangle(tip, upper, far, STEM_COLOR);
    draw_triangle(tip, far, lower, STEM_COLOR);
    draw_line(tip.x, tip.y, far.x, far.y, 1.5, OUTLINE_COLOR);
}

fn draw_flower(flower: &crate::flower::Flower) {
    let center = flower.position();
    let size = flower.size() as f64;

    for i in 0..flower.petal_count() {
        let angle_deg = i as f64 * 360.0 / flower.petal_count() as f64;
        let direction = Vec2::at_angle(Vec2::new(0.0, -1.0), angle_deg.to_radians());
        let start = to_screen(center);
        let end = to_screen(center + direction.scale(size));
        let color = if i % 2 == 0 {
            PETAL_EVEN_COLOR
        } else {
            PETAL_ODD_COLOR
        };
        draw_line(start.x, start.y, end.x, end.y, 10.0, color);
    }

    let center_screen = to_screen(center);
    draw_circle(
        center_screen.x,
        center_screen.y,
        (size * 2.0 / 3.0) as f32,
        SEED_COLOR,
    );
}

pub fn draw_stats_and_help(world: &World) {
    let (age, state, stem_fill, root_fill, leaf_count, flower_size) = world.stats();
    let environment = world.environment();
    let resources = world.resources();

    let lines = [
        format!(
            "age: {}  state: {:?}  stem: {:.0}%  roots: {:.0}%  leaves: {}  flower: {}",
            age,
            state,
            stem_fill * 100.0,
            root_fill * 100.0,
            leaf_count,
            flower_size,
        ),
        format!(
            "light: {}h  temp: {}C  CO2: {}ppm  water: {}  nutrients: {}  gravity: {}",
            environment.light_hours,
            environment.temperature,
            resources.carbon_dioxide,
            resources.water,
            resources.nutrients,
            world.gravity().y.abs(),
        ),
        format!(
            "seed: {}  speed: {:.1}x{}",
            world.seed(),
            world.speed_multiplier,
            if world.paused { "  [paused]" } else { "" },
        ),
    ];

    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, 22.0 + i as f32 * 20.0, 18.0, WHITE);
    }

    let help = [
        "SPACE=Pause | R=Replant | Shift+Left/Right=Speed | 0=1x | P=Screenshot",
        "Arrows=Sun/Gravity | Q/A=Light | W/S=Temp | E/D=CO2 | T/G=Water | Y/H=Nutrients",
    ];
    for (i, line) in help.iter().enumerate() {
        draw_text(
            line,
            10.0,
            screen_height() - 30.0 + i as f32 * 18.0,
            16.0,
            Color::new(1.0, 1.0, 1.0, 0.7),
        );
    }
}
