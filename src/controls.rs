// Keyboard handling for the UI. Every environment change routes through the
// world's validated setters; the only state kept here is what the world does
// not track itself (the sun slider position and the screenshot request).

use macroquad::prelude::*;

use crate::world::World;

#[derive(Default)]
pub struct InputState {
    pub sun_offset: i32,
    pub take_screenshot: bool,
}

pub fn handle_controls(world: &mut World, input: &mut InputState) {
    if is_key_pressed(KeyCode::Space) {
        world.toggle_pause();
    }

    if is_key_pressed(KeyCode::R) {
        world.reset();
    }

    // Screenshot (P key)
    if is_key_pressed(KeyCode::P) {
        input.take_screenshot = true;
    }

    // Speed controls (Shift+Arrow so plain arrows stay free for the sun)
    let shift_held = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
    if shift_held {
        if is_key_pressed(KeyCode::Right) {
            world.increase_speed();
        }
        if is_key_pressed(KeyCode::Left) {
            world.decrease_speed();
        }
    }
    if is_key_pressed(KeyCode::Key0) {
        world.reset_speed();
    }

    // Sun position, in slider steps of 5
    if !shift_held {
        if is_key_pressed(KeyCode::Right) {
            input.sun_offset = (input.sun_offset + 5).min(100);
            world.move_sun(input.sun_offset);
        }
        if is_key_pressed(KeyCode::Left) {
            input.sun_offset = (input.sun_offset - 5).max(-100);
            world.move_sun(input.sun_offset);
        }
    }

    // Gravity magnitude
    let gravity = -world.gravity().y;
    if is_key_pressed(KeyCode::Up) {
        world.set_gravity((gravity + 1.0).min(10.0));
    }
    if is_key_pressed(KeyCode::Down) {
        world.set_gravity((gravity - 1.0).max(0.0));
    }

    // Environment dials, each clamped to its valid range before the setter
    // so held keys do not spam warnings.
    let environment = world.environment();
    if is_key_pressed(KeyCode::Q) {
        world.set_light_hours((environment.light_hours + 2).min(24));
    }
    if is_key_pressed(KeyCode::A) {
        world.set_light_hours((environment.light_hours - 2).max(0));
    }
    if is_key_pressed(KeyCode::W) {
        world.set_temperature((environment.temperature + 5).min(40));
    }
    if is_key_pressed(KeyCode::S) {
        world.set_temperature((environment.temperature - 5).max(0));
    }

    let resources = world.resources();
    if is_key_pressed(KeyCode::E) {
        world.set_carbon_dioxide((resources.carbon_dioxide + 100).min(900));
    }
    if is_key_pressed(KeyCode::D) {
        world.set_carbon_dioxide((resources.carbon_dioxide - 100).max(0));
    }
    if is_key_pressed(KeyCode::T) {
        world.set_water((resources.water + 1).min(4));
    }
    if is_key_pressed(KeyCode::G) {
        world.set_water((resources.water - 1).max(0));
    }
    if is_key_pressed(KeyCode::Y) {
        world.set_nutrients((resources.nutrients + 1).min(4));
    }
    if is_key_pressed(KeyCode::H) {
        world.set_nutrients((resources.nutrients - 1).max(0));
    }
}
