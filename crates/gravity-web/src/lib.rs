pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use gravity_engine::{Archetype, Preset, SimCommand, SimConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Simulation not initialized. Call sim_init() first.");
        f(runner)
    })
}

/// Create the session. `config_json` may be empty; a config that fails to
/// parse falls back to the defaults.
#[wasm_bindgen]
pub fn sim_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        SimConfig::default()
    } else {
        SimConfig::from_json(config_json).unwrap_or_else(|err| {
            log::warn!("{err}; using default config");
            SimConfig::default()
        })
    };
    let runner = SimRunner::new(config);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("gravity sandbox: initialized");
}

#[wasm_bindgen]
pub fn sim_tick(frame_dt: f64) {
    with_runner(|r| r.tick(frame_dt));
}

// ---- Controls (applied at the start of the next tick) ----

#[wasm_bindgen]
pub fn sim_play() {
    with_runner(|r| r.push_command(SimCommand::Play));
}

#[wasm_bindgen]
pub fn sim_pause() {
    with_runner(|r| r.push_command(SimCommand::Pause));
}

#[wasm_bindgen]
pub fn sim_toggle_play() {
    with_runner(|r| r.push_command(SimCommand::TogglePlay));
}

#[wasm_bindgen]
pub fn sim_reset() {
    with_runner(|r| r.push_command(SimCommand::Reset));
}

#[wasm_bindgen]
pub fn sim_center_view() {
    with_runner(|r| r.push_command(SimCommand::CenterView));
}

#[wasm_bindgen]
pub fn sim_set_gravity(value: f64) {
    with_runner(|r| r.push_command(SimCommand::SetGravity(value)));
}

#[wasm_bindgen]
pub fn sim_set_speed(value: f64) {
    with_runner(|r| r.push_command(SimCommand::SetSpeed(value)));
}

#[wasm_bindgen]
pub fn sim_set_trails(enabled: bool) {
    with_runner(|r| r.push_command(SimCommand::SetTrails(enabled)));
}

#[wasm_bindgen]
pub fn sim_pan(dx: f64, dy: f64) {
    with_runner(|r| r.push_command(SimCommand::Pan { dx, dy }));
}

#[wasm_bindgen]
pub fn sim_zoom_at(x: f64, y: f64, factor: f64) {
    with_runner(|r| r.push_command(SimCommand::ZoomAt { x, y, factor }));
}

#[wasm_bindgen]
pub fn sim_resize(width: f64, height: f64) {
    with_runner(|r| r.push_command(SimCommand::Resize { width, height }));
}

/// Spawn at a screen point. Returns false for an unknown archetype name.
#[wasm_bindgen]
pub fn sim_spawn(x: f64, y: f64, archetype: &str, vx: f64, vy: f64) -> bool {
    match archetype.parse::<Archetype>() {
        Ok(archetype) => {
            with_runner(|r| r.push_command(SimCommand::Spawn { x, y, archetype, vx, vy }));
            true
        }
        Err(err) => {
            log::warn!("sim_spawn: {err}");
            false
        }
    }
}

/// Load a preset by name. Returns false if the name is unknown or the
/// preset does not fit.
#[wasm_bindgen]
pub fn sim_load_preset(name: &str) -> bool {
    let preset = match name.parse::<Preset>() {
        Ok(preset) => preset,
        Err(err) => {
            log::warn!("sim_load_preset: {err}");
            return false;
        }
    };
    with_runner(|r| match r.apply_now(SimCommand::LoadPreset(preset)) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("sim_load_preset: {err}");
            false
        }
    })
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.header()))
}

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr())
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}

#[wasm_bindgen]
pub fn get_trail_vertices_ptr() -> *const f32 {
    with_runner(|r| r.trail_vertices_ptr())
}

#[wasm_bindgen]
pub fn get_trail_vertex_count() -> u32 {
    with_runner(|r| r.trail_vertex_count())
}

#[wasm_bindgen]
pub fn sim_snapshot_json() -> String {
    with_runner(|r| {
        r.snapshot_json().unwrap_or_else(|err| {
            log::warn!("snapshot: {err}");
            String::from("{}")
        })
    })
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances())
}

#[wasm_bindgen]
pub fn get_max_trail_vertices() -> u32 {
    with_runner(|r| r.max_trail_vertices())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}
