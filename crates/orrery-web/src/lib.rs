use std::cell::RefCell;

use orrery_engine::{BodyId, InputEvent, PickId, SimConfig};
use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::SimRunner;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Simulation not initialized. Call orrery_init() first.");
        f(runner)
    })
}

/// Wall-clock time in Unix seconds.
fn wall_clock_unix() -> f64 {
    js_sys::Date::now() / 1000.0
}

/// Create the runner. `config_json` optionally overrides `SimConfig` fields.
#[wasm_bindgen]
pub fn orrery_init(config_json: Option<String>) -> Result<(), JsError> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref() {
        Some(json) => SimConfig::from_json(json)?,
        None => SimConfig::default(),
    };
    let runner = SimRunner::new(config);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized");
    Ok(())
}

/// Hand over the fetched body list (JSON). Frames start once this succeeds.
#[wasm_bindgen]
pub fn orrery_load_bodies(json: &str) -> Result<(), JsError> {
    with_runner(|r| r.load_catalog(json))?;
    Ok(())
}

#[wasm_bindgen]
pub fn orrery_report_fetch_failure(message: &str) {
    with_runner(|r| {
        r.report_fetch_failure(message);
    });
}

#[wasm_bindgen]
pub fn orrery_is_ready() -> bool {
    with_runner(|r| r.is_ready())
}

#[wasm_bindgen]
pub fn orrery_load_error() -> Option<String> {
    with_runner(|r| r.load_error().map(str::to_string))
}

/// Per-frame entry point; `now_ms` is the `requestAnimationFrame` timestamp.
/// Returns the time factor, or a negative value while not ready.
#[wasm_bindgen]
pub fn orrery_frame(now_ms: f64) -> f64 {
    with_runner(|r| r.tick(now_ms / 1000.0, wall_clock_unix()).unwrap_or(-1.0))
}

// ---- UI input ----

#[wasm_bindgen]
pub fn orrery_set_speed(value: f64) {
    with_runner(|r| r.push_input(InputEvent::SetSpeed { value }));
}

#[wasm_bindgen]
pub fn orrery_set_compression(value: f64) {
    with_runner(|r| r.push_input(InputEvent::SetCompression { value }));
}

#[wasm_bindgen]
pub fn orrery_select(name: String) {
    with_runner(|r| r.push_input(InputEvent::Select { name }));
}

/// Renderer ray hits, nearest first.
#[wasm_bindgen]
pub fn orrery_pick(hits: &[u32]) {
    let hits = hits.iter().map(|&h| PickId(h)).collect();
    with_runner(|r| r.push_input(InputEvent::Pick { hits }));
}

#[wasm_bindgen]
pub fn orrery_deselect() {
    with_runner(|r| r.push_input(InputEvent::Deselect));
}

#[wasm_bindgen]
pub fn orrery_show_orbits(show: bool) {
    with_runner(|r| r.push_input(InputEvent::ShowOrbits(show)));
}

#[wasm_bindgen]
pub fn orrery_show_labels(show: bool) {
    with_runner(|r| r.push_input(InputEvent::ShowLabels(show)));
}

#[wasm_bindgen]
pub fn orrery_resize(width: f64, height: f64) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn orrery_camera_moved(px: f64, py: f64, pz: f64, tx: f64, ty: f64, tz: f64) {
    with_runner(|r| {
        r.push_input(InputEvent::CameraMoved {
            position: [px, py, pz],
            target: [tx, ty, tz],
        })
    });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_max_bodies() -> u32 {
    with_runner(|r| r.max_bodies())
}

#[wasm_bindgen]
pub fn get_body_count() -> u32 {
    with_runner(|r| r.body_count())
}

#[wasm_bindgen]
pub fn get_sim_datetime() -> String {
    with_runner(|r| r.sim_datetime().to_string())
}

#[wasm_bindgen]
pub fn get_body_name(index: u32) -> Option<String> {
    with_runner(|r| r.body_name(index))
}

#[wasm_bindgen]
pub fn get_body_names() -> String {
    with_runner(|r| r.body_names_json())
}

#[wasm_bindgen]
pub fn get_body_info(index: u32) -> Option<String> {
    with_runner(|r| r.body_info_json(index))
}

/// Pick id the renderer should report for a body's mesh.
#[wasm_bindgen]
pub fn get_body_pick_id(index: u32) -> u32 {
    PickId::body(BodyId(index)).0
}

/// Pick id for a body's orbit ring.
#[wasm_bindgen]
pub fn get_orbit_pick_id(index: u32) -> u32 {
    PickId::orbit(BodyId(index)).0
}

#[wasm_bindgen]
pub fn get_selected() -> Option<u32> {
    with_runner(|r| r.selected())
}

#[wasm_bindgen]
pub fn get_speed() -> f64 {
    with_runner(|r| r.speed())
}

#[wasm_bindgen]
pub fn get_compression() -> f64 {
    with_runner(|r| r.compression())
}
