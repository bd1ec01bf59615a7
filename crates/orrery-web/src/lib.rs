//! Browser bridge for the orrery scene.
//!
//! JavaScript owns the WebGL context, the image loading and the
//! requestAnimationFrame loop. Each frame it calls `orrery_tick`, then reads
//! the flat draw-instance buffer straight out of WASM memory.

pub mod runner;

pub use runner::{SceneRunner, UploadQueue};

use std::cell::RefCell;

use orrery::InputEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Before `orrery_init` this logs a warning
/// and returns `R::default()`.
fn with_runner<R: Default>(f: impl FnOnce(&mut SceneRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => f(runner),
            None => {
                log::warn!("orrery: called before orrery_init()");
                R::default()
            }
        }
    })
}

fn to_js(err: orrery::OrreryError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Build the scene. Empty strings select the default config / manifest.
#[wasm_bindgen]
pub fn orrery_init(config_json: &str, manifest_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = SceneRunner::from_json(config_json, manifest_json).map_err(|err| {
        log::error!("orrery: init failed: {}", err);
        to_js(err)
    })?;
    log::info!(
        "orrery: initialized ({} bodies, {} asteroids)",
        runner.scene().bodies().len(),
        runner.scene().asteroids().len()
    );

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    Ok(())
}

#[wasm_bindgen]
pub fn orrery_tick(now_ms: f64) {
    with_runner(|r| r.tick(now_ms));
}

#[wasm_bindgen]
pub fn orrery_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn orrery_set_speed(value: f32) {
    with_runner(|r| r.push_input(InputEvent::SpeedChanged { value }));
}

#[wasm_bindgen]
pub fn orrery_resize(width: u32, height: u32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn orrery_set_orbit_radius(body: &str, radius: f32) -> Result<(), JsValue> {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(r) => r.set_orbit_radius(body, radius).map_err(to_js),
        None => Err(JsValue::from_str("orrery_init() has not been called")),
    })
}

// ---- Textures ----

#[wasm_bindgen]
pub fn orrery_texture_loaded(id: u32) {
    with_runner(|r| r.texture_loaded(id));
}

#[wasm_bindgen]
pub fn orrery_texture_failed(id: u32, reason: &str) {
    with_runner(|r| r.texture_failed(id, reason));
}

#[wasm_bindgen]
pub fn get_texture_count() -> u32 {
    with_runner(|r| r.texture_count())
}

#[wasm_bindgen]
pub fn get_texture_id(name: &str) -> i32 {
    RUNNER.with(|cell| cell.borrow().as_ref().map_or(-1, |r| r.texture_id(name)))
}

#[wasm_bindgen]
pub fn get_texture_path(id: u32) -> String {
    with_runner(|r| r.texture_path(id))
}

#[wasm_bindgen]
pub fn get_placeholder_color() -> Vec<u8> {
    with_runner(|r| r.placeholder_color())
}

// ---- Meshes ----

#[wasm_bindgen]
pub fn take_mesh_uploads() -> Vec<u32> {
    with_runner(|r| r.take_uploads())
}

#[wasm_bindgen]
pub fn get_mesh_count() -> u32 {
    with_runner(|r| r.mesh_count())
}

#[wasm_bindgen]
pub fn get_mesh_positions_ptr(id: u32) -> *const f32 {
    RUNNER.with(|cell| cell.borrow().as_ref().map_or(std::ptr::null(), |r| r.mesh_positions_ptr(id)))
}

#[wasm_bindgen]
pub fn get_mesh_positions_len(id: u32) -> u32 {
    with_runner(|r| r.mesh_positions_len(id))
}

#[wasm_bindgen]
pub fn get_mesh_normals_ptr(id: u32) -> *const f32 {
    RUNNER.with(|cell| cell.borrow().as_ref().map_or(std::ptr::null(), |r| r.mesh_normals_ptr(id)))
}

#[wasm_bindgen]
pub fn get_mesh_normals_len(id: u32) -> u32 {
    with_runner(|r| r.mesh_normals_len(id))
}

#[wasm_bindgen]
pub fn get_mesh_uvs_ptr(id: u32) -> *const f32 {
    RUNNER.with(|cell| cell.borrow().as_ref().map_or(std::ptr::null(), |r| r.mesh_uvs_ptr(id)))
}

#[wasm_bindgen]
pub fn get_mesh_uvs_len(id: u32) -> u32 {
    with_runner(|r| r.mesh_uvs_len(id))
}

#[wasm_bindgen]
pub fn get_mesh_indices_ptr(id: u32) -> *const u8 {
    RUNNER.with(|cell| cell.borrow().as_ref().map_or(std::ptr::null(), |r| r.mesh_indices_ptr(id)))
}

#[wasm_bindgen]
pub fn get_mesh_indices_len(id: u32) -> u32 {
    with_runner(|r| r.mesh_indices_len(id))
}

#[wasm_bindgen]
pub fn get_mesh_index_stride(id: u32) -> u32 {
    with_runner(|r| r.mesh_index_stride(id))
}

#[wasm_bindgen]
pub fn get_mesh_primitive(id: u32) -> u32 {
    with_runner(|r| r.mesh_primitive(id))
}

// ---- Draw list ----

#[wasm_bindgen]
pub fn get_draw_instances_ptr() -> *const f32 {
    RUNNER.with(|cell| cell.borrow().as_ref().map_or(std::ptr::null(), |r| r.draw_instances_ptr()))
}

#[wasm_bindgen]
pub fn get_draw_instance_count() -> u32 {
    with_runner(|r| r.draw_instance_count())
}

#[wasm_bindgen]
pub fn get_draw_instance_floats() -> u32 {
    orrery::DrawInstance::FLOATS as u32
}

/// Draw list as a fresh Float32Array copy, for callers that cannot view WASM memory.
#[wasm_bindgen]
pub fn get_draw_instances() -> js_sys::Float32Array {
    RUNNER.with(|cell| match cell.borrow().as_ref() {
        Some(r) => js_sys::Float32Array::from(r.scene().draw_list().as_floats()),
        None => js_sys::Float32Array::new_with_length(0),
    })
}
