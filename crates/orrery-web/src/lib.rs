pub mod runner;

pub use orrery_engine;
pub use runner::GameRunner;

// Used by `export_game!` in the calling crate.
#[doc(hidden)]
pub use console_error_panic_hook;
#[doc(hidden)]
pub use console_log;
#[doc(hidden)]
pub use log;

use wasm_bindgen::JsValue;

/// Log an error and turn it into a JS `Error` for the host.
pub fn to_js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    log::error!("{}: {}", context, err);
    js_sys::Error::new(&format!("{}: {}", context, err)).into()
}

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner, created on first use
///   (which also installs the panic hook and `console_log`)
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (lifecycle, input handlers, buffer, geometry
///   and camera accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyScene;
///
/// orrery_web::export_game!(MyScene, "my-scene");
/// ```
///
/// The game type must provide `fn new() -> Self`. The calling crate depends
/// on `wasm-bindgen` and imports its prelude.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.get_or_insert_with(|| {
                    $crate::console_error_panic_hook::set_once();
                    let _ = $crate::console_log::init_with_level($crate::log::Level::Info);
                    $crate::GameRunner::new(<$game_type>::new())
                });
                f(runner)
            })
        }

        // ---- Lifecycle ----

        /// Build the scene. Returns false while required meshes are missing;
        /// call again after the last `game_load_mesh`.
        #[wasm_bindgen]
        pub fn game_init() -> bool {
            with_runner(|r| r.init())
        }

        #[wasm_bindgen]
        pub fn game_configure(json: &str) -> Result<(), JsValue> {
            with_runner(|r| r.configure(json))
                .map_err(|e| $crate::to_js_error(concat!($game_name, ": configure"), e))
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) -> Result<(), JsValue> {
            with_runner(|r| r.load_manifest(json))
                .map_err(|e| $crate::to_js_error(concat!($game_name, ": manifest"), e))
        }

        /// Supply the text of a required OBJ mesh. Returns its object count.
        #[wasm_bindgen]
        pub fn game_load_mesh(name: &str, obj_text: &str) -> Result<u32, JsValue> {
            with_runner(|r| r.load_mesh(name, obj_text))
                .map(|n| n as u32)
                .map_err(|e| $crate::to_js_error(&format!("{}: mesh '{}'", $game_name, name), e))
        }

        #[wasm_bindgen]
        pub fn game_is_ready() -> bool {
            with_runner(|r| r.is_ready())
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_ui_json() -> Option<String> {
            with_runner(|r| r.ui_json())
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::Wheel { delta }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Frame data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr())
        }

        #[wasm_bindgen]
        pub fn get_clear_color() -> Vec<f32> {
            with_runner(|r| r.clear_color().to_vec())
        }

        #[wasm_bindgen]
        pub fn get_meshes_ptr() -> *const f32 {
            with_runner(|r| r.meshes_ptr())
        }

        #[wasm_bindgen]
        pub fn get_mesh_count() -> u32 {
            with_runner(|r| r.mesh_count())
        }

        #[wasm_bindgen]
        pub fn get_lines_ptr() -> *const f32 {
            with_runner(|r| r.lines_ptr())
        }

        #[wasm_bindgen]
        pub fn get_line_vertex_count() -> u32 {
            with_runner(|r| r.line_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_points_ptr() -> *const f32 {
            with_runner(|r| r.points_ptr())
        }

        #[wasm_bindgen]
        pub fn get_point_count() -> u32 {
            with_runner(|r| r.point_count())
        }

        #[wasm_bindgen]
        pub fn get_sprites_ptr() -> *const f32 {
            with_runner(|r| r.sprites_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sprite_count() -> u32 {
            with_runner(|r| r.sprite_count())
        }

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        // ---- Geometry accessors ----

        #[wasm_bindgen]
        pub fn get_geometry_count() -> u32 {
            with_runner(|r| r.geometry_count())
        }

        /// Interleaved `[x, y, z, nx, ny, nz]` vertices of geometry `id`.
        #[wasm_bindgen]
        pub fn get_geometry_ptr(id: u32) -> *const f32 {
            with_runner(|r| r.geometry_vertices_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_vertex_count(id: u32) -> u32 {
            with_runner(|r| r.geometry_vertex_count(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_indices_ptr(id: u32) -> *const u32 {
            with_runner(|r| r.geometry_indices_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_index_count(id: u32) -> u32 {
            with_runner(|r| r.geometry_index_count(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_version(id: u32) -> u32 {
            with_runner(|r| r.geometry_version(id))
        }

        #[wasm_bindgen]
        pub fn get_fresnel_shader() -> String {
            $crate::orrery_engine::FRESNEL_WGSL.to_string()
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_mesh_instances() -> u32 {
            with_runner(|r| r.max_mesh_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_line_vertices() -> u32 {
            with_runner(|r| r.max_line_vertices())
        }

        #[wasm_bindgen]
        pub fn get_max_point_vertices() -> u32 {
            with_runner(|r| r.max_point_vertices())
        }

        #[wasm_bindgen]
        pub fn get_max_sprites() -> u32 {
            with_runner(|r| r.max_sprites())
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
