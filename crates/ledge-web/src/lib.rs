pub mod runner;

pub use runner::GameRunner;

/// Install the panic hook and route `log` to the browser console.
/// Safe to call more than once.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(level);
}

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, level
///   loading, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::Platformer;
///
/// ledge_web::export_game!(Platformer, "platformer");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `ledge_engine::Game`
///   and has a `new()` constructor
/// - `$game_name`: A string literal used in log messages
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
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);
            $crate::init_logging(runner.config().log_level);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) -> u32 {
            with_runner(|r| r.tick(dt))
        }

        #[wasm_bindgen]
        pub fn game_key_down(code: &str) {
            with_runner(|r| r.push_key(code, true));
        }

        #[wasm_bindgen]
        pub fn game_key_up(code: &str) {
            with_runner(|r| r.push_key(code, false));
        }

        /// Whether the host should `preventDefault()` for this key code.
        #[wasm_bindgen]
        pub fn game_key_prevents_default(code: &str) -> bool {
            code.parse::<ledge_engine::KeyCode>()
                .map(|k| k.prevents_default())
                .unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn game_blur() {
            with_runner(|r| r.push_input(ledge_engine::InputEvent::Blur));
        }

        /// Returns false when the JSON was rejected and an empty level is used instead.
        #[wasm_bindgen]
        pub fn game_load_level(json: &str, name: &str) -> bool {
            with_runner(|r| r.load_level(json, name))
        }

        #[wasm_bindgen]
        pub fn game_resize(width_px: f32, height_px: f32) {
            with_runner(|r| r.resize(width_px, height_px));
        }

        #[wasm_bindgen]
        pub fn game_debug_text() -> String {
            with_runner(|r| r.debug_text())
        }

        // ---- Data accessors ----

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
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
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
