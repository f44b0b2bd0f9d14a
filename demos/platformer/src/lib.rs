use wasm_bindgen::prelude::*;

pub mod game;
pub use game::{Platformer, BUILTIN_LEVEL};

ledge_web::export_game!(Platformer, "platformer");

/// The level bundled with the demo, for hosts that have no level server.
#[wasm_bindgen]
pub fn builtin_level_json() -> String {
    BUILTIN_LEVEL.to_string()
}
