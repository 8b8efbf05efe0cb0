//! Whisker Quest core crate.
//!
//! Animated title/menu screen rendered to a 2D canvas: pixel-art garden
//! scenery, a floating particle field, an interactive cat, and a small audio
//! cue manager. All animation and layout logic lives in browser-free modules
//! (`menu::scene`, `menu::cat`, `menu::anim`, `menu::audio`) so it can be
//! exercised by native `cargo test`; the DOM/canvas wiring is confined to
//! `menu::start_menu`.

use wasm_bindgen::prelude::*;

mod menu;

pub use menu::anim;
pub use menu::audio;
pub use menu::cat;
pub use menu::event;
pub use menu::scene;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Logical canvas size the scene is authored against. Viewports of other
/// sizes get a uniform fit-scale, never a re-authored scene.
pub const DESIGN_WIDTH: f64 = 800.0;
pub const DESIGN_HEIGHT: f64 = 600.0;

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_menu() -> Result<(), JsValue> {
    menu::start_menu()
}
