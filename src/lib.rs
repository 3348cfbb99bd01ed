//! Fighter Select core crate.
//!
//! Compiles to WASM and drives the character-selection screen of the host
//! page: a roster grid fetched once over HTTP, a detail modal, and purely
//! cosmetic ambient layers (a canvas particle overlay plus synthesized sound
//! cues). The host markup must provide the element ids listed in
//! `dom::REQUIRED_IDS`; everything else is created by the crate.

use wasm_bindgen::prelude::*;

mod app;
mod audio;
mod dom;
mod effects;
mod modal;
mod roster;

pub use audio::{Cue, SoundBank};
pub use effects::{Lcg, Particle, ParticleField, SPAWN_CHANCE, start_overlay};
pub use modal::{HIDE_DELAY_MS, ModalController};
pub use roster::{DEFAULT_IMAGE, Fighter, ModalFields, ROSTER_ENDPOINT};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Start the selection screen. Called by the host page once the DOM is ready.
///
/// Fails fast with a diagnostic naming every missing required element; a
/// roster fetch failure is NOT fatal (logged, empty-state rendered).
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    app::start()
}

/// Play a named sound cue from JS. Unknown names are a silent no-op, as is a
/// runtime without Web Audio support.
#[wasm_bindgen]
pub fn play_cue(name: &str) {
    SoundBank::new().play_named(name);
}
