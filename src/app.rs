//! Startup wiring and shared screen state.
//!
//! Everything is constructed once in [`start`] and owned by a thread-local
//! `AppState`; event closures reach it through [`with_state`] instead of
//! closing over loose globals.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, MouseEvent, console};

use crate::audio::{Cue, SoundBank};
use crate::modal::ModalController;
use crate::roster::Fighter;
use crate::{dom, effects, roster};

/// Style injected for the keyboard-highlighted card, mirroring the hover
/// treatment the host stylesheet gives pointer interaction.
const KEYBOARD_STYLE: &str = "
  .character-card.keyboard-selected {
    transform: translateY(-10px) scale(1.05);
  }
  .character-card.keyboard-selected .character-portrait {
    border-color: #ff0066 !important;
    box-shadow:
      0 15px 40px rgba(255, 0, 102, 0.3),
      0 0 30px rgba(255, 0, 102, 0.5),
      inset 0 0 0 2px rgba(255, 0, 102, 0.3) !important;
  }
  .character-card.keyboard-selected .character-name {
    color: #ff0066 !important;
    text-shadow:
      2px 2px 4px rgba(0, 0, 0, 0.8),
      0 0 10px rgba(255, 0, 102, 0.5) !important;
  }
";

pub struct AppState {
    pub roster: Vec<Fighter>,
    pub modal: ModalController,
    pub sounds: SoundBank,
    /// Card index highlighted by keyboard navigation, if any.
    pub highlighted: Option<usize>,
}

impl AppState {
    /// Open the modal for the record at `index`; out-of-range is a no-op.
    pub fn show_details(&mut self, index: usize) {
        let Some(fighter) = self.roster.get(index) else {
            return;
        };
        if let Err(err) = self.modal.show(fighter) {
            console::error_1(&err);
        }
    }
}

thread_local! {
    static APP_STATE: RefCell<Option<AppState>> = RefCell::new(None);
}

pub fn with_state(f: impl FnOnce(&mut AppState)) {
    APP_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            f(state);
        }
    });
}

pub fn start() -> Result<(), JsValue> {
    let doc = dom::document()?;
    console::log_1(&"fighter-select: starting".into());
    dom::check_required_elements(&doc)?;

    let state = AppState {
        roster: Vec::new(),
        modal: ModalController::bind(&doc)?,
        sounds: SoundBank::new(),
        highlighted: None,
    };
    APP_STATE.with(|cell| cell.replace(Some(state)));

    bind_close_controls(&doc)?;
    inject_keyboard_style(&doc)?;
    bind_keyboard(&doc)?;
    effects::start_overlay(&doc)?;

    // One-shot roster load; failure degrades to a logged empty state.
    spawn_local(async {
        match roster::fetch_roster().await {
            Ok(list) => {
                let rendered = (|| -> Result<(), JsValue> {
                    let doc = dom::document()?;
                    let container = dom::require_element(&doc, "characterSelection")?;
                    roster::render_cards(&doc, &container, &list)
                })();
                if let Err(err) = rendered {
                    console::error_1(&err);
                }
                with_state(|state| state.roster = list);
            }
            Err(err) => {
                console::warn_2(&"roster unavailable:".into(), &err);
                if let Ok(doc) = dom::document() {
                    if let Ok(container) = dom::require_element(&doc, "characterSelection") {
                        roster::render_empty_state(&container);
                    }
                }
            }
        }
    });

    Ok(())
}

/// The close button and the back button behave identically: back cue, then
/// the two-phase hide. Bound per element, not via document-wide dispatch.
fn bind_close_controls(doc: &Document) -> Result<(), JsValue> {
    for id in ["closeModal", "backBtn"] {
        let el = dom::require_element(doc, id)?;
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            with_state(|state| {
                state.sounds.play(Cue::Back);
                if let Err(err) = state.modal.hide() {
                    console::error_1(&err);
                }
            });
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

// --- Keyboard navigation ------------------------------------------------------

fn inject_keyboard_style(doc: &Document) -> Result<(), JsValue> {
    let style = doc.create_element("style")?;
    style.set_text_content(Some(KEYBOARD_STYLE));
    doc.head()
        .ok_or_else(|| JsValue::from_str("no document head"))?
        .append_child(&style)?;
    Ok(())
}

fn bind_keyboard(doc: &Document) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        let key = evt.key();
        with_state(|state| match key.as_str() {
            "Escape" => {
                if state.modal.is_visible() {
                    state.sounds.play(Cue::Back);
                    if let Err(err) = state.modal.hide() {
                        console::error_1(&err);
                    }
                }
            }
            "Enter" => {
                if !state.modal.is_visible()
                    && let Some(idx) = state.highlighted
                {
                    state.sounds.play(Cue::Select);
                    state.show_details(idx);
                }
            }
            "ArrowRight" | "ArrowDown" => move_highlight(state, 1),
            "ArrowLeft" | "ArrowUp" => move_highlight(state, -1),
            _ => {}
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Advance the highlight along the card strip, wrapping at both ends. The
/// grid's column count belongs to the host CSS, so navigation treats the
/// roster as one wrapping sequence rather than guessing row widths.
pub fn step_highlight(current: Option<usize>, len: usize, delta: i32) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        None => Some(0),
        Some(cur) => Some((cur as i32 + delta).rem_euclid(len as i32) as usize),
    }
}

fn move_highlight(state: &mut AppState, delta: i32) {
    if state.modal.is_visible() {
        return;
    }
    let next = step_highlight(state.highlighted, state.roster.len(), delta);
    if next == state.highlighted {
        return;
    }
    update_highlight_classes(state.highlighted, next);
    state.highlighted = next;
    state.sounds.play(Cue::Hover);
}

fn update_highlight_classes(old: Option<usize>, new: Option<usize>) {
    let Ok(doc) = dom::document() else {
        return;
    };
    let Ok(container) = dom::require_element(&doc, "characterSelection") else {
        return;
    };
    let cards = container.children();
    if let Some(idx) = old
        && let Some(card) = cards.item(idx as u32)
    {
        card.class_list().remove_1("keyboard-selected").ok();
    }
    if let Some(idx) = new
        && let Some(card) = cards.item(idx as u32)
    {
        card.class_list().add_1("keyboard-selected").ok();
    }
}
