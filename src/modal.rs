//! Detail modal controller.
//!
//! The close is two-phase to match the host CSS transition: the `active`
//! class flips immediately, then a scheduled continuation applies the layout
//! change (`display:none`, scroll restore) after [`HIDE_DELAY_MS`]. The
//! pending continuation is cancelable, so a show or a repeated hide never
//! leaves a stale timeout behind.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlImageElement};

use crate::dom;
use crate::roster::Fighter;

/// Delay between removing the `active` class and hiding the modal outright.
/// Must match the host CSS transition duration.
pub const HIDE_DELAY_MS: u32 = 300;

/// Owns the fixed modal target elements, resolved once at startup.
pub struct ModalController {
    modal: HtmlElement,
    name: HtmlElement,
    tagline: HtmlElement,
    country: HtmlElement,
    style: HtmlElement,
    description: HtmlElement,
    image: HtmlImageElement,
    body: HtmlElement,
    pending_hide: Option<Timeout>,
}

impl ModalController {
    /// Resolve every target element up front; a missing one is a startup
    /// error naming the id, not a fault at first click.
    pub fn bind(doc: &Document) -> Result<Self, JsValue> {
        let html = |id: &str| -> Result<HtmlElement, JsValue> {
            dom::require_element(doc, id)?.dyn_into().map_err(|_| {
                JsValue::from_str(&format!("element #{id} is not an HTML element"))
            })
        };
        Ok(Self {
            modal: html("characterModal")?,
            name: html("modalName")?,
            tagline: html("modalTagline")?,
            country: html("modalCountry")?,
            style: html("modalStyle")?,
            description: html("modalDescription")?,
            image: dom::require_element(doc, "modalImage")?
                .dyn_into()
                .map_err(|_| JsValue::from_str("element #modalImage is not an <img>"))?,
            body: doc
                .body()
                .ok_or_else(|| JsValue::from_str("no document body"))?,
            pending_hide: None,
        })
    }

    /// Populate the targets from one record and make the modal visible,
    /// locking background scroll. Cancels a hide still in its close window.
    pub fn show(&mut self, fighter: &Fighter) -> Result<(), JsValue> {
        if let Some(stale) = self.pending_hide.take() {
            stale.cancel();
        }
        let fields = fighter.modal_fields();
        self.name.set_text_content(Some(fields.name));
        self.tagline.set_text_content(Some(fields.tagline));
        self.country.set_text_content(Some(fields.country));
        self.style.set_text_content(Some(fields.fighting_style));
        self.description.set_text_content(Some(fields.description));
        self.image.set_src(fields.image);
        self.image.set_alt(fields.name);

        self.modal.style().set_property("display", "flex")?;
        self.modal.class_list().add_1("active")?;
        self.body.style().set_property("overflow", "hidden")?;
        Ok(())
    }

    /// Phase one now (class off, transition starts), phase two after
    /// [`HIDE_DELAY_MS`] (display none, scroll restored). A repeated hide
    /// replaces the pending phase two rather than stacking another.
    pub fn hide(&mut self) -> Result<(), JsValue> {
        self.modal.class_list().remove_1("active")?;
        if let Some(stale) = self.pending_hide.take() {
            stale.cancel();
        }
        let modal = self.modal.clone();
        let body = self.body.clone();
        self.pending_hide = Some(Timeout::new(HIDE_DELAY_MS, move || {
            modal.style().set_property("display", "none").ok();
            body.style().set_property("overflow", "auto").ok();
        }));
        Ok(())
    }

    pub fn is_visible(&self) -> bool {
        self.modal.class_list().contains("active")
    }
}
