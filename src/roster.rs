//! Roster data model, fetch, and card grid rendering.
//!
//! The roster is fetched exactly once a page load from [`ROSTER_ENDPOINT`]
//! and held immutable for the session; records are identified purely by
//! their index in the response array (no stable id field exists upstream).

use serde::Deserialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, MouseEvent, Response};

use crate::audio::Cue;
use crate::{app, dom};

/// Endpoint serving the JSON array of fighter records.
pub const ROSTER_ENDPOINT: &str = "http://localhost:8000/api/characters";

/// Portrait shown when a record carries no `image` field.
pub const DEFAULT_IMAGE: &str = "default.jpg";

// --- Data model ---------------------------------------------------------------

/// One character record as served by the roster endpoint. Every field is
/// optional upstream; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fighter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub fighting_style: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Resolved strings for the detail modal: text fields fall back to the empty
/// string, the portrait falls back to [`DEFAULT_IMAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalFields<'a> {
    pub name: &'a str,
    pub tagline: &'a str,
    pub country: &'a str,
    pub fighting_style: &'a str,
    pub description: &'a str,
    pub image: &'a str,
}

impl Fighter {
    pub fn modal_fields(&self) -> ModalFields<'_> {
        ModalFields {
            name: self.name.as_deref().unwrap_or(""),
            tagline: self.tagline.as_deref().unwrap_or(""),
            country: self.country.as_deref().unwrap_or(""),
            fighting_style: self.fighting_style.as_deref().unwrap_or(""),
            description: self.description.as_deref().unwrap_or(""),
            image: self.image.as_deref().unwrap_or(DEFAULT_IMAGE),
        }
    }

    pub fn card_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn card_image(&self) -> &str {
        self.image.as_deref().unwrap_or(DEFAULT_IMAGE)
    }
}

// --- Fetch --------------------------------------------------------------------

/// One-shot GET of the roster. No retry, no loading indicator; the caller
/// decides what a failure means (here: logged + empty-state, never fatal).
pub async fn fetch_roster() -> Result<Vec<Fighter>, JsValue> {
    let win = dom::window()?;
    let resp_value = JsFuture::from(win.fetch_with_str(ROSTER_ENDPOINT)).await?;
    let resp: Response = resp_value.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "roster request failed: HTTP {}",
            resp.status()
        )));
    }
    let json = JsFuture::from(resp.json()?).await?;
    serde_wasm_bindgen::from_value(json)
        .map_err(|err| JsValue::from_str(&format!("roster decode failed: {err}")))
}

// --- Card grid ----------------------------------------------------------------

/// Render one card per record, in response order, into the grid container.
/// Click and hover handlers are bound per card at render time with the card's
/// index captured, so dispatch never inspects class strings at event time.
pub fn render_cards(doc: &Document, container: &Element, roster: &[Fighter]) -> Result<(), JsValue> {
    container.set_inner_html("");
    for (idx, fighter) in roster.iter().enumerate() {
        let card = doc.create_element("div")?;
        card.set_class_name(dom::CARD_CLASS);
        card.set_attribute("data-fighter", &idx.to_string())?;
        card.set_inner_html(&format!(
            "<div class=\"character-portrait\"><img src=\"{image}\" alt=\"{name}\"></div>\
             <div class=\"character-name\">{name}</div>",
            image = fighter.card_image(),
            name = fighter.card_name(),
        ));
        {
            let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
                app::with_state(|state| {
                    state.sounds.play(Cue::Select);
                    state.show_details(idx);
                });
            }) as Box<dyn FnMut(_)>);
            card.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
                app::with_state(|state| state.sounds.play(Cue::Hover));
            }) as Box<dyn FnMut(_)>);
            card.add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        container.append_child(&card)?;
    }
    Ok(())
}

/// Placeholder shown when the roster could not be loaded. The failure itself
/// is logged by the caller; the grid just stops being silently blank.
pub fn render_empty_state(container: &Element) {
    container.set_inner_html("<div class=\"roster-empty\">Roster unavailable</div>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_fields_fall_back_for_missing_text_and_image() {
        let fighter = Fighter::default();
        let fields = fighter.modal_fields();
        assert_eq!(fields.name, "");
        assert_eq!(fields.tagline, "");
        assert_eq!(fields.country, "");
        assert_eq!(fields.fighting_style, "");
        assert_eq!(fields.description, "");
        assert_eq!(fields.image, DEFAULT_IMAGE);
    }

    #[test]
    fn modal_fields_pass_present_values_through() {
        let fighter = Fighter {
            name: Some("Ryu".into()),
            tagline: Some("The wandering warrior".into()),
            country: Some("Japan".into()),
            fighting_style: Some("Ansatsuken".into()),
            description: Some("Seeks worthy opponents.".into()),
            image: Some("ryu.png".into()),
        };
        let fields = fighter.modal_fields();
        assert_eq!(fields.name, "Ryu");
        assert_eq!(fields.tagline, "The wandering warrior");
        assert_eq!(fields.country, "Japan");
        assert_eq!(fields.fighting_style, "Ansatsuken");
        assert_eq!(fields.description, "Seeks worthy opponents.");
        assert_eq!(fields.image, "ryu.png");
    }

    #[test]
    fn deserialize_keeps_response_order_and_tolerates_partial_records() {
        let body = r#"[
            {"name": "Ken", "country": "USA", "image": "ken.png"},
            {"tagline": "???"},
            {"name": "Chun-Li", "fighting_style": "Kung Fu", "rank": 3}
        ]"#;
        let roster: Vec<Fighter> = serde_json::from_str(body).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].card_name(), "Ken");
        assert_eq!(roster[1].card_name(), "");
        assert_eq!(roster[1].card_image(), DEFAULT_IMAGE);
        assert_eq!(roster[2].modal_fields().fighting_style, "Kung Fu");
    }
}
