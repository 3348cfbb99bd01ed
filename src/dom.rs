//! Small DOM lookup helpers shared by the UI components.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Window};

/// Element ids the host page must provide. Startup fails fast if any is
/// missing, so a misconfigured page surfaces immediately instead of as a
/// null-dereference later.
pub const REQUIRED_IDS: &[&str] = &[
    "characterSelection",
    "characterModal",
    "modalName",
    "modalTagline",
    "modalCountry",
    "modalStyle",
    "modalDescription",
    "modalImage",
    "closeModal",
    "backBtn",
];

/// CSS class applied to every roster card. Part of the host-page contract.
pub const CARD_CLASS: &str = "character-card";

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn require_element(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing required element #{id}")))
}

/// Verify the whole host-page contract in one pass so a broken page reports
/// every missing id, not just the first.
pub fn check_required_elements(doc: &Document) -> Result<(), JsValue> {
    let missing: Vec<&str> = REQUIRED_IDS
        .iter()
        .copied()
        .filter(|id| doc.get_element_by_id(id).is_none())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(JsValue::from_str(&format!(
            "missing required element(s): #{}",
            missing.join(", #")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for id in REQUIRED_IDS {
            assert!(seen.insert(*id), "duplicate id '{}' in REQUIRED_IDS", id);
        }
    }

    #[test]
    fn required_ids_cover_the_modal_targets() {
        for id in [
            "modalName",
            "modalTagline",
            "modalCountry",
            "modalStyle",
            "modalDescription",
            "modalImage",
        ] {
            assert!(REQUIRED_IDS.contains(&id), "'{}' not required", id);
        }
    }
}
