use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, HtmlElement};

use crate::dom;

pub const HERO_RATE: f64 = 0.5;

/// Hero offset for the current scroll position, or `None` once the hero
/// has scrolled out of view and should be left alone.
pub fn hero_offset(scroll_y: f64, viewport_height: f64) -> Option<f64> {
    (scroll_y < viewport_height).then(|| scroll_y * HERO_RATE)
}

pub fn wire() -> Result<bool, JsValue> {
    let Some(hero) = dom::document()?
        .query_selector(".hero")?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(false);
    };
    let window = dom::window()?;
    let viewport = window.clone();
    dom::listen::<Event, _>(&window, "scroll", move |_| {
        let height = viewport
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        if let Some(offset) = hero_offset(dom::scroll_y(), height) {
            let _ = hero
                .style()
                .set_property("transform", &format!("translateY({}px)", offset));
        }
    })?;
    Ok(true)
}
