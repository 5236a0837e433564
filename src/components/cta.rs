use log::info;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};
use web_sys::{MouseEvent, Window};

use crate::dom;

pub const CTA_SELECTOR: &str = ".cta-button, .pricing-button";

/// Event parameters in the shape `gtag('event', 'click', ...)` expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CtaEvent {
    pub event_category: &'static str,
    pub event_label: String,
    pub value: usize,
}

impl CtaEvent {
    pub fn new(label: &str, index: usize) -> Self {
        Self {
            event_category: "CTA",
            event_label: label.trim().to_string(),
            value: index,
        }
    }
}

fn forward_to_gtag(event: &CtaEvent) -> Result<(), JsValue> {
    let window: Window = dom::window()?;
    let gtag = Reflect::get(&window, &JsValue::from_str("gtag"))?;
    let Some(gtag) = gtag.dyn_ref::<Function>() else {
        return Ok(());
    };
    let params = serde_wasm_bindgen::to_value(event)?;
    gtag.call3(
        &JsValue::NULL,
        &JsValue::from_str("event"),
        &JsValue::from_str("click"),
        &params,
    )?;
    Ok(())
}

pub fn wire() -> Result<usize, JsValue> {
    let buttons = dom::query_all(CTA_SELECTOR)?;
    for (index, button) in buttons.iter().enumerate() {
        let source = button.clone();
        dom::listen::<MouseEvent, _>(button, "click", move |_| {
            let event = CtaEvent::new(&source.text_content().unwrap_or_default(), index);
            info!("CTA Button clicked: {}", event.event_label);
            if let Err(e) = forward_to_gtag(&event) {
                log::warn!("Could not forward CTA event: {:?}", e);
            }
        })?;
    }
    Ok(buttons.len())
}
