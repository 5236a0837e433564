use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlAnchorElement, HtmlElement, KeyboardEvent};

use crate::config::LandingConfig;
use crate::dom::{self, DocumentHead, StyleHost};

pub const FOCUSABLE_CARDS: &str = ".card, .pricing-card, .testimonial-card";

/// Attribute that marks the skip link stylesheet.
pub const SKIP_LINK_STYLE_MARKER: &str = "data-skip-link";

const SKIP_LINK_CSS: &str = r#"
    .skip-link {
        position: absolute;
        top: -40px;
        left: 0;
        background: var(--deep-teal);
        color: var(--white);
        padding: 8px 16px;
        text-decoration: none;
        z-index: 9999;
    }

    .skip-link:focus {
        top: 0;
    }
"#;

/// Keys that activate a focused card.
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

pub fn install_skip_link_style<H: StyleHost + ?Sized>(host: &H) -> Result<bool, JsValue> {
    dom::inject_style_into(host, SKIP_LINK_CSS, Some(SKIP_LINK_STYLE_MARKER))
}

/// Puts `<a class="skip-link">` first in `<body>`, so it is the first
/// thing Tab reaches.
pub fn wire_skip_link(config: &LandingConfig) -> Result<(), JsValue> {
    install_skip_link_style(&DocumentHead)?;

    let link = dom::document()?
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()?;
    link.set_class_name("skip-link");
    link.set_href(&config.skip_link_target);
    link.set_text_content(Some(&config.messages.skip_link));

    let body: HtmlElement = dom::body()?;
    body.insert_before(&link, body.first_child().as_ref())?;
    Ok(())
}

/// Makes cards reachable with Tab and clickable with Enter or space.
pub fn wire_keyboard_cards() -> Result<usize, JsValue> {
    let cards = dom::query_all_html(FOCUSABLE_CARDS)?;
    for card in &cards {
        card.set_attribute("tabindex", "0")?;
        let target = card.clone();
        dom::listen::<KeyboardEvent, _>(card, "keypress", move |event| {
            if is_activation_key(&event.key()) {
                target.click();
            }
        })?;
    }
    Ok(cards.len())
}

/// Adds `loaded` to `<body>` once the window has finished loading.
pub fn wire_loaded_marker() -> Result<(), JsValue> {
    let document = dom::document()?;
    if document.ready_state() == "complete" {
        dom::body()?.class_list().add_1("loaded")?;
        return Ok(());
    }
    let window: web_sys::Window = dom::window()?;
    dom::listen::<web_sys::Event, _>(&window, "load", move |_| {
        if let Some(body) = document.body() {
            let _ = body.class_list().add_1("loaded");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::test_support::RecordingHead;

    #[test]
    fn enter_and_space_activate() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Tab"));
        assert!(!is_activation_key("a"));
    }

    #[test]
    fn skip_link_style_is_a_head_block() {
        let head = RecordingHead::default();
        assert_eq!(install_skip_link_style(&head).ok(), Some(true));
        assert_eq!(install_skip_link_style(&head).ok(), Some(false));
        assert_eq!(head.markers(), vec![Some(SKIP_LINK_STYLE_MARKER.to_string())]);
        assert!(head.blocks.borrow()[0].0.contains(".skip-link:focus"));
    }
}
