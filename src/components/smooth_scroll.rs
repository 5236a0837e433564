use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, MouseEvent};

use crate::config::LandingConfig;
use crate::dom;

/// Scroll position that leaves the target just below the fixed navbar.
pub fn scroll_target(offset_top: f64, nav_offset: f64) -> f64 {
    offset_top - nav_offset
}

/// Returns the selector for an in-page link, or `None` for a bare `#`.
pub fn anchor_selector(href: &str) -> Option<&str> {
    if href.len() > 1 && href.starts_with('#') {
        Some(href)
    } else {
        None
    }
}

pub fn wire(config: &LandingConfig) -> Result<usize, JsValue> {
    let anchors = dom::query_all("a[href^=\"#\"]")?;
    for anchor in &anchors {
        let href = anchor.get_attribute("href").unwrap_or_default();
        let nav_offset = config.anchor_offset;
        dom::listen::<MouseEvent, _>(anchor, "click", move |event| {
            event.prevent_default();
            let Some(selector) = anchor_selector(&href) else {
                return;
            };
            let target = dom::document()
                .ok()
                .and_then(|doc| doc.query_selector(selector).ok().flatten())
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            match target {
                Some(target) => {
                    dom::smooth_scroll_to(scroll_target(f64::from(target.offset_top()), nav_offset))
                }
                None => debug!("No element matches {}", selector),
            }
        })?;
    }
    Ok(anchors.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_accounts_for_navbar() {
        assert_eq!(scroll_target(1200.0, 80.0), 1120.0);
        assert_eq!(scroll_target(40.0, 80.0), -40.0);
    }

    #[test]
    fn bare_hash_has_no_target() {
        assert_eq!(anchor_selector("#"), None);
        assert_eq!(anchor_selector("#pricing"), Some("#pricing"));
        assert_eq!(anchor_selector("/about"), None);
    }
}
