//! Thin helpers over `web_sys` shared by the component adapters.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, NodeList, ScrollBehavior, ScrollToOptions, Window,
};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

pub fn body() -> Result<HtmlElement, JsValue> {
    document()?
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))
}

pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all(selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(document()?.query_selector_all(selector)?))
}

pub fn query_all_html(selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    Ok(query_all(selector)?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn by_id(id: &str) -> Result<Element, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))
}

/// Attaches `handler` for the page lifetime. Events that are not an `E`
/// are skipped.
pub fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn inner_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

pub fn smooth_scroll_to(top: f64) {
    if let Some(window) = web_sys::window() {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Somewhere `<style>` blocks can be added, keyed by a marker attribute.
pub trait StyleHost {
    fn has_marked_style(&self, marker: &str) -> bool;
    fn append_style(&self, css: &str, marker: Option<&str>) -> Result<(), JsValue>;
}

/// The live document's `<head>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentHead;

impl StyleHost for DocumentHead {
    fn has_marked_style(&self, marker: &str) -> bool {
        document()
            .and_then(|document| document.query_selector(&format!("style[{}]", marker)))
            .map(|found| found.is_some())
            .unwrap_or(false)
    }

    fn append_style(&self, css: &str, marker: Option<&str>) -> Result<(), JsValue> {
        let document = document()?;
        let style = document.create_element("style")?;
        style.set_text_content(Some(css));
        if let Some(marker) = marker {
            style.set_attribute(marker, "true")?;
        }
        let head = document
            .head()
            .ok_or_else(|| JsValue::from_str("document has no head"))?;
        head.append_child(&style)?;
        Ok(())
    }
}

/// Adds `css` to `host`. With a `marker` the block is added at most once;
/// returns whether it was added.
pub fn inject_style_into<H>(host: &H, css: &str, marker: Option<&str>) -> Result<bool, JsValue>
where
    H: StyleHost + ?Sized,
{
    if let Some(marker) = marker {
        if host.has_marked_style(marker) {
            return Ok(false);
        }
    }
    host.append_style(css, marker)?;
    Ok(true)
}

pub fn inject_style(css: &str, marker: Option<&str>) -> Result<bool, JsValue> {
    inject_style_into(&DocumentHead, css, marker)
}

/// Creates a `<div>` host for a Yew island and appends it to `parent`.
pub fn mount_point(parent: &Element, class: &str) -> Result<Element, JsValue> {
    let host = document()?.create_element("div")?;
    host.set_class_name(class);
    parent.append_child(&host)?;
    Ok(host)
}

/// Builds an observer that calls `on_visible` for every target entering
/// the viewport. Targets for which it returns `true` are unobserved.
pub fn visibility_observer<F>(
    threshold: Option<f64>,
    root_margin: &str,
    mut on_visible: F,
) -> Result<IntersectionObserver, JsValue>
where
    F: FnMut(&Element) -> bool + 'static,
{
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            if on_visible(&target) {
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    if let Some(threshold) = threshold {
        options.set_threshold(&JsValue::from_f64(threshold));
    }
    options.set_root_margin(root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}

/// Index stored on an element by the component that owns it.
pub fn element_index(element: &Element, attribute: &str) -> Option<usize> {
    element.get_attribute(attribute)?.parse().ok()
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingHead;
    use super::*;

    #[test]
    fn marked_style_is_added_once() {
        let head = RecordingHead::default();
        assert_eq!(inject_style_into(&head, ".a{}", Some("data-a")).ok(), Some(true));
        assert_eq!(inject_style_into(&head, ".a{}", Some("data-a")).ok(), Some(false));
        assert_eq!(inject_style_into(&head, ".b{}", Some("data-b")).ok(), Some(true));
        assert_eq!(
            head.markers(),
            vec![Some("data-a".to_string()), Some("data-b".to_string())]
        );
    }

    #[test]
    fn unmarked_style_is_always_added() {
        let head = RecordingHead::default();
        inject_style_into(&head, ".a{}", None).unwrap();
        inject_style_into(&head, ".a{}", None).unwrap();
        assert_eq!(head.blocks.borrow().len(), 2);
    }
}
