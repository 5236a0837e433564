use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::config::LandingConfig;
use crate::dom::{self, DocumentHead, StyleHost};

/// Attribute that marks the scroll-to-top stylesheet.
pub const STYLE_MARKER: &str = "data-scroll-to-top";

const SCROLL_TOP_CSS: &str = r#"
    .scroll-to-top {
        position: fixed;
        bottom: 30px;
        right: 30px;
        width: 50px;
        height: 50px;
        border-radius: 50%;
        background: var(--deep-teal);
        color: var(--white);
        border: none;
        font-size: 24px;
        cursor: pointer;
        opacity: 0;
        visibility: hidden;
        transition: all 0.3s ease;
        box-shadow: 0 4px 20px rgba(0, 0, 0, 0.15);
        z-index: 999;
    }

    .scroll-to-top.visible {
        opacity: 1;
        visibility: visible;
    }

    .scroll-to-top:hover {
        background: var(--deep-teal-dark);
        transform: translateY(-3px);
        box-shadow: 0 6px 25px rgba(0, 0, 0, 0.2);
    }

    @media (max-width: 768px) {
        .scroll-to-top {
            bottom: 20px;
            right: 20px;
            width: 45px;
            height: 45px;
            font-size: 20px;
        }
    }
"#;

/// Adds the button's stylesheet to `host` unless it is already there.
pub fn install_style<H: StyleHost + ?Sized>(host: &H) -> Result<bool, JsValue> {
    dom::inject_style_into(host, SCROLL_TOP_CSS, Some(STYLE_MARKER))
}

pub fn is_visible_at(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[derive(Properties, PartialEq)]
pub struct ScrollToTopProps {
    pub threshold: f64,
    pub label: String,
}

#[function_component(ScrollToTop)]
pub fn scroll_to_top(props: &ScrollToTopProps) -> Html {
    let visible = use_state_eq(|| false);

    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |threshold| {
                let threshold = *threshold;
                visible.set(is_visible_at(dom::scroll_y(), threshold));

                let scroll_callback = Closure::wrap(Box::new(move || {
                    visible.set(is_visible_at(dom::scroll_y(), threshold));
                }) as Box<dyn FnMut()>);

                let window = web_sys::window();
                if let Some(window) = &window {
                    let _ = window.add_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    );
                }

                move || {
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            scroll_callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            props.threshold,
        );
    }

    let onclick = Callback::from(|_: MouseEvent| dom::smooth_scroll_to(0.0));

    html! {
        <button
            class={classes!("scroll-to-top", (*visible).then(|| "visible"))}
            aria-label={props.label.clone()}
            {onclick}
        >
            {"↑"}
        </button>
    }
}

pub fn wire(config: &LandingConfig) -> Result<(), JsValue> {
    install_style(&DocumentHead)?;
    let body: HtmlElement = dom::body()?;
    let host = dom::mount_point(&body, "scroll-to-top-host")?;
    yew::Renderer::<ScrollToTop>::with_root_and_props(
        host,
        ScrollToTopProps {
            threshold: config.scroll_top_threshold,
            label: config.messages.scroll_top_label.clone(),
        },
    )
    .render();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::test_support::RecordingHead;

    #[test]
    fn stylesheet_goes_to_head_once() {
        let head = RecordingHead::default();
        assert_eq!(install_style(&head).ok(), Some(true));
        assert_eq!(install_style(&head).ok(), Some(false));
        assert_eq!(head.markers(), vec![Some(STYLE_MARKER.to_string())]);
        assert!(head.blocks.borrow()[0].0.contains(".scroll-to-top.visible"));
    }

    #[test]
    fn shown_only_past_threshold() {
        assert!(!is_visible_at(0.0, 300.0));
        assert!(!is_visible_at(300.0, 300.0));
        assert!(is_visible_at(301.0, 300.0));
    }
}
