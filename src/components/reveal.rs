//! Scroll-triggered entrance animations.
//!
//! Elements carrying one of the `fade-in-*` classes start with their CSS
//! animation paused. The first time an element scrolls into view its
//! animation is set running and the element is no longer observed.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::config::LandingConfig;
use crate::dom;

pub const ANIMATED_SELECTOR: &str = ".fade-in-up, .fade-in-left, .fade-in-right";
const INDEX_ATTR: &str = "data-reveal-index";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    #[default]
    Paused,
    Playing,
}

impl Playback {
    /// Value for the `animation-play-state` property.
    pub fn play_state(&self) -> &'static str {
        match self {
            Playback::Paused => "paused",
            Playback::Playing => "running",
        }
    }
}

/// Playback state of every animated element on the page.
#[derive(Debug, Clone, Default)]
pub struct RevealSet {
    states: Vec<Playback>,
}

impl RevealSet {
    pub fn new(len: usize) -> Self {
        Self { states: vec![Playback::Paused; len] }
    }

    /// Starts element `index`. Returns `true` only on the transition from
    /// paused to playing.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.states.get_mut(index) {
            Some(state) if *state == Playback::Paused => {
                *state = Playback::Playing;
                true
            }
            _ => false,
        }
    }

    pub fn playing(&self) -> usize {
        self.states.iter().filter(|s| **s == Playback::Playing).count()
    }
}

fn set_play_state(element: &HtmlElement, playback: Playback) {
    let _ = element
        .style()
        .set_property("animation-play-state", playback.play_state());
}

pub fn wire(config: &LandingConfig) -> Result<usize, JsValue> {
    let elements = dom::query_all_html(ANIMATED_SELECTOR)?;
    let set = Rc::new(RefCell::new(RevealSet::new(elements.len())));

    let observer = {
        let set = set.clone();
        dom::visibility_observer(
            Some(config.reveal_threshold),
            &config.reveal_root_margin,
            move |target| {
                let Some(index) = dom::element_index(target, INDEX_ATTR) else {
                    return true;
                };
                let mut set = set.borrow_mut();
                if set.reveal(index) {
                    if let Some(element) = target.dyn_ref::<HtmlElement>() {
                        set_play_state(element, Playback::Playing);
                    }
                    debug!("Revealed animated element {} ({} playing)", index, set.playing());
                }
                true
            },
        )?
    };

    for (index, element) in elements.iter().enumerate() {
        element.set_attribute(INDEX_ATTR, &index.to_string())?;
        set_play_state(element, Playback::Paused);
        observer.observe(element);
    }

    Ok(elements.len())
}
