//! Testimonial carousel for narrow viewports.
//!
//! One card is displayed at a time. A row of dots under the grid selects
//! a card directly, and a timer advances to the next card.

use std::rc::Rc;

use log::info;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config::LandingConfig;
use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    current: usize,
    count: usize,
}

pub enum CarouselAction {
    Select(usize),
    Advance,
}

impl Carousel {
    /// A carousel over zero cards never moves.
    pub fn new(count: usize) -> Self {
        Self { current: 0, count }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.count {
            self.current = index;
        }
    }

    pub fn advance(&mut self) {
        if self.count > 0 {
            self.current = (self.current + 1) % self.count;
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Reducible for Carousel {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = *self;
        match action {
            CarouselAction::Select(index) => next.select(index),
            CarouselAction::Advance => next.advance(),
        }
        Rc::new(next)
    }
}

fn dot_style(active: bool) -> String {
    format!(
        "width: 12px; height: 12px; border-radius: 50%; border: 2px solid var(--deep-teal); \
         background: {}; cursor: pointer; transition: all 0.3s ease;",
        if active { "var(--deep-teal)" } else { "transparent" }
    )
}

#[derive(Properties, PartialEq)]
pub struct CarouselDotsProps {
    pub cards: Vec<HtmlElement>,
    pub interval_ms: u32,
}

#[function_component(CarouselDots)]
pub fn carousel_dots(props: &CarouselDotsProps) -> Html {
    let count = props.cards.len();
    let carousel = use_reducer(move || Carousel::new(count));

    {
        let carousel = carousel.clone();
        use_interval(move || carousel.dispatch(CarouselAction::Advance), props.interval_ms);
    }

    // Cards live in the page markup, outside this component.
    {
        let cards = props.cards.clone();
        use_effect_with_deps(
            move |current| {
                for (index, card) in cards.iter().enumerate() {
                    let display = if index == *current { "flex" } else { "none" };
                    let _ = card.style().set_property("display", display);
                }
                || ()
            },
            carousel.current(),
        );
    }

    let current = carousel.current();
    html! {
        <div class="testimonial-dots" style="display: flex; justify-content: center; gap: 10px; margin-top: 30px;">
            { for (0..carousel.count()).map(|index| {
                let onclick = {
                    let carousel = carousel.clone();
                    Callback::from(move |_: MouseEvent| carousel.dispatch(CarouselAction::Select(index)))
                };
                html! {
                    <button
                        class="dot"
                        aria-label={format!("Go to testimonial {}", index + 1)}
                        style={dot_style(index == current)}
                        {onclick}
                    />
                }
            }) }
        </div>
    }
}

/// Mounts the carousel when the page has a testimonial grid and the
/// viewport is narrow. Returns whether it was mounted.
pub fn wire(config: &LandingConfig) -> Result<bool, JsValue> {
    let Some(grid) = dom::document()?.query_selector(".testimonials-grid")? else {
        return Ok(false);
    };
    if dom::inner_width() > config.carousel_breakpoint {
        return Ok(false);
    }

    let cards: Vec<HtmlElement> = dom::elements(grid.query_selector_all(".testimonial-card")?)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    if cards.is_empty() {
        return Ok(false);
    }

    let parent = grid
        .parent_element()
        .ok_or_else(|| JsValue::from_str("testimonial grid has no parent"))?;
    let host = dom::mount_point(&parent, "testimonial-carousel")?;
    info!("Starting testimonial carousel with {} cards", cards.len());
    yew::Renderer::<CarouselDots>::with_root_and_props(
        host,
        CarouselDotsProps {
            cards,
            interval_ms: config.carousel_interval_ms,
        },
    )
    .render();
    Ok(true)
}
