use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Element, Event, MouseEvent};

use crate::config::LandingConfig;
use crate::dom;

/// Navbar appearance and mobile menu state.
#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    scrolled_threshold: f64,
    scrolled: bool,
    menu_open: bool,
}

impl NavState {
    pub fn new(scrolled_threshold: f64) -> Self {
        Self {
            scrolled_threshold,
            scrolled: false,
            menu_open: false,
        }
    }

    /// Returns whether the navbar should render as scrolled.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.scrolled = scroll_y > self.scrolled_threshold;
        self.scrolled
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }
}

fn render_menu(menu: &Element, hamburger: &Element, open: bool) {
    let _ = menu.class_list().toggle_with_force("active", open);
    let _ = hamburger.class_list().toggle_with_force("active", open);
}

pub fn wire(config: &LandingConfig) -> Result<(), JsValue> {
    let window = dom::window()?;
    let navbar = dom::by_id("navbar")?;
    let hamburger = dom::by_id("hamburger")?;
    let menu = dom::by_id("navMenu")?;
    let state = Rc::new(RefCell::new(NavState::new(config.nav_scrolled_threshold)));

    {
        let state = state.clone();
        dom::listen::<Event, _>(&window, "scroll", move |_| {
            let scrolled = state.borrow_mut().on_scroll(dom::scroll_y());
            let _ = navbar.class_list().toggle_with_force("scrolled", scrolled);
        })?;
    }

    {
        let state = state.clone();
        let (menu, toggle) = (menu.clone(), hamburger.clone());
        dom::listen::<MouseEvent, _>(&hamburger, "click", move |_| {
            let open = state.borrow_mut().toggle_menu();
            debug!("Mobile menu {}", if open { "opened" } else { "closed" });
            render_menu(&menu, &toggle, open);
        })?;
    }

    for link in dom::query_all(".nav-link, .nav-cta")? {
        let state = state.clone();
        let (menu, hamburger) = (menu.clone(), hamburger.clone());
        dom::listen::<MouseEvent, _>(&link, "click", move |_| {
            let mut state = state.borrow_mut();
            if state.is_menu_open() {
                state.close_menu();
                render_menu(&menu, &hamburger, false);
            }
        })?;
    }

    Ok(())
}
