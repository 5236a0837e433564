use log::{info, warn, Level};
use wasm_bindgen::JsValue;

mod config;
mod dom;
mod components {
    pub mod a11y;
    pub mod carousel;
    pub mod contact_form;
    pub mod counter;
    pub mod cta;
    pub mod faq;
    pub mod lazy_images;
    pub mod nav;
    pub mod notification;
    pub mod parallax;
    pub mod reveal;
    pub mod scroll_top;
    pub mod smooth_scroll;
}

use components::{
    a11y, carousel, contact_form, counter, cta, faq, lazy_images, nav, parallax, reveal,
    scroll_top, smooth_scroll,
};
use components::notification::{Lifetime, Presenter};
use config::LandingConfig;

/// Logs how a component's wiring went. A failure here never stops the
/// components that come after it.
fn start<T: std::fmt::Debug>(name: &str, result: Result<T, JsValue>) {
    match result {
        Ok(detail) => info!("{} ready ({:?})", name, detail),
        Err(e) => warn!("{} failed to start: {:?}", name, e),
    }
}

fn greet() {
    gloo_console::log!("%c👋 Привіт!", "font-size: 24px; font-weight: bold; color: #2B6B6B;");
    gloo_console::log!(
        "%cЯкщо ви читаєте це, значить вам цікаво, як працює цей сайт. Я теж люблю розбиратися в коді! 😊",
        "font-size: 14px; color: #666;"
    );
    gloo_console::log!(
        "%cІнна - Коучинг Переходів",
        "font-size: 16px; font-weight: bold; color: #2B6B6B;"
    );
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    console_log::init_with_level(level).expect("error initializing log");

    info!("Starting landing page");
    let config = LandingConfig::load();
    let presenter = Presenter::new(Lifetime::from_config(&config));

    start("Navigation", nav::wire(&config));
    start("Smooth scroll", smooth_scroll::wire(&config));
    start("FAQ accordion", faq::wire());
    start("Reveal animations", reveal::wire(&config));
    start("Scroll-to-top button", scroll_top::wire(&config));
    start("Loaded marker", a11y::wire_loaded_marker());
    if config.parallax {
        start("Parallax", parallax::wire());
    }
    start("Testimonial carousel", carousel::wire(&config));
    start("Counters", counter::wire());
    start("Lazy images", lazy_images::wire(&config));
    start("CTA tracking", cta::wire());
    start("Skip link", a11y::wire_skip_link(&config));
    start("Keyboard cards", a11y::wire_keyboard_cards());
    start("Contact forms", contact_form::wire(&config, presenter));

    info!("🎉 Landing page loaded successfully!");
    greet();
}
