use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use web_sys::js_sys::Reflect;

/// Name of the optional global object a page can set before the wasm
/// bundle loads to override any of the defaults below.
pub const CONFIG_GLOBAL: &str = "landingConfig";

#[cfg(debug_assertions)]
pub fn get_contact_endpoint() -> &'static str {
    "http://localhost:3001/api/contact"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_contact_endpoint() -> &'static str {
    "/api/contact"
}

/// User-facing strings. Defaults are the page's Ukrainian copy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
    pub sending: String,
    pub submit_success: String,
    pub submit_error: String,
    pub invalid_email: String,
    pub skip_link: String,
    pub scroll_top_label: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            sending: "Відправка...".to_string(),
            submit_success: "Дякуємо! Ваше повідомлення відправлено.".to_string(),
            submit_error: "Виникла помилка. Спробуйте ще раз.".to_string(),
            invalid_email: "Перевірте, будь ласка, адресу електронної пошти.".to_string(),
            skip_link: "Перейти до основного вмісту".to_string(),
            scroll_top_label: "Scroll to top".to_string(),
        }
    }
}

/// Policy constants for every component. All lengths are CSS pixels,
/// all durations milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandingConfig {
    pub contact_endpoint: String,
    /// `scrollY` past which the navbar gets the `scrolled` class.
    pub nav_scrolled_threshold: f64,
    /// `scrollY` past which the scroll-to-top button is shown.
    pub scroll_top_threshold: f64,
    /// Height of the fixed navbar, subtracted from anchor targets.
    pub anchor_offset: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub lazy_root_margin: String,
    /// Widest viewport on which the testimonial carousel runs.
    pub carousel_breakpoint: f64,
    pub carousel_interval_ms: u32,
    pub notification_dwell_ms: u32,
    pub notification_exit_ms: u32,
    /// Reject malformed `email` fields before posting. Off unless the
    /// page opts in.
    pub validate_email: bool,
    pub parallax: bool,
    pub skip_link_target: String,
    pub messages: Messages,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            contact_endpoint: get_contact_endpoint().to_string(),
            nav_scrolled_threshold: 50.0,
            scroll_top_threshold: 300.0,
            anchor_offset: 80.0,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            lazy_root_margin: "0px".to_string(),
            carousel_breakpoint: 768.0,
            carousel_interval_ms: 5000,
            notification_dwell_ms: 3000,
            notification_exit_ms: 300,
            validate_email: false,
            parallax: false,
            skip_link_target: "#hero".to_string(),
            messages: Messages::default(),
        }
    }
}

impl LandingConfig {
    /// Reads `window.landingConfig`, falling back to defaults when it is
    /// absent or does not deserialize.
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let raw = match Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
            Ok(raw) if !raw.is_undefined() && !raw.is_null() => raw,
            _ => return Self::default(),
        };
        match serde_wasm_bindgen::from_value::<LandingConfig>(raw) {
            Ok(config) => {
                info!("Loaded page configuration from window.{}", CONFIG_GLOBAL);
                config
            }
            Err(e) => {
                warn!("Ignoring malformed window.{}: {}", CONFIG_GLOBAL, e);
                Self::default()
            }
        }
    }
}
