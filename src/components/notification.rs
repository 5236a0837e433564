//! Transient toast messages.
//!
//! A notification is shown for a fixed dwell time, plays its entrance
//! animation in reverse, and then removes itself from the document.
//! There is no queue: concurrent notifications render independently.

use chrono::{DateTime, Utc};
use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::config::LandingConfig;
use crate::dom::{self, DocumentHead, StyleHost};

/// Attribute that marks the shared notification stylesheet.
pub const STYLE_MARKER: &str = "data-notification";

const NOTIFICATION_CSS: &str = r#"
    .notification {
        position: fixed;
        top: 100px;
        right: 20px;
        padding: 16px 24px;
        border-radius: 8px;
        background: var(--white);
        box-shadow: var(--shadow-medium);
        z-index: 9999;
        animation: slideInRight 0.3s ease;
    }

    .notification-success {
        border-left: 4px solid #4CAF50;
    }

    .notification-error {
        border-left: 4px solid #f44336;
    }

    @keyframes slideInRight {
        from {
            transform: translateX(400px);
            opacity: 0;
        }
        to {
            transform: translateX(0);
            opacity: 1;
        }
    }
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl Default for NotificationKind {
    fn default() -> Self {
        NotificationKind::Info
    }
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

/// How long a notification stays around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetime {
    /// Time on screen before the exit animation starts.
    pub dwell_ms: u32,
    /// Length of the exit animation; the element is removed after it.
    pub exit_ms: u32,
}

impl Default for Lifetime {
    fn default() -> Self {
        Self { dwell_ms: 3000, exit_ms: 300 }
    }
}

impl Lifetime {
    pub fn from_config(config: &LandingConfig) -> Self {
        Self {
            dwell_ms: config.notification_dwell_ms,
            exit_ms: config.notification_exit_ms,
        }
    }
}

/// Runs a task once after a delay.
pub trait Scheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Browser timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}

/// Where notifications are drawn. The surface also carries the shared
/// stylesheet.
pub trait ToastSurface: StyleHost {
    type Toast: Clone + 'static;

    fn mount(&self, notification: &Notification) -> Result<Self::Toast, JsValue>;
    /// Starts the reverse entrance animation.
    fn start_exit(toast: &Self::Toast, exit_ms: u32);
    fn unmount(toast: &Self::Toast);
}

/// Notifications as `<div>`s appended to `<body>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentSurface;

impl StyleHost for DocumentSurface {
    fn has_marked_style(&self, marker: &str) -> bool {
        DocumentHead.has_marked_style(marker)
    }

    fn append_style(&self, css: &str, marker: Option<&str>) -> Result<(), JsValue> {
        DocumentHead.append_style(css, marker)
    }
}

impl ToastSurface for DocumentSurface {
    type Toast = HtmlElement;

    fn mount(&self, notification: &Notification) -> Result<HtmlElement, JsValue> {
        let element = dom::document()?
            .create_element("div")?
            .dyn_into::<HtmlElement>()?;
        element.set_class_name(&notification.class_name());
        element.set_text_content(Some(&notification.message));
        dom::body()?.append_child(&element)?;
        Ok(element)
    }

    fn start_exit(toast: &HtmlElement, exit_ms: u32) {
        let _ = toast
            .style()
            .set_property("animation", &format!("slideInRight {}ms ease reverse", exit_ms));
    }

    fn unmount(toast: &HtmlElement) {
        toast.remove();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    pub fn class_name(&self) -> String {
        format!("notification notification-{}", self.kind.as_str())
    }
}

/// Anything that can surface a message to the visitor.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Renders notifications and schedules their removal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter<T = DocumentSurface, S = TimeoutScheduler> {
    lifetime: Lifetime,
    surface: T,
    scheduler: S,
}

impl Presenter {
    pub fn new(lifetime: Lifetime) -> Self {
        Self::with_parts(lifetime, DocumentSurface, TimeoutScheduler)
    }
}

impl<T, S> Presenter<T, S>
where
    T: ToastSurface + 'static,
    S: Scheduler + Clone + 'static,
{
    pub fn with_parts(lifetime: Lifetime, surface: T, scheduler: S) -> Self {
        Self {
            lifetime,
            surface,
            scheduler,
        }
    }

    pub fn show(&self, notification: &Notification) -> Result<(), JsValue> {
        dom::inject_style_into(&self.surface, NOTIFICATION_CSS, Some(STYLE_MARKER))?;
        let toast = self.surface.mount(notification)?;
        debug!(
            "Showing {} notification created at {}",
            notification.kind.as_str(),
            notification.created_at.format("%H:%M:%S%.3f")
        );

        let Lifetime { dwell_ms, exit_ms } = self.lifetime;
        let scheduler = self.scheduler.clone();
        self.scheduler.after(
            dwell_ms,
            Box::new(move || {
                T::start_exit(&toast, exit_ms);
                scheduler.after(exit_ms, Box::new(move || T::unmount(&toast)));
            }),
        );
        Ok(())
    }
}

impl<T, S> Notifier for Presenter<T, S>
where
    T: ToastSurface + 'static,
    S: Scheduler + Clone + 'static,
{
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.show(&notification) {
            log::warn!("Could not render notification: {:?}", e);
        }
    }
}
