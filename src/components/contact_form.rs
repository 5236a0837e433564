//! Contact form submission.
//!
//! Every `<form>` on the page is intercepted: its named fields are posted
//! as one JSON object to the contact endpoint, the submit button shows a
//! busy label while the request is in flight, and the outcome is reported
//! through a notification.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::future::Future;
use std::rc::Rc;

use gloo_net::http::Request;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys::{self, Array};
use web_sys::{Event, FormData, HtmlButtonElement, HtmlFormElement};

use crate::components::notification::{Notification, Notifier, Presenter};
use crate::config::{LandingConfig, Messages};
use crate::dom;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("could not encode submission: {0}")]
    Encode(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("email address is malformed")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure(SubmitError),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Settled(SubmissionOutcome),
}

/// Field values captured at submit time. A repeated name keeps its last
/// value, as form encoding does.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SubmissionRequest {
    fields: BTreeMap<String, String>,
}

impl SubmissionRequest {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = BTreeMap::new();
        for (name, value) in pairs {
            fields.insert(name.into(), value.into());
        }
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn to_json(&self) -> Result<String, SubmitError> {
        serde_json::to_string(self).map_err(|e| SubmitError::Encode(e.to_string()))
    }
}

/// Sends a captured submission to the contact endpoint.
pub trait ContactClient {
    fn post(&self, request: &SubmissionRequest) -> impl Future<Output = Result<(), SubmitError>>;
}

#[derive(Debug, Clone)]
pub struct HttpContactClient {
    endpoint: String,
}

impl HttpContactClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

impl ContactClient for HttpContactClient {
    async fn post(&self, request: &SubmissionRequest) -> Result<(), SubmitError> {
        let body = request.to_json()?;
        let response = Request::post(&self.endpoint)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(SubmitError::Status(response.status()))
        }
    }
}

/// The button that submits a form.
pub trait SubmitControl {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
}

impl SubmitControl for HtmlButtonElement {
    fn label(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn set_label(&self, label: &str) {
        self.set_text_content(Some(label));
    }

    fn is_disabled(&self) -> bool {
        self.disabled()
    }

    fn set_disabled(&self, disabled: bool) {
        HtmlButtonElement::set_disabled(self, disabled);
    }
}

pub trait FormSurface {
    fn reset(&self);
}

impl FormSurface for HtmlFormElement {
    fn reset(&self) {
        HtmlFormElement::reset(self);
    }
}

/// Holds the submit button in its busy state; the saved label and
/// enabled state come back when the guard drops.
pub struct BusyGuard<'a, B: SubmitControl> {
    control: Option<&'a B>,
    label: String,
    disabled: bool,
}

impl<'a, B: SubmitControl> BusyGuard<'a, B> {
    pub fn acquire(control: Option<&'a B>, busy_label: &str) -> Self {
        let (label, disabled) = match control {
            Some(control) => {
                let saved = (control.label(), control.is_disabled());
                control.set_label(busy_label);
                control.set_disabled(true);
                saved
            }
            None => (String::new(), false),
        };
        Self { control, label, disabled }
    }
}

impl<B: SubmitControl> Drop for BusyGuard<'_, B> {
    fn drop(&mut self) {
        if let Some(control) = self.control {
            control.set_label(&self.label);
            control.set_disabled(self.disabled);
        }
    }
}

/// Per-form submission state plus the collaborators it reports through.
pub struct SubmissionWorkflow<C> {
    client: C,
    messages: Messages,
    validate_email: bool,
    state: RefCell<SubmissionState>,
}

impl<C: ContactClient> SubmissionWorkflow<C> {
    pub fn new(client: C, messages: Messages, validate_email: bool) -> Self {
        Self {
            client,
            messages,
            validate_email,
            state: RefCell::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Runs one submission attempt. Returns `None` when the attempt was
    /// dropped because this form already has a request in flight.
    pub async fn submit<B, F, N>(
        &self,
        request: SubmissionRequest,
        button: Option<&B>,
        form: &F,
        notifier: &N,
    ) -> Option<SubmissionOutcome>
    where
        B: SubmitControl,
        F: FormSurface,
        N: Notifier,
    {
        if self.state() == SubmissionState::InFlight {
            debug!("Ignoring submit while a request is already in flight");
            return None;
        }

        if self.validate_email {
            if let Some(email) = request.get("email").filter(|e| !e.trim().is_empty()) {
                if !validate_email(email.trim()) {
                    notifier.notify(Notification::error(self.messages.invalid_email.clone()));
                    let outcome = SubmissionOutcome::Failure(SubmitError::InvalidEmail);
                    *self.state.borrow_mut() = SubmissionState::Settled(outcome.clone());
                    return Some(outcome);
                }
            }
        }

        *self.state.borrow_mut() = SubmissionState::InFlight;
        let busy = BusyGuard::acquire(button, &self.messages.sending);

        let outcome = match self.client.post(&request).await {
            Ok(()) => SubmissionOutcome::Success,
            Err(e) => SubmissionOutcome::Failure(e),
        };

        match &outcome {
            SubmissionOutcome::Success => {
                info!("Contact form submitted ({} fields)", request.len());
                notifier.notify(Notification::success(self.messages.submit_success.clone()));
                form.reset();
            }
            SubmissionOutcome::Failure(e) => {
                warn!("Contact form submission failed: {}", e);
                notifier.notify(Notification::error(self.messages.submit_error.clone()));
            }
        }

        drop(busy);
        *self.state.borrow_mut() = SubmissionState::Settled(outcome.clone());
        Some(outcome)
    }
}

/// Reads every string-valued entry of the form. File inputs are skipped.
pub fn collect_fields(form: &HtmlFormElement) -> Result<SubmissionRequest, JsValue> {
    let data = FormData::new_with_form(form)?;
    let mut pairs = Vec::new();
    if let Some(entries) = js_sys::try_iter(&data)? {
        for entry in entries {
            let entry: Array = entry?.dyn_into()?;
            if let (Some(name), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
                pairs.push((name, value));
            }
        }
    }
    Ok(SubmissionRequest::from_pairs(pairs))
}

pub fn wire(config: &LandingConfig, presenter: Presenter) -> Result<usize, JsValue> {
    let client = HttpContactClient::new(config.contact_endpoint.clone());
    let forms: Vec<HtmlFormElement> = dom::query_all("form")?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlFormElement>().ok())
        .collect();

    for form in &forms {
        let workflow = Rc::new(SubmissionWorkflow::new(
            client.clone(),
            config.messages.clone(),
            config.validate_email,
        ));
        let target = form.clone();
        let form = form.clone();
        dom::listen::<Event, _>(&target, "submit", move |event| {
            event.prevent_default();

            let request = match collect_fields(&form) {
                Ok(request) => request,
                Err(e) => {
                    warn!("Could not read form fields: {:?}", e);
                    return;
                }
            };
            let button = form
                .query_selector("button[type=\"submit\"]")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());

            let workflow = workflow.clone();
            let form = form.clone();
            spawn_local(async move {
                workflow.submit(request, button.as_ref(), &form, &presenter).await;
            });
        })?;
    }

    Ok(forms.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::notification::NotificationKind;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::Cell;

    struct FakeButton {
        label: RefCell<String>,
        disabled: Cell<bool>,
        labels_seen: RefCell<Vec<String>>,
    }

    impl FakeButton {
        fn new(label: &str) -> Self {
            Self {
                label: RefCell::new(label.to_string()),
                disabled: Cell::new(false),
                labels_seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl SubmitControl for FakeButton {
        fn label(&self) -> String {
            self.label.borrow().clone()
        }
        fn set_label(&self, label: &str) {
            self.labels_seen.borrow_mut().push(label.to_string());
            *self.label.borrow_mut() = label.to_string();
        }
        fn is_disabled(&self) -> bool {
            self.disabled.get()
        }
        fn set_disabled(&self, disabled: bool) {
            self.disabled.set(disabled);
        }
    }

    struct FakeForm {
        fields: RefCell<BTreeMap<String, String>>,
    }

    impl FakeForm {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                fields: RefCell::new(
                    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
                ),
            }
        }

        fn request(&self) -> SubmissionRequest {
            SubmissionRequest::from_pairs(self.fields.borrow().clone())
        }

        fn value(&self, name: &str) -> String {
            self.fields.borrow().get(name).cloned().unwrap_or_default()
        }
    }

    impl FormSurface for FakeForm {
        fn reset(&self) {
            for value in self.fields.borrow_mut().values_mut() {
                value.clear();
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        shown: RefCell<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.shown.borrow_mut().push(notification);
        }
    }

    /// Answers with a fixed status, or a transport error when `status` is `None`.
    struct FakeClient {
        status: Option<u16>,
        sent: RefCell<Vec<String>>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl FakeClient {
        fn status(status: u16) -> Self {
            Self { status: Some(status), sent: RefCell::new(Vec::new()), gate: RefCell::new(None) }
        }

        fn offline() -> Self {
            Self { status: None, sent: RefCell::new(Vec::new()), gate: RefCell::new(None) }
        }
    }

    impl ContactClient for FakeClient {
        async fn post(&self, request: &SubmissionRequest) -> Result<(), SubmitError> {
            self.sent.borrow_mut().push(request.to_json()?);
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            match self.status {
                Some(status) if (200..300).contains(&status) => Ok(()),
                Some(status) => Err(SubmitError::Status(status)),
                None => Err(SubmitError::Transport("connection refused".to_string())),
            }
        }
    }

    fn workflow(client: FakeClient) -> SubmissionWorkflow<FakeClient> {
        let config = LandingConfig::default();
        SubmissionWorkflow::new(client, config.messages, config.validate_email)
    }

    fn checked_workflow(client: FakeClient) -> SubmissionWorkflow<FakeClient> {
        SubmissionWorkflow::new(client, Messages::default(), true)
    }

    #[test]
    fn success_notifies_and_clears_fields() {
        let form = FakeForm::new(&[("name", "A"), ("email", "a@b.com")]);
        let button = FakeButton::new("Надіслати");
        let notifier = RecordingNotifier::default();
        let wf = workflow(FakeClient::status(200));

        let outcome = block_on(wf.submit(form.request(), Some(&button), &form, &notifier));

        assert_eq!(outcome, Some(SubmissionOutcome::Success));
        let shown = notifier.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, NotificationKind::Success);
        assert_eq!(shown[0].message, Messages::default().submit_success);
        assert_eq!(form.value("name"), "");
        assert_eq!(form.value("email"), "");
        assert_eq!(
            wf.client.sent.borrow().as_slice(),
            [r#"{"email":"a@b.com","name":"A"}"#.to_string()]
        );
    }

    #[test]
    fn server_error_keeps_fields() {
        let form = FakeForm::new(&[("name", "A"), ("email", "a@b.com")]);
        let button = FakeButton::new("Надіслати");
        let notifier = RecordingNotifier::default();
        let wf = workflow(FakeClient::status(500));

        let outcome = block_on(wf.submit(form.request(), Some(&button), &form, &notifier));

        assert_eq!(outcome, Some(SubmissionOutcome::Failure(SubmitError::Status(500))));
        assert_eq!(notifier.shown.borrow()[0].kind, NotificationKind::Error);
        assert_eq!(form.value("name"), "A");
        assert_eq!(form.value("email"), "a@b.com");
    }

    #[test]
    fn button_restored_on_every_path() {
        for client in [FakeClient::status(204), FakeClient::status(503), FakeClient::offline()] {
            let form = FakeForm::new(&[("name", "A")]);
            let button = FakeButton::new("Send");
            let notifier = RecordingNotifier::default();
            let wf = workflow(client);

            block_on(wf.submit(form.request(), Some(&button), &form, &notifier));

            assert_eq!(button.label(), "Send");
            assert!(!button.is_disabled());
            assert_eq!(
                button.labels_seen.borrow().as_slice(),
                [Messages::default().sending, "Send".to_string()]
            );
        }
    }

    #[test]
    fn transport_failure_is_reported_as_error() {
        let form = FakeForm::new(&[("name", "A")]);
        let notifier = RecordingNotifier::default();
        let wf = workflow(FakeClient::offline());

        let outcome = block_on(wf.submit(form.request(), None::<&FakeButton>, &form, &notifier));

        assert!(matches!(outcome, Some(SubmissionOutcome::Failure(SubmitError::Transport(_)))));
        assert_eq!(notifier.shown.borrow()[0].message, Messages::default().submit_error);
        assert!(matches!(wf.state(), SubmissionState::Settled(SubmissionOutcome::Failure(_))));
    }

    #[test]
    fn second_submit_while_in_flight_is_dropped() {
        let (release, gate) = oneshot::channel();
        let client = FakeClient::status(200);
        *client.gate.borrow_mut() = Some(gate);
        let form = FakeForm::new(&[("name", "A")]);
        let button = FakeButton::new("Send");
        let notifier = RecordingNotifier::default();
        let wf = workflow(client);

        let (first, second) = block_on(async {
            futures::join!(
                wf.submit(form.request(), Some(&button), &form, &notifier),
                async {
                    assert_eq!(wf.state(), SubmissionState::InFlight);
                    assert!(button.is_disabled());
                    let second = wf.submit(form.request(), Some(&button), &form, &notifier).await;
                    let _ = release.send(());
                    second
                }
            )
        });

        assert_eq!(first, Some(SubmissionOutcome::Success));
        assert_eq!(second, None);
        assert_eq!(wf.client.sent.borrow().len(), 1);
        assert_eq!(notifier.shown.borrow().len(), 1);
    }

    #[test]
    fn malformed_email_is_not_sent_when_checked() {
        let form = FakeForm::new(&[("name", "A"), ("email", "not-an-email")]);
        let button = FakeButton::new("Send");
        let notifier = RecordingNotifier::default();
        let wf = checked_workflow(FakeClient::status(200));

        let outcome = block_on(wf.submit(form.request(), Some(&button), &form, &notifier));

        assert_eq!(outcome, Some(SubmissionOutcome::Failure(SubmitError::InvalidEmail)));
        assert!(wf.client.sent.borrow().is_empty());
        assert_eq!(notifier.shown.borrow()[0].message, Messages::default().invalid_email);
        assert_eq!(form.value("email"), "not-an-email");
        assert!(button.labels_seen.borrow().is_empty());
    }

    #[test]
    fn default_config_posts_any_email_unchanged() {
        let form = FakeForm::new(&[("name", "A"), ("email", "inna@localhost")]);
        let button = FakeButton::new("Send");
        let notifier = RecordingNotifier::default();
        let wf = workflow(FakeClient::status(200));

        let outcome = block_on(wf.submit(form.request(), Some(&button), &form, &notifier));

        assert_eq!(outcome, Some(SubmissionOutcome::Success));
        assert_eq!(
            wf.client.sent.borrow().as_slice(),
            [r#"{"email":"inna@localhost","name":"A"}"#.to_string()]
        );
        assert_eq!(notifier.shown.borrow()[0].kind, NotificationKind::Success);
        assert_eq!(
            button.labels_seen.borrow().as_slice(),
            [Messages::default().sending, "Send".to_string()]
        );
    }

    #[test]
    fn blank_email_skips_the_check() {
        let form = FakeForm::new(&[("name", "A"), ("email", "  ")]);
        let notifier = RecordingNotifier::default();
        let wf = checked_workflow(FakeClient::status(200));

        let outcome = block_on(wf.submit(form.request(), None::<&FakeButton>, &form, &notifier));

        assert_eq!(outcome, Some(SubmissionOutcome::Success));
        assert_eq!(wf.client.sent.borrow().len(), 1);
    }

    #[test]
    fn repeated_name_keeps_last_value() {
        let request = SubmissionRequest::from_pairs([("topic", "a"), ("topic", "b"), ("name", "A")]);
        assert_eq!(request.get("topic"), Some("b"));
        assert_eq!(request.len(), 2);
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("inna.coach@mail.com.ua"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email("a b@c.com"));
        assert!(!validate_email("@b.com"));
    }
}
