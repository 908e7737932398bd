//! Contact form: client-side validation and the JSON POST to the backend.

use std::cell::Cell;

use gloo_net::http::Request;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{self, classes, messages, CONTACT_PATH};
use crate::dom::Dom;
use crate::error::ContactError;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
    Agree,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub agreed: bool,
}

/// Wire body. Field names are the backend's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    #[serde(rename = "hoTen")]
    pub name: String,
    pub email: String,
    #[serde(rename = "soDienThoai")]
    pub phone: String,
    #[serde(rename = "loiNhan")]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalid {
    pub field: Field,
    pub message: &'static str,
}

/// Every failing field, in check order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    failures: Vec<Invalid>,
}

impl ValidationReport {
    pub fn first(&self) -> Invalid {
        self.failures[0]
    }

    pub fn failures(&self) -> &[Invalid] {
        &self.failures
    }
}

pub fn validate(fields: &ContactFields) -> Result<ContactRequest, ValidationReport> {
    let name = fields.name.trim();
    let message = fields.message.trim();

    let mut failures = Vec::new();
    if name.is_empty() {
        failures.push(Invalid { field: Field::Name, message: messages::NAME_REQUIRED });
    }
    // The pattern runs on the raw value, so surrounding spaces are rejected.
    if fields.email.trim().is_empty() {
        failures.push(Invalid { field: Field::Email, message: messages::EMAIL_REQUIRED });
    } else if !EMAIL_PATTERN.is_match(&fields.email) {
        failures.push(Invalid { field: Field::Email, message: messages::EMAIL_INVALID });
    }
    if message.is_empty() {
        failures.push(Invalid { field: Field::Message, message: messages::MESSAGE_REQUIRED });
    }
    if !fields.agreed {
        failures.push(Invalid { field: Field::Agree, message: messages::AGREE_REQUIRED });
    }

    if !failures.is_empty() {
        return Err(ValidationReport { failures });
    }
    Ok(ContactRequest {
        name: name.to_string(),
        email: fields.email.clone(),
        phone: fields.phone.trim().to_string(),
        message: message.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub ok: bool,
    pub status: u16,
    pub body: ContactResponse,
}

pub trait ContactTransport {
    async fn post(&self, request: &ContactRequest) -> Result<Reply, ContactError>;
}

pub struct HttpTransport {
    url: String,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            url: format!("{}{}", config::get_backend_url(), CONTACT_PATH),
        }
    }
}

impl ContactTransport for HttpTransport {
    async fn post(&self, request: &ContactRequest) -> Result<Reply, ContactError> {
        let response = Request::post(&self.url)
            .header("Content-Type", "application/json")
            .json(request)
            .map_err(|e| ContactError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ContactError::Transport(e.to_string()))?;

        let status = response.status();
        let ok = response.ok();
        let text = response
            .text()
            .await
            .map_err(|e| ContactError::Transport(e.to_string()))?;
        // The body is parsed whatever the status; a non-JSON body just means
        // there is no server message to show.
        let body = serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!("Contact response ({}) is not JSON: {}", status, e);
            ContactResponse::default()
        });
        Ok(Reply { ok, status, body })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(Field),
    /// A previous submission is still in flight.
    Busy,
    Sent(String),
    Failed(String),
}

pub fn outcome(result: Result<Reply, ContactError>) -> SubmitOutcome {
    match result {
        Ok(reply) if reply.ok => SubmitOutcome::Sent(
            reply
                .body
                .message
                .unwrap_or_else(|| messages::SUBMIT_SUCCESS.to_string()),
        ),
        Ok(reply) => {
            warn!("Contact request rejected with status {}", reply.status);
            SubmitOutcome::Failed(
                reply
                    .body
                    .message
                    .unwrap_or_else(|| messages::SUBMIT_FAILED.to_string()),
            )
        }
        Err(e) => {
            warn!("Contact request failed: {}", e);
            SubmitOutcome::Failed(messages::SUBMIT_FAILED.to_string())
        }
    }
}

pub struct ContactFormHandles<N> {
    pub form: N,
    pub name: N,
    pub email: N,
    pub phone: Option<N>,
    pub message: N,
    pub agree: N,
    pub agree_label: Option<N>,
    pub submit: N,
    pub status: Option<N>,
}

pub struct ContactForm<N> {
    handles: ContactFormHandles<N>,
    in_flight: Cell<bool>,
}

/// Holds the submit control in its busy state; puts it back on drop, so
/// every return from a submission restores it: success, server error, and
/// transport failure, which is where fetch's JS exceptions arrive as `Err`.
/// A panic on wasm32 aborts instead, and no drop runs.
struct Pending<'a, D: Dom> {
    dom: &'a D,
    submit: &'a D::Node,
    in_flight: &'a Cell<bool>,
    label: String,
    was_disabled: bool,
}

impl<'a, D: Dom> Pending<'a, D> {
    fn begin(dom: &'a D, submit: &'a D::Node, in_flight: &'a Cell<bool>) -> Self {
        let label = dom.text(submit);
        let was_disabled = dom.is_disabled(submit);
        in_flight.set(true);
        dom.set_disabled(submit, true);
        dom.set_text(submit, messages::SUBMITTING_LABEL);
        Self {
            dom,
            submit,
            in_flight,
            label,
            was_disabled,
        }
    }
}

impl<D: Dom> Drop for Pending<'_, D> {
    fn drop(&mut self) {
        self.dom.set_text(self.submit, &self.label);
        self.dom.set_disabled(self.submit, self.was_disabled);
        self.in_flight.set(false);
    }
}

impl<N: Clone + PartialEq> ContactForm<N> {
    pub fn new(handles: ContactFormHandles<N>) -> Self {
        Self {
            handles,
            in_flight: Cell::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    pub fn read<D: Dom<Node = N>>(&self, dom: &D) -> ContactFields {
        let h = &self.handles;
        ContactFields {
            name: dom.value(&h.name),
            email: dom.value(&h.email),
            phone: h.phone.as_ref().map(|p| dom.value(p)).unwrap_or_default(),
            message: dom.value(&h.message),
            agreed: dom.is_checked(&h.agree),
        }
    }

    pub async fn submit<D, T>(&self, dom: &D, transport: &T) -> SubmitOutcome
    where
        D: Dom<Node = N>,
        T: ContactTransport,
    {
        if self.is_in_flight() {
            warn!("Contact form already submitting, ignoring");
            return SubmitOutcome::Busy;
        }

        self.clear_markers(dom);
        let request = match validate(&self.read(dom)) {
            Ok(request) => request,
            Err(report) => {
                self.show_invalid(dom, &report);
                return SubmitOutcome::Invalid(report.first().field);
            }
        };

        let _pending = Pending::begin(dom, &self.handles.submit, &self.in_flight);
        info!("Submitting contact form");
        let result = outcome(transport.post(&request).await);
        match &result {
            SubmitOutcome::Sent(message) => {
                self.show_status(dom, message, true);
                self.reset(dom);
            }
            SubmitOutcome::Failed(message) => self.show_status(dom, message, false),
            SubmitOutcome::Invalid(_) | SubmitOutcome::Busy => {}
        }
        result
    }

    fn node(&self, field: Field) -> &N {
        match field {
            Field::Name => &self.handles.name,
            Field::Email => &self.handles.email,
            Field::Message => &self.handles.message,
            Field::Agree => &self.handles.agree,
        }
    }

    fn text_fields(&self) -> impl Iterator<Item = &N> {
        let h = &self.handles;
        [Some(&h.name), Some(&h.email), h.phone.as_ref(), Some(&h.message)]
            .into_iter()
            .flatten()
    }

    fn clear_markers<D: Dom<Node = N>>(&self, dom: &D) {
        for node in self.text_fields() {
            dom.remove_class(node, classes::FIELD_ERROR);
            dom.add_class(node, classes::FIELD_DEFAULT);
        }
        dom.remove_class(&self.handles.agree, classes::FIELD_ERROR);
        if let Some(label) = &self.handles.agree_label {
            dom.remove_class(label, classes::LABEL_ERROR);
        }
        if let Some(status) = &self.handles.status {
            dom.set_text(status, "");
            dom.remove_class(status, classes::STATUS_SUCCESS);
            dom.remove_class(status, classes::STATUS_ERROR);
        }
    }

    fn show_invalid<D: Dom<Node = N>>(&self, dom: &D, report: &ValidationReport) {
        for failure in report.failures() {
            let node = self.node(failure.field);
            dom.add_class(node, classes::FIELD_ERROR);
            if failure.field == Field::Agree {
                if let Some(label) = &self.handles.agree_label {
                    dom.add_class(label, classes::LABEL_ERROR);
                }
            } else {
                dom.remove_class(node, classes::FIELD_DEFAULT);
            }
        }
        let first = report.first();
        self.show_status(dom, first.message, false);
        dom.focus(self.node(first.field));
    }

    fn show_status<D: Dom<Node = N>>(&self, dom: &D, message: &str, success: bool) {
        let Some(status) = &self.handles.status else {
            info!("Contact form status: {}", message);
            return;
        };
        let (add, remove) = if success {
            (classes::STATUS_SUCCESS, classes::STATUS_ERROR)
        } else {
            (classes::STATUS_ERROR, classes::STATUS_SUCCESS)
        };
        dom.remove_class(status, remove);
        dom.add_class(status, add);
        dom.set_text(status, message);
    }

    fn reset<D: Dom<Node = N>>(&self, dom: &D) {
        dom.reset_form(&self.handles.form);
        for node in self.text_fields() {
            dom.set_value(node, "");
        }
        dom.set_checked(&self.handles.agree, false);
    }
}
