//! Contact form submission with a status line.
//!
//! Submitting is split in two so the page never blocks on the network:
//! [`ContactForm::begin`] shows `Sending...` and produces the request, and
//! [`ContactForm::complete`] reports whatever came back.

use crate::config::ContactConfig;
use crate::domain::model::{ElementId, FormStatus, SubmissionOutcome, SubmissionRequest};
use crate::domain::ports::{Document, FormTransport};
use crate::domain::selector::Selector;
use url::Url;

const EXCLUDED_INPUT_TYPES: [&str; 5] = ["submit", "button", "reset", "image", "file"];

#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    form: ElementId,
    status: ElementId,
    messages: ContactConfig,
}

impl ContactForm {
    /// `None` unless both the form and its status element exist.
    pub fn bind(
        doc: &dyn Document,
        form: &Selector,
        status: &Selector,
        messages: ContactConfig,
    ) -> Option<Self> {
        Some(Self {
            form: doc.query(form)?,
            status: doc.query(status)?,
            messages,
        })
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    pub fn status_element(&self) -> ElementId {
        self.status
    }

    pub fn status(&self, doc: &dyn Document) -> FormStatus {
        FormStatus {
            message: doc.text_content(self.status),
            color: doc.style_property(self.status, "color"),
        }
    }

    pub fn begin(&self, doc: &mut dyn Document) -> SubmissionRequest {
        doc.set_text_content(self.status, &self.messages.sending_message);
        SubmissionRequest {
            form: self.form,
            url: resolve_action(doc, self.form),
            method: form_method(doc, self.form),
            fields: collect_fields(doc, self.form),
        }
    }

    pub fn complete(&self, doc: &mut dyn Document, outcome: &SubmissionOutcome) -> FormStatus {
        let (message, color) = match outcome {
            SubmissionOutcome::Delivered => {
                (&self.messages.success_message, &self.messages.success_color)
            }
            SubmissionOutcome::Rejected { .. } => {
                (&self.messages.rejected_message, &self.messages.failure_color)
            }
            SubmissionOutcome::Unreachable { .. } => (
                &self.messages.network_error_message,
                &self.messages.failure_color,
            ),
        };
        doc.set_text_content(self.status, message);
        doc.set_style_property(self.status, "color", color);
        if outcome.is_delivered() {
            doc.reset_form(self.form);
        }
        tracing::info!("Contact form submission finished: {:?}", outcome);
        self.status(doc)
    }

    pub async fn submit<T: FormTransport + ?Sized>(
        &self,
        doc: &mut dyn Document,
        transport: &T,
    ) -> SubmissionOutcome {
        let request = self.begin(doc);
        let outcome = transport.send(&request).await;
        self.complete(doc, &outcome);
        outcome
    }
}

/// The form's `action` resolved against the page location. A missing action
/// submits to the page itself; an unresolvable one is passed through as
/// written and fails at send time.
pub fn resolve_action(doc: &dyn Document, form: ElementId) -> String {
    let action = doc.attribute(form, "action").unwrap_or_default();
    let base = doc.location();

    if action.trim().is_empty() {
        return base.unwrap_or_default().to_string();
    }
    if let Ok(url) = Url::parse(&action) {
        return url.to_string();
    }
    match base.map(Url::parse) {
        Some(Ok(base)) => match base.join(&action) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::warn!("Cannot resolve form action `{}`: {}", action, e);
                action
            }
        },
        _ => {
            tracing::warn!("Form action `{}` is relative but the page has no location", action);
            action
        }
    }
}

/// Lowercased `method`; anything other than `get`, `post` or `dialog` is `get`.
pub fn form_method(doc: &dyn Document, form: ElementId) -> String {
    match doc
        .attribute_value(form, "method")
        .map(|m| m.trim().to_ascii_lowercase())
    {
        Some(m) if m == "post" || m == "dialog" => m,
        _ => "get".to_string(),
    }
}

/// Name/value pairs the browser would put in the form data set.
pub fn collect_fields(doc: &dyn Document, form: ElementId) -> Vec<(String, String)> {
    let Ok(named) = Selector::parse("[name]") else {
        return Vec::new();
    };
    doc.query_all_within(form, &named)
        .into_iter()
        .filter_map(|el| {
            let name = doc.attribute_value(el, "name")?;
            if name.is_empty() || doc.attribute_value(el, "disabled").is_some() {
                return None;
            }
            let value = doc.value(el)?;
            if doc.tag_name(el) == "input" {
                let kind = doc
                    .attribute_value(el, "type")
                    .unwrap_or("text")
                    .to_ascii_lowercase();
                if EXCLUDED_INPUT_TYPES.contains(&kind.as_str()) {
                    return None;
                }
                if kind == "checkbox" || kind == "radio" {
                    doc.attribute_value(el, "checked")?;
                    if doc.attribute_value(el, "value").is_none() {
                        return Some((name.to_string(), "on".to_string()));
                    }
                }
            }
            Some((name.to_string(), value))
        })
        .collect()
}
