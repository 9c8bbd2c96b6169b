use agni_site::{
    Document, Element, ElementId, HttpTransport, MemoryDocument, MemoryStore, PageEvent,
    SiteConfig, SiteScript, SubmissionOutcome,
};
use httpmock::prelude::*;
use std::time::Duration;
use tokio_test::assert_ok;

struct ContactPage {
    doc: MemoryDocument,
    form: ElementId,
    status: ElementId,
    email: ElementId,
    message: ElementId,
}

fn contact_page(location: &str, action: &str) -> ContactPage {
    let mut doc = MemoryDocument::new().with_location(location);
    let form = doc.append_to_body(
        Element::new("form")
            .id("contactForm")
            .attr("action", action)
            .attr("method", "POST"),
    );
    let email = doc.append(form, Element::new("input").attr("type", "email").attr("name", "email"));
    let message = doc.append(form, Element::new("textarea").attr("name", "message"));
    let submit = doc.append(form, Element::new("button").attr("type", "submit"));
    doc.append(submit, Element::new("span").text("Send"));
    let status = doc.append_to_body(Element::new("p").id("formStatus"));

    doc.set_value(email, "ada@example.com");
    doc.set_value(message, "Quote for a new site, please");
    ContactPage {
        doc,
        form,
        status,
        email,
        message,
    }
}

fn transport() -> HttpTransport {
    assert_ok!(HttpTransport::new(Duration::from_secs(5)))
}

#[tokio::test]
async fn test_successful_submission_resets_form() {
    let server = MockServer::start();
    let endpoint = server.mock(|when, then| {
        when.method(POST)
            .path("/f/agni")
            .header("accept", "application/json")
            .body_contains("ada@example.com")
            .body_contains("Quote for a new site, please");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"next": "/thanks", "ok": true}));
    });

    let page = contact_page(&server.url("/contact.html"), "/f/agni");
    let (status, email, message) = (page.status, page.email, page.message);
    let mut site = SiteScript::boot(page.doc, MemoryStore::new(), SiteConfig::default()).unwrap();

    let outcome = site.submit_contact(&transport()).await;

    endpoint.assert();
    assert_eq!(outcome, Some(SubmissionOutcome::Delivered));
    let doc = site.document();
    assert_eq!(
        doc.text_content(status),
        "✅ Your message has been sent successfully."
    );
    assert_eq!(doc.style_property(status, "color").as_deref(), Some("green"));
    assert_eq!(doc.value(email).as_deref(), Some(""));
    assert_eq!(doc.value(message).as_deref(), Some(""));
}

#[tokio::test]
async fn test_rejected_submission_keeps_fields() {
    let server = MockServer::start();
    let endpoint = server.mock(|when, then| {
        when.method(POST).path("/f/agni");
        then.status(422)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"errors": [{"field": "email", "message": "invalid"}]}));
    });

    let page = contact_page(&server.url("/contact.html"), &server.url("/f/agni"));
    let (status, email) = (page.status, page.email);
    let mut site = SiteScript::boot(page.doc, MemoryStore::new(), SiteConfig::default()).unwrap();

    let outcome = site.submit_contact(&transport()).await;

    endpoint.assert();
    assert_eq!(outcome, Some(SubmissionOutcome::Rejected { status: 422 }));
    let doc = site.document();
    assert_eq!(
        doc.text_content(status),
        "❌ Something went wrong. Please try again or email us directly."
    );
    assert_eq!(doc.style_property(status, "color").as_deref(), Some("red"));
    assert_eq!(doc.value(email).as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn test_unreachable_endpoint_reports_network_error() {
    let page = contact_page("http://127.0.0.1:1/contact.html", "/f/agni");
    let status = page.status;
    let mut site = SiteScript::boot(page.doc, MemoryStore::new(), SiteConfig::default()).unwrap();

    let outcome = site.submit_contact(&transport()).await;

    assert!(matches!(outcome, Some(SubmissionOutcome::Unreachable { .. })));
    assert_eq!(
        site.document().text_content(status),
        "❌ Network error. Please check your internet and try again."
    );
}

#[tokio::test]
async fn test_page_stays_interactive_while_request_is_in_flight() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/f/agni");
        then.status(200);
    });

    let page = contact_page(&server.url("/contact.html"), "/f/agni");
    let (form, status) = (page.form, page.status);
    let mut site = SiteScript::boot(page.doc, MemoryStore::new(), SiteConfig::default()).unwrap();

    let request = site.dispatch(PageEvent::Submit(form)).unwrap();
    assert_eq!(site.document().text_content(status), "Sending...");
    assert_eq!(request.url, server.url("/f/agni"));
    assert_eq!(request.method, "post");
    assert_eq!(request.fields.len(), 2);

    site.dispatch(PageEvent::Clock(Duration::from_millis(100)));
    assert_eq!(site.document().text_content(status), "Sending...");

    let outcome = agni_site::FormTransport::send(&transport(), &request).await;
    let shown = site.complete_submission(&outcome).unwrap();
    assert!(shown.message.starts_with('✅'));
    assert_eq!(shown.color.as_deref(), Some("green"));
}

#[tokio::test]
async fn test_custom_messages_from_config() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/f/agni");
        then.status(500);
    });

    let config = SiteConfig::from_toml_str(
        r##"
[contact]
rejected_message = "❌ Server said no."
failure_color = "#c62828"
"##,
    )
    .unwrap();
    let page = contact_page(&server.url("/contact.html"), "/f/agni");
    let status = page.status;
    let mut site = SiteScript::boot(page.doc, MemoryStore::new(), config).unwrap();

    site.submit_contact(&transport()).await;
    assert_eq!(site.document().text_content(status), "❌ Server said no.");
    assert_eq!(
        site.document().style_property(status, "color").as_deref(),
        Some("#c62828")
    );
}

#[tokio::test]
async fn test_form_without_method_reports_network_error_and_sends_nothing() {
    let server = MockServer::start();
    let endpoint = server.mock(|when, then| {
        when.method(GET).path("/f/agni");
        then.status(200);
    });

    let mut doc = MemoryDocument::new().with_location(&server.url("/contact.html"));
    let form = doc.append_to_body(Element::new("form").id("contactForm").attr("action", "/f/agni"));
    let email = doc.append(form, Element::new("input").attr("name", "email"));
    doc.set_value(email, "ada@example.com");
    let status = doc.append_to_body(Element::new("p").id("formStatus"));
    let mut site = SiteScript::boot(doc, MemoryStore::new(), SiteConfig::default()).unwrap();

    let outcome = site.submit_contact(&transport()).await;

    endpoint.assert_hits(0);
    assert!(matches!(outcome, Some(SubmissionOutcome::Unreachable { .. })));
    assert_eq!(
        site.document().text_content(status),
        "❌ Network error. Please check your internet and try again."
    );
    assert_eq!(site.document().value(email).as_deref(), Some("ada@example.com"));
}
