use crate::domain::model::{SubmissionOutcome, SubmissionRequest};
use crate::domain::ports::FormTransport;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use std::time::Duration;

/// Submits forms over HTTP the way a browser `fetch` with a `FormData` body
/// would: multipart body, `Accept: application/json`. GET and HEAD are
/// refused, as `fetch` refuses a body for them.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn parse_method(method: &str) -> Method {
    Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes()).unwrap_or(Method::GET)
}

#[async_trait]
impl FormTransport for HttpTransport {
    async fn send(&self, request: &SubmissionRequest) -> SubmissionOutcome {
        let method = parse_method(&request.method);
        tracing::debug!("Submitting form via {} {}", method, request.url);

        // A FormData body on GET or HEAD fails before anything is sent.
        if method == Method::GET || method == Method::HEAD {
            tracing::warn!("Form uses {} and cannot carry a body; not sent", method);
            return SubmissionOutcome::Unreachable {
                reason: format!("{} request cannot have a body", method),
            };
        }

        let form = request
            .fields
            .iter()
            .fold(Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });
        let builder = self
            .client
            .request(method, &request.url)
            .header(ACCEPT, "application/json")
            .multipart(form);

        match builder.send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!("Form endpoint responded with {}", status);
                let outcome = SubmissionOutcome::from_status(status.as_u16());
                if !outcome.is_delivered() {
                    if let Ok(body) = response.json::<serde_json::Value>().await {
                        tracing::warn!("Form endpoint rejected submission: {}", body);
                    }
                }
                outcome
            }
            Err(e) => {
                tracing::warn!("Form endpoint unreachable: {}", e);
                SubmissionOutcome::Unreachable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ElementId;
    use httpmock::prelude::*;

    fn request(url: String, method: &str) -> SubmissionRequest {
        SubmissionRequest {
            form: ElementId::new(0),
            url,
            method: method.to_string(),
            fields: vec![
                ("name".to_string(), "Ada".to_string()),
                ("message".to_string(), "Hello there".to_string()),
            ],
        }
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("post"), Method::POST);
        assert_eq!(parse_method(" Get "), Method::GET);
        assert_eq!(parse_method(""), Method::GET);
    }

    #[tokio::test]
    async fn test_post_sends_multipart_body_with_json_accept() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/f/contact")
                .header("accept", "application/json")
                .body_contains("Hello there");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"ok": true}));
        });

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let outcome = transport
            .send(&request(server.url("/f/contact"), "post"))
            .await;

        mock.assert();
        assert_eq!(outcome, SubmissionOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_get_form_fails_without_sending() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/contact");
            then.status(200);
        });

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        for method in ["get", "HEAD"] {
            let outcome = transport.send(&request(server.url("/contact"), method)).await;
            assert!(matches!(outcome, SubmissionOutcome::Unreachable { .. }));
        }

        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_server_rejection_reports_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/f/contact");
            then.status(422)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"errors": [{"message": "email required"}]}));
        });

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let outcome = transport
            .send(&request(server.url("/f/contact"), "POST"))
            .await;

        assert_eq!(outcome, SubmissionOutcome::Rejected { status: 422 });
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        let transport = HttpTransport::new(Duration::from_secs(2)).unwrap();
        let outcome = transport
            .send(&request("http://127.0.0.1:1/f/contact".to_string(), "post"))
            .await;

        assert!(matches!(outcome, SubmissionOutcome::Unreachable { .. }));
    }
}
