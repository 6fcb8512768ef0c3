//! HTTP transport abstraction.
//!
//! The [`Transport`] trait is the seam between request building and the network,
//! so the client can be driven by an in-memory fake in tests.

use crate::api::messages::Method;
use crate::api::sequence::CancellationToken;
use crate::domain::error::{Result, VideothequeError};
use reqwest::blocking::{multipart, Client};
use std::time::Duration;

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// One field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

/// A fully built request, independent of any HTTP library.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl HttpRequest {
    /// Path followed by the URL-encoded query string, if any.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }
}

/// Status and raw body of a server answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends built requests and returns the raw reply.
///
/// Non-2xx statuses are replies, not errors: the caller decodes their body to
/// recover the server's structured `error` field.
pub trait Transport: Send {
    /// Performs `request`.
    ///
    /// # Errors
    ///
    /// Returns [`VideothequeError::Transport`] when no HTTP reply was obtained,
    /// including when `token` was cancelled before the request left.
    fn send(&self, request: &HttpRequest, token: &CancellationToken) -> Result<HttpReply>;
}

/// Blocking `reqwest` transport rooted at the server base URL.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("videotheque/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_form(parts: &[FormPart]) -> Result<multipart::Form> {
        let mut form = multipart::Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File {
                    name,
                    file_name,
                    mime_type,
                    bytes,
                } => {
                    let file = multipart::Part::bytes(bytes.clone())
                        .file_name(file_name.clone())
                        .mime_str(mime_type)?;
                    form.part(name.clone(), file)
                }
            };
        }
        Ok(form)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &HttpRequest, token: &CancellationToken) -> Result<HttpReply> {
        if token.is_cancelled() {
            return Err(VideothequeError::Transport("request cancelled".to_string()));
        }

        let url = format!("{}{}", self.base_url, request.path_and_query());
        let span = tracing::debug_span!("http_send", method = ?request.method, url = %url);
        let _guard = span.enter();

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart(parts) => builder.multipart(Self::build_form(parts)?),
        };

        let started = std::time::Instant::now();
        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        tracing::debug!(
            status,
            elapsed_ms = started.elapsed().as_millis(),
            body_len = body.len(),
            "http reply received"
        );
        Ok(HttpReply { status, body })
    }
}
