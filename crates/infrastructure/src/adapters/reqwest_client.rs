//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication for the client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Url};
use sambharalu_application::ports::{HttpClient, HttpClientError};
use sambharalu_domain::{
    request::{Header, Headers, HttpMethod, MultipartForm, RequestBody, RequestSpec},
    response::ResponseSpec,
};

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// This is the production HTTP adapter. It wraps `reqwest::Client`
/// and implements the `HttpClient` port from the application layer.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "sambharalu/<version>"
    ///
    /// Timeouts are set per request from the `RequestSpec`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("sambharalu/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Attaches the domain `RequestBody` to the builder.
    ///
    /// JSON and form bodies use the body's own content type; multipart
    /// bodies get one with a generated boundary from reqwest.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        let builder = match body.content_type() {
            Some(content_type) => builder.header(reqwest::header::CONTENT_TYPE, content_type),
            None => builder,
        };

        match body {
            RequestBody::None => Ok(builder),

            RequestBody::Json(value) => {
                let content = serde_json::to_vec(value)
                    .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
                Ok(builder.body(content))
            }

            RequestBody::Form(pairs) => {
                let encoded = serde_urlencoded::to_string(pairs)
                    .map_err(|e| HttpClientError::InvalidBody(format!("Invalid form: {e}")))?;
                Ok(builder.body(encoded))
            }

            RequestBody::Multipart(form) => Ok(builder.multipart(Self::build_multipart(form)?)),
        }
    }

    /// Builds a reqwest multipart form: text fields first, then the file.
    fn build_multipart(form: &MultipartForm) -> Result<Form, HttpClientError> {
        let mut multipart = Form::new();

        for (name, value) in &form.fields {
            multipart = multipart.text(name.clone(), value.clone());
        }

        if let Some(file) = &form.file {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.filename.clone())
                .mime_str(&file.mime_type)
                .map_err(|e| {
                    HttpClientError::InvalidBody(format!("Invalid MIME type '{}': {e}", file.mime_type))
                })?;
            multipart = multipart.part(file.field.clone(), part);
        }

        Ok(multipart)
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Joins an error with its sources; reqwest keeps the useful part
/// ("connection refused", "dns error") in the source chain.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let timeout_ms = request.timeout_ms;

        // Parse URL
        let parsed_url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        // Start timing
        let start = Instant::now();

        // Build request
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), parsed_url)
            .timeout(Duration::from_millis(timeout_ms));

        for header in request.headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }

        builder = Self::build_body(builder, &request.body)?;

        // Execute request
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();

        let headers: Headers = response
            .headers()
            .iter()
            .map(|(k, v)| Header::new(k.as_str(), v.to_str().unwrap_or("<binary>")))
            .collect();

        // Read body
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
            .to_vec();

        Ok(ResponseSpec::new(status, headers, body, start.elapsed()))
    }
}
