use crate::error::Result;
use crate::request::{HttpRequest, RequestBody};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Status, body and request id of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
    /// X-Request-Id header, if the server sent one
    pub request_id: Option<String>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a fully prepared request.
///
/// Implementations must not retry and must not interpret the status code;
/// network failures are returned as errors, every HTTP response as `Ok`.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: HttpRequest) -> Result<RawResponse> {
        (**self).send(request)
    }
}

/// Build the HTTP client for API requests
/// with settings for connection pooling and timeouts
pub fn create_rest_client() -> reqwest::Result<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(Duration::from_secs(300)) // 5 minutes
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// Build the HTTP client for upload requests with longer timeout
pub fn create_upload_client() -> reqwest::Result<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(Duration::from_secs(3600)) // 1 hour
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// [`Transport`] backed by blocking reqwest clients
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    upload_client: Client,
}

impl HttpTransport {
    pub fn try_new() -> Result<Self> {
        Ok(HttpTransport {
            client: create_rest_client()?,
            upload_client: create_upload_client()?,
        })
    }

    /// Use caller-configured clients, e.g. for proxies or custom timeouts
    pub fn with_clients(client: Client, upload_client: Client) -> Self {
        HttpTransport {
            client,
            upload_client,
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: HttpRequest) -> Result<RawResponse> {
        let mut url = Url::parse(&request.url)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        let client = match request.body {
            Some(RequestBody::Multipart { .. }) => &self.upload_client,
            _ => &self.client,
        };

        let mut builder = client.request(request.method.into(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            Some(RequestBody::Json(value)) => builder.body(serde_json::to_vec(&value)?),
            Some(RequestBody::Multipart { file, reference }) => {
                let part = Part::bytes(file.content)
                    .file_name(file.file_name)
                    .mime_str(&file.mime_type)?;
                let mut form = Form::new().part("file", part);
                if let Some(reference) = reference {
                    form = form.text("ref", reference);
                }
                builder.multipart(form)
            }
            None => builder,
        };

        let response = builder.send()?;
        let status = response.status().as_u16();
        let request_id = response
            .headers()
            .get("X-Request-Id")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response.bytes()?.to_vec();

        Ok(RawResponse {
            status,
            body,
            request_id,
        })
    }
}
