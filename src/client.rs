use crate::auth::Authenticator;
use crate::config::ApiConfig;
use crate::error::{GhostError, Result};
use crate::request::{HttpRequest, Method, RequestBody};
use crate::response::Params;
use crate::transport::{RawResponse, Transport};
use crate::upload::UploadFile;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Shared request path for one API surface.
///
/// Every operation goes through [`Client::execute`], which applies the
/// authenticator, sets `Accept-Version` (and `Content-Type` for JSON
/// bodies), sends the request and maps the response.
#[derive(Clone)]
pub struct Client {
    config: Arc<ApiConfig>,
    authenticator: Arc<dyn Authenticator>,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(
        config: ApiConfig,
        authenticator: impl Authenticator + 'static,
        transport: impl Transport + 'static,
    ) -> Self {
        Client {
            config: Arc::new(config),
            authenticator: Arc::new(authenticator),
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET with query parameters
    pub fn get(&self, url: &str, params: &Params) -> Result<Value> {
        let mut request = HttpRequest::new(Method::Get, url);
        for (name, value) in params {
            if let Some(value) = query_value(value) {
                request.query.push((name.clone(), value));
            }
        }
        self.execute(request)
    }

    /// POST a JSON body
    pub fn post(&self, url: &str, body: Value) -> Result<Value> {
        let mut request = HttpRequest::new(Method::Post, url);
        request.body = Some(RequestBody::Json(body));
        self.execute(request)
    }

    /// PUT a JSON body
    pub fn put(&self, url: &str, body: Value) -> Result<Value> {
        let mut request = HttpRequest::new(Method::Put, url);
        request.body = Some(RequestBody::Json(body));
        self.execute(request)
    }

    pub fn delete(&self, url: &str) -> Result<Value> {
        self.execute(HttpRequest::new(Method::Delete, url))
    }

    /// POST a multipart form with a `file` part and an optional `ref` field
    pub fn upload(&self, url: &str, file: UploadFile, reference: Option<String>) -> Result<Value> {
        let mut request = HttpRequest::new(Method::Post, url);
        request.body = Some(RequestBody::Multipart { file, reference });
        self.execute(request)
    }

    /// Authenticate, send and decode a request
    pub fn execute(&self, mut request: HttpRequest) -> Result<Value> {
        self.authenticator.apply(&mut request)?;
        request.set_header("Accept-Version", self.config.version());
        if matches!(request.body, Some(RequestBody::Json(_))) {
            request.set_header("Content-Type", "application/json");
        }

        let method = request.method;
        let url = request.url.clone();

        let start = Instant::now();
        let response = self.transport.send(request)?;
        debug!(
            %method,
            %url,
            status = response.status,
            elapsed = ?start.elapsed(),
            "ghost api request"
        );

        handle_response(response)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Decode a response body, or map a failed response onto [`GhostError`].
///
/// An empty body decodes to an empty object. A failed response whose body is
/// not JSON is mapped as if the body were empty.
pub fn handle_response(response: RawResponse) -> Result<Value> {
    let is_blank = response.body.iter().all(u8::is_ascii_whitespace);

    if !response.is_success() {
        let body = if is_blank {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(&response.body).unwrap_or_else(|_| Value::Object(Map::new()))
        };
        return Err(GhostError::from_response(response.status, &body)
            .with_request_id(response.request_id));
    }

    if is_blank {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_slice(&response.body)?)
}

/// Render a parameter value for the query string; `null` is dropped.
fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}
