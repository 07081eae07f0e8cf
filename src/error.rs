use serde_json::Value;
use thiserror::Error;

/// Classification of an error reported by the Ghost server, keyed by HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400
    BadRequest,
    /// 401
    AuthenticationFailed,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 422
    Unprocessable,
    /// 500
    ServerError,
    /// Any other status
    Generic,
}

impl ErrorKind {
    /// Map an HTTP status code onto the taxonomy
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::AuthenticationFailed,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            422 => ErrorKind::Unprocessable,
            500 => ErrorKind::ServerError,
            _ => ErrorKind::Generic,
        }
    }
}

/// Main error type for Ghost API operations
#[derive(Debug, Error)]
pub enum GhostError {
    /// Error reported by the Ghost server
    #[error("{message}")]
    Api {
        kind: ErrorKind,
        message: String,
        /// Server-supplied error type, e.g. "ValidationError"
        error_type: Option<String>,
        /// Server-supplied context
        context: Option<Value>,
        status: u16,
        request_id: Option<String>,
    },

    /// Invalid client configuration or credential, detected at construction
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid arguments to an operation, detected before any request is sent
    #[error("{0}")]
    Usage(String),

    /// Network or HTTP client failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Admin token could not be signed
    #[error("token signing error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GhostError {
    /// Build a typed error from a failed response.
    ///
    /// `body` is the decoded response body, or an empty object when the body
    /// was missing or not JSON. Only the first entry of `errors` is used.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let kind = ErrorKind::from_status(status);

        match body
            .get("errors")
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
        {
            Some(err) => GhostError::Api {
                kind,
                message: err
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown error")
                    .to_string(),
                error_type: err.get("type").and_then(Value::as_str).map(str::to_string),
                context: err.get("context").filter(|c| !c.is_null()).cloned(),
                status,
                request_id: None,
            },
            None => GhostError::Api {
                kind,
                message: "Unknown error".to_string(),
                error_type: None,
                context: None,
                status,
                request_id: None,
            },
        }
    }

    pub(crate) fn with_request_id(mut self, id: Option<String>) -> Self {
        if let GhostError::Api { request_id, .. } = &mut self {
            *request_id = id;
        }
        self
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        GhostError::Config(message.into())
    }

    pub(crate) fn usage(message: impl Into<String>) -> Self {
        GhostError::Usage(message.into())
    }

    /// Server error kind, if this error came from the server
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            GhostError::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// True for caller mistakes raised before any network activity
    pub fn is_usage_error(&self) -> bool {
        matches!(self, GhostError::Config(_) | GhostError::Usage(_))
    }

    /// Check if this error is a permission denied error (403)
    pub fn is_permission_denied(&self) -> bool {
        self.kind() == Some(ErrorKind::Forbidden)
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::NotFound)
    }

    /// Get the HTTP status code if this is an API error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GhostError::Api { status, .. } => Some(*status),
            GhostError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for Ghost API operations
pub type Result<T> = std::result::Result<T, GhostError>;
