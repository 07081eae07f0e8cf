use crate::auth::Authenticator;
use crate::error::{GhostError, Result};
use crate::request::HttpRequest;

/// Content API key, sent as the `key` query parameter on every request.
#[derive(Clone)]
pub struct ContentKey {
    key: String,
}

impl ContentKey {
    /// Create a new ContentKey. The key must not be empty.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(GhostError::config("API key is required"));
        }
        Ok(ContentKey { key })
    }
}

impl Authenticator for ContentKey {
    fn apply(&self, request: &mut HttpRequest) -> Result<()> {
        request.set_query("key", self.key.clone());
        Ok(())
    }
}

// Implement Debug manually to avoid exposing the key
impl std::fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentKey").field("key", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    #[test]
    fn test_adds_key_query_param() {
        let key = ContentKey::new("abc123").unwrap();
        let mut request = HttpRequest::new(Method::Get, "https://demo.ghost.io/ghost/api/content/posts/");
        request.set_query("limit", "3");

        key.apply(&mut request).unwrap();

        assert_eq!(request.query_param("key"), Some("abc123"));
        assert_eq!(request.query_param("limit"), Some("3"));
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let key = ContentKey::new("abc123").unwrap();
        let mut request = HttpRequest::new(Method::Get, "https://demo.ghost.io/");

        key.apply(&mut request).unwrap();
        key.apply(&mut request).unwrap();

        assert_eq!(request.query.len(), 1);
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(ContentKey::new("").unwrap_err().is_usage_error());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = ContentKey::new("very-secret").unwrap();
        assert!(!format!("{:?}", key).contains("very-secret"));
    }
}
