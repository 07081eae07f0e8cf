use crate::error::{GhostError, Result};
use std::fmt;
use url::Url;

/// API version sent in `Accept-Version` when none is given
pub const DEFAULT_VERSION: &str = "v5.0";

/// Which of the two Ghost REST surfaces a configuration targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiKind {
    /// Read-only, authenticated with a static key
    Content,
    /// Read-write, authenticated with signed tokens
    Admin,
}

impl ApiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKind::Content => "content",
            ApiKind::Admin => "admin",
        }
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated base configuration for one API surface.
///
/// Also serves as the endpoint builder: every URL the client requests is
/// derived from here. Path segments are inserted as given; reserved
/// characters are left to the transport's URL handling.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    url: String,
    version: String,
    kind: ApiKind,
}

impl ApiConfig {
    /// Validate and build a configuration.
    ///
    /// `key` is only checked for presence here; parsing it is the
    /// authenticator's job. A trailing slash on `url` is dropped.
    pub fn new(url: &str, version: &str, kind: ApiKind, key: &str) -> Result<Self> {
        let url = url.trim_end_matches('/');

        if url.is_empty() {
            return Err(GhostError::config("URL is required"));
        }
        if version.is_empty() {
            return Err(GhostError::config("Version is required"));
        }
        if key.is_empty() {
            return Err(GhostError::config("API key is required"));
        }

        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {}
            Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Err(GhostError::config("URL must include a protocol (https://)"))
            }
            Err(_) => return Err(GhostError::config(format!("Invalid URL: {}", url))),
        }

        Ok(ApiConfig {
            url: url.to_string(),
            version: version.to_string(),
            kind,
        })
    }

    /// Site URL without trailing slash
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kind(&self) -> ApiKind {
        self.kind
    }

    /// `{url}/ghost/api/{kind}`
    pub fn base_url(&self) -> String {
        format!("{}/ghost/api/{}", self.url, self.kind)
    }

    /// Collection URL: `{base}/{resource}/`
    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}/", self.base_url(), resource)
    }

    pub fn resource_id_url(&self, resource: &str, id: &str) -> String {
        format!("{}{}/", self.resource_url(resource), id)
    }

    pub fn resource_slug_url(&self, resource: &str, slug: &str) -> String {
        format!("{}slug/{}/", self.resource_url(resource), slug)
    }

    pub fn resource_email_url(&self, resource: &str, email: &str) -> String {
        format!("{}email/{}/", self.resource_url(resource), email)
    }

    pub fn upload_url(&self, resource: &str) -> String {
        format!("{}upload/", self.resource_url(resource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> ApiConfig {
        ApiConfig::new("https://demo.ghost.io", "v5.0", ApiKind::Content, "abc123").unwrap()
    }

    #[test]
    fn test_accepts_valid_parameters() {
        let config = content();
        assert_eq!(config.url(), "https://demo.ghost.io");
        assert_eq!(config.version(), "v5.0");
        assert_eq!(config.kind(), ApiKind::Content);
    }

    #[test]
    fn test_strips_trailing_slash() {
        let config =
            ApiConfig::new("https://demo.ghost.io/", "v5.0", ApiKind::Content, "abc123").unwrap();
        assert_eq!(config.url(), "https://demo.ghost.io");
    }

    #[test]
    fn test_validation_messages() {
        let cases = [
            ("", "v5.0", "abc", "configuration error: URL is required"),
            ("https://demo.ghost.io", "", "abc", "configuration error: Version is required"),
            ("https://demo.ghost.io", "v5.0", "", "configuration error: API key is required"),
            (
                "demo.ghost.io",
                "v5.0",
                "abc",
                "configuration error: URL must include a protocol (https://)",
            ),
            (
                "ftp://demo.ghost.io",
                "v5.0",
                "abc",
                "configuration error: URL must include a protocol (https://)",
            ),
        ];

        for (url, version, key, expected) in cases {
            let err = ApiConfig::new(url, version, ApiKind::Content, key).unwrap_err();
            assert!(err.is_usage_error());
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_base_urls() {
        assert_eq!(content().base_url(), "https://demo.ghost.io/ghost/api/content");

        let admin = ApiConfig::new("https://demo.ghost.io", "v5.0", ApiKind::Admin, "a:b").unwrap();
        assert_eq!(admin.base_url(), "https://demo.ghost.io/ghost/api/admin");
    }

    #[test]
    fn test_resource_urls() {
        let config = content();
        assert_eq!(
            config.resource_url("posts"),
            "https://demo.ghost.io/ghost/api/content/posts/"
        );
        assert_eq!(
            config.resource_id_url("posts", "abc123"),
            "https://demo.ghost.io/ghost/api/content/posts/abc123/"
        );
        assert_eq!(
            config.resource_slug_url("posts", "hello-world"),
            "https://demo.ghost.io/ghost/api/content/posts/slug/hello-world/"
        );
        assert_eq!(
            config.resource_email_url("members", "test@example.com"),
            "https://demo.ghost.io/ghost/api/content/members/email/test@example.com/"
        );
        assert_eq!(
            config.upload_url("images"),
            "https://demo.ghost.io/ghost/api/content/images/upload/"
        );
    }
}
