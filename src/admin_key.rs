use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::auth::Authenticator;
use crate::error::{GhostError, Result};
use crate::request::HttpRequest;
use crate::time::{to_datetime, Clock, SystemClock};

/// Lifetime of a generated token in seconds
pub const TOKEN_LIFETIME: i64 = 300;
/// A cached token is replaced once it is this close to expiry
pub const RENEWAL_BUFFER: i64 = 60;
/// `aud` claim expected by the Admin API
pub const AUDIENCE: &str = "/admin/";

/// Claims carried by an Admin API token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iat: i64,
    pub exp: i64,
    pub aud: String,
}

/// A signed token and its validity window. Replaced wholesale on renewal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    token: String,
    issued_at: i64,
    expires_at: i64,
}

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Unix seconds
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Unix seconds
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.expires_at)
    }

    fn needs_renewal(&self, now: i64) -> bool {
        now >= self.expires_at - RENEWAL_BUFFER
    }
}

/// Admin API key (`{id}:{hex secret}`), sent as `Authorization: Ghost {token}`.
///
/// Tokens are HS256 JWTs signed with the decoded secret, carrying the key id
/// as `kid`. A token is generated on first use and reused until it is within
/// [`RENEWAL_BUFFER`] seconds of expiry. The cache is behind a mutex so a
/// key can be shared between threads.
pub struct AdminKey {
    /// Key identifier, sent as the `kid` header
    pub key_id: String,
    secret: Vec<u8>,
    cache: Mutex<Option<SignedToken>>,
    clock: Arc<dyn Clock>,
}

impl AdminKey {
    /// Parse an Admin API key of the form `{id}:{secret}`, where the secret is hex encoded.
    pub fn new(key: &str) -> Result<Self> {
        let parts: Vec<&str> = key.split(':').collect();
        let (id, secret) = match parts.as_slice() {
            [id, secret] if !id.is_empty() && !secret.is_empty() => (*id, *secret),
            _ => {
                return Err(GhostError::config(
                    "Admin API key must be in format {id}:{secret}",
                ))
            }
        };

        let secret = hex::decode(secret).map_err(|e| {
            GhostError::config(format!("Admin API key secret must be hex encoded: {}", e))
        })?;

        Ok(AdminKey {
            key_id: id.to_string(),
            secret,
            cache: Mutex::new(None),
            clock: Arc::new(SystemClock),
        })
    }

    /// Read time from `clock` instead of the system clock
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Return the cached token, generating a new one when absent or due for renewal
    pub fn token(&self) -> Result<SignedToken> {
        let now = self.clock.now();
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(token) = cache.as_ref() {
            if !token.needs_renewal(now) {
                return Ok(token.clone());
            }
        }

        let token = self.generate(now)?;
        *cache = Some(token.clone());
        Ok(token)
    }

    fn generate(&self, now: i64) -> Result<SignedToken> {
        let claims = Claims {
            iat: now,
            exp: now + TOKEN_LIFETIME,
            aud: AUDIENCE.to_string(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(self.key_id.clone());

        let token = encode(&header, &claims, &EncodingKey::from_secret(&self.secret))?;

        debug!(kid = %self.key_id, exp = claims.exp, "generated admin API token");

        Ok(SignedToken {
            token,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

impl Authenticator for AdminKey {
    fn apply(&self, request: &mut HttpRequest) -> Result<()> {
        let token = self.token()?;
        request.set_header("Authorization", format!("Ghost {}", token.as_str()));
        Ok(())
    }
}

// Implement Debug manually to avoid exposing the secret
impl std::fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminKey")
            .field("key_id", &self.key_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;
    use crate::time::ManualClock;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    const ID: &str = "6489e4a3b35e12d07a";
    const SECRET: &str = "93fa25c8b293fa25c8b293fa25c8b293fa25c8b293fa25c8b293fa25c8b293fa";

    fn key_at(clock: &Arc<ManualClock>) -> AdminKey {
        AdminKey::new(&format!("{}:{}", ID, SECRET))
            .unwrap()
            .with_clock(clock.clone())
    }

    #[test]
    fn test_rejects_malformed_keys() {
        for key in ["invalid-key", "onlyid", "a:b:c", ":abcd", "abcd:"] {
            let err = AdminKey::new(key).unwrap_err();
            assert!(err.is_usage_error(), "{}", key);
            assert!(err.to_string().contains("Admin API key must be in format"));
        }
    }

    #[test]
    fn test_rejects_non_hex_secret() {
        let err = AdminKey::new("id:not-hex").unwrap_err();
        assert!(matches!(err, GhostError::Config(_)));
    }

    #[test]
    fn test_sets_ghost_authorization_header() {
        let key = AdminKey::new(&format!("{}:{}", ID, SECRET)).unwrap();
        let mut request = HttpRequest::new(Method::Get, "https://demo.ghost.io/ghost/api/admin/posts/");

        key.apply(&mut request).unwrap();

        let header = request.header("Authorization").unwrap();
        assert!(header.starts_with("Ghost "));
        assert!(header.len() > "Ghost ".len());
        assert_eq!(request.query_param("key"), None);
    }

    #[test]
    fn test_token_verifies_with_secret() {
        let clock = Arc::new(ManualClock::new(chrono::Utc::now().timestamp()));
        let key = key_at(&clock);
        let token = key.token().unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUDIENCE]);
        let decoded = decode::<Claims>(
            token.as_str(),
            &DecodingKey::from_secret(&hex::decode(SECRET).unwrap()),
            &validation,
        )
        .unwrap();

        assert_eq!(decoded.header.kid.as_deref(), Some(ID));
        assert_eq!(decoded.header.alg, Algorithm::HS256);
        assert_eq!(decoded.claims.aud, "/admin/");
        assert_eq!(decoded.claims.exp - decoded.claims.iat, TOKEN_LIFETIME);
    }

    #[test]
    fn test_token_reused_inside_renewal_window() {
        let clock = Arc::new(ManualClock::new(1_700_000_000));
        let key = key_at(&clock);

        let first = key.token().unwrap();
        clock.advance(TOKEN_LIFETIME - RENEWAL_BUFFER - 1);
        let second = key.token().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_token_renewed_at_boundary() {
        let clock = Arc::new(ManualClock::new(1_700_000_000));
        let key = key_at(&clock);

        let first = key.token().unwrap();
        clock.advance(TOKEN_LIFETIME - RENEWAL_BUFFER);
        let second = key.token().unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(second.expires_at() > first.expires_at());
        assert_eq!(second.issued_at(), 1_700_000_240);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = AdminKey::new(&format!("{}:{}", ID, SECRET)).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains(ID));
        assert!(!debug.contains(SECRET));
    }
}
