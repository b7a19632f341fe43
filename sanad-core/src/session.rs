//! Guest session tokens.
//!
//! A guest token is a random identifier used to correlate one browser-like
//! session across requests. It is NOT a credential: there is no cryptographic
//! or server-side verification. Tokens are created when the user starts the
//! application and rotated after a successful submission.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::wizard::kv::KvStore;

/// Key holding the current guest token.
pub const TOKEN_KEY: &str = "auth-token";

/// Key holding the RFC 3339 creation time of the current token.
pub const TOKEN_CREATED_AT_KEY: &str = "token-created-at";

/// Everything known about the current token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub token: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Guest token manager over the same kv store the wizard persists into.
pub struct GuestSession {
    kv: Arc<dyn KvStore>,
}

impl GuestSession {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    fn mint() -> String {
        format!("guest_{}", Uuid::new_v4())
    }

    /// Return the current token, creating one if none exists.
    pub fn get_or_create(&self) -> Result<String> {
        if let Some(token) = self.kv.get(TOKEN_KEY)? {
            return Ok(token);
        }
        let token = Self::mint();
        self.kv.set(TOKEN_KEY, &token)?;
        self.kv.set(TOKEN_CREATED_AT_KEY, &Utc::now().to_rfc3339())?;
        Ok(token)
    }

    /// Rotate the token. Called after a successful submission so the next
    /// application starts with a fresh session identity.
    pub fn refresh(&self) -> Result<String> {
        let token = Self::mint();
        self.kv.set(TOKEN_KEY, &token)?;
        self.kv.set(TOKEN_CREATED_AT_KEY, &Utc::now().to_rfc3339())?;
        Ok(token)
    }

    /// Remove the token entirely.
    pub fn clear(&self) -> Result<()> {
        self.kv.remove(TOKEN_KEY)?;
        self.kv.remove(TOKEN_CREATED_AT_KEY)?;
        Ok(())
    }

    /// Current token and its age, if one exists.
    pub fn info(&self) -> Result<Option<TokenInfo>> {
        let Some(token) = self.kv.get(TOKEN_KEY)? else {
            return Ok(None);
        };
        let created_at = self
            .kv
            .get(TOKEN_CREATED_AT_KEY)?
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&Utc));
        Ok(Some(TokenInfo { token, created_at }))
    }
}
