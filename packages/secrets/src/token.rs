// ABOUTME: Token entity stored once per account
// ABOUTME: Holds the refresh token, cached access token, service scoping and timestamps

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;
use std::fmt;

/// Cached access tokens closer than this to expiry are treated as expired
pub const ACCESS_TOKEN_EXPIRY_BUFFER_MINUTES: i64 = 5;

/// Stored credential for one account
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub account: String,
    pub services: BTreeSet<String>,
    pub refresh_token: String,
    pub access_token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Token {
    /// New token with no cached access token, created now
    pub fn new(account: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            services: BTreeSet::new(),
            refresh_token: refresh_token.into(),
            access_token: None,
            expiry: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_access_token(
        mut self,
        access_token: impl Into<String>,
        expiry: Option<DateTime<Utc>>,
    ) -> Self {
        self.access_token = Some(access_token.into());
        self.expiry = expiry;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// A record without a refresh token cannot mint access tokens
    pub fn is_usable(&self) -> bool {
        !self.refresh_token.trim().is_empty()
    }

    /// Check if the cached access token is missing or expired (with 5 minute buffer)
    pub fn is_access_token_expired(&self) -> bool {
        match (&self.access_token, self.expiry) {
            (Some(_), Some(expiry)) => {
                let buffer = Duration::minutes(ACCESS_TOKEN_EXPIRY_BUFFER_MINUTES);
                expiry < Utc::now() + buffer
            }
            _ => true,
        }
    }

    /// Cached access token, if still fresh
    pub fn fresh_access_token(&self) -> Option<&str> {
        if self.is_access_token_expired() {
            None
        } else {
            self.access_token.as_deref()
        }
    }
}

// Secrets never reach logs or panic messages
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("account", &self.account)
            .field("services", &self.services)
            .field("refresh_token", &"[REDACTED]")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expiry", &self.expiry)
            .field("created_at", &self.created_at)
            .finish()
    }
}
