// Request params and auth types for the Deribit API
use std::fmt;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// API key pair used for the `client_credentials` grant
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read `DERIBIT_CLIENT_ID` and `DERIBIT_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var("DERIBIT_CLIENT_ID")
            .map_err(|_| anyhow!("Missing DERIBIT_CLIENT_ID"))?;
        let client_secret = std::env::var("DERIBIT_CLIENT_SECRET")
            .map_err(|_| anyhow!("Missing DERIBIT_CLIENT_SECRET"))?;
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            return Err(anyhow!("DERIBIT_CLIENT_ID and DERIBIT_CLIENT_SECRET must not be empty"));
        }
        Ok(Self::new(client_id, client_secret))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Bearer token returned by `public/auth`. Valid for the process lifetime.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Debug, Serialize)]
pub struct AuthParams<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub scope: &'a str,
}

impl<'a> AuthParams<'a> {
    pub fn client_credentials(credentials: &'a Credentials, scope: &'a str) -> Self {
        Self {
            grant_type: "client_credentials",
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            scope,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthResult {
    pub access_token: AccessToken,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InstrumentsParams<'a> {
    pub currency: &'a str,
    pub kind: &'a str,
}

#[derive(Debug, Serialize)]
pub struct InstrumentNameParams<'a> {
    pub instrument_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct OrderBookParams<'a> {
    pub instrument_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct OrderIdParams<'a> {
    pub order_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CurrencyParams<'a> {
    pub currency: &'a str,
}
