//! Passcode authorization.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::Error;

/// Scheme prefix of the `Authorization` header.
pub const PASSCODE_SCHEME: &str = "Passcode";

/// Encodes `merchant_id:passcode` for the `Authorization` header.
///
/// The passcode is trimmed first. Line breaks are stripped from the output
/// since a wrapped token would corrupt the header.
pub fn encode_passcode(merchant_id: u32, passcode: &str) -> String {
    let raw = format!("{}:{}", merchant_id, passcode.trim());
    STANDARD
        .encode(raw.as_bytes())
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect()
}

/// A derived credential. Rebuilt whenever the merchant id or passcode changes.
#[derive(Clone)]
pub struct Credentials {
    merchant_id: u32,
    token: SecretString,
}

impl Credentials {
    pub fn new(merchant_id: u32, passcode: &SecretString) -> Self {
        Self {
            merchant_id,
            token: SecretString::from(encode_passcode(merchant_id, passcode.expose_secret())),
        }
    }

    pub fn merchant_id(&self) -> u32 {
        self.merchant_id
    }

    /// The full `Authorization` header value, `Passcode <token>`.
    pub fn authorization_header(&self) -> Result<HeaderValue, Error> {
        let mut value =
            HeaderValue::from_str(&format!("{} {}", PASSCODE_SCHEME, self.token.expose_secret()))
                .map_err(|e| {
                    tracing::error!("Invalid authorization header: {}", e);
                    Error::Configuration("passcode produced an invalid header value".to_string())
                })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_id", &self.merchant_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
