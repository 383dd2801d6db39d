//! Normalization of raw HTTP responses.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use crate::{
    errors::{ApiError, FieldError},
    mapping::map_error,
    transport::RawResponse,
};

/// The structured body the service sends with most failing responses.
///
/// Only `category`, `code` and `message` are required. A `null` or
/// mistyped `reference` or `details` falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorEnvelope {
    pub category: i32,
    pub code: i32,
    pub message: String,
    #[serde(default, deserialize_with = "lenient")]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub details: Vec<FieldError>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

impl ErrorEnvelope {
    /// Parses an error body. Returns `None` for empty, malformed or incomplete bodies.
    pub fn parse(body: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                tracing::debug!("Error body is not a service envelope: {}", e);
                None
            }
        }
    }
}

/// One response, normalized. Built fresh for every call.
#[derive(Debug)]
pub struct NormalizedResponse {
    status: u16,
    body: String,
    envelope: Option<ErrorEnvelope>,
}

impl NormalizedResponse {
    pub fn from_raw(raw: RawResponse) -> Self {
        let envelope = if is_success(raw.status) {
            None
        } else {
            ErrorEnvelope::parse(&raw.body)
        };
        Self {
            status: raw.status,
            body: raw.body,
            envelope,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        self.envelope.as_ref()
    }

    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    /// Hands back the untouched body on 2xx, or the mapped error otherwise.
    pub fn into_result(self) -> Result<String, ApiError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(map_error(self.status, self.envelope))
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
