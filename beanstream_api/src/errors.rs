//! Error types for the API client.

use std::fmt;

/// Category/code value used when the service did not send a readable error envelope.
pub const UNKNOWN_CATEGORY: i32 = -1;
/// See [`UNKNOWN_CATEGORY`].
pub const UNKNOWN_CODE: i32 = -1;

/// Message returned by [`ApiError::user_facing_message`] for developer-facing errors.
pub const GENERIC_USER_MESSAGE: &str =
    "An error occurred while processing your payment. Please try again or use another card.";

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A call-level argument failed a local check. No request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// No HTTP response was obtained (connect failure, timeout, unreadable body).
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The service answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The request payload could not be encoded as JSON.
    #[error("Failed to serialize request payload: {0}")]
    Serialization(#[source] serde_json::Error),
    /// A success body could not be decoded into the expected type.
    #[error("Failed to parse response body: {source}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    /// The configuration cannot produce a usable request.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Returns the mapped service error, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Connectivity failures. These carry no category/code.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Failed to read response body: {0}")]
    Body(String),
    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if e.is_body() || e.is_decode() {
            Self::Body(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// Concrete kind of a mapped service error, selected by HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400: missing or incorrect parameters, wrong method, unsupported content type.
    InvalidRequest,
    /// 401 or 403: bad merchant id or passcode, or the passcode lacks access.
    Unauthorized,
    /// 404
    NotFound,
    /// 5xx. Safe for the caller to retry.
    ServerError,
    /// Any other non-success status.
    Unmapped,
}

impl ErrorKind {
    /// Kind for an HTTP status. Category and code play no part.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::InvalidRequest,
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound,
            500..=599 => Self::ServerError,
            _ => Self::Unmapped,
        }
    }

    /// Category/code pairs that this kind reports as user-facing.
    pub fn user_facing_rules(self) -> &'static [UserFacingRule] {
        match self {
            Self::InvalidRequest => INVALID_REQUEST_USER_FACING,
            Self::Unauthorized | Self::NotFound | Self::ServerError | Self::Unmapped => &[],
        }
    }

    /// True for 5xx kinds.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::ServerError)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidRequest => "invalid request",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not found",
            Self::ServerError => "server error",
            Self::Unmapped => "unexpected response",
        };
        f.write_str(s)
    }
}

/// A category/code pattern. `code: None` matches every code in the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFacingRule {
    pub category: i32,
    /// `None` matches any code.
    pub code: Option<i32>,
}

impl UserFacingRule {
    /// Whether this rule covers the category/code pair.
    pub fn matches(&self, category: i32, code: i32) -> bool {
        self.category == category && self.code.map_or(true, |c| c == code)
    }
}

// 3/52 is the cardholder-facing "insufficient funds" condition.
const INVALID_REQUEST_USER_FACING: &[UserFacingRule] = &[
    UserFacingRule {
        category: 1,
        code: None,
    },
    UserFacingRule {
        category: 3,
        code: Some(52),
    },
];

/// Who a service error message is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Safe to show to the cardholder.
    User,
    /// Diagnostic text for the integrating developer only.
    Developer,
}

/// A field-level validation failure reported alongside an error envelope.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct FieldError {
    /// Field path, e.g. `card:number`.
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub message: String,
}

/// A non-success response translated into a typed error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (HTTP {status}, category {category}, code {code}): {message}")]
pub struct ApiError {
    pub(crate) kind: ErrorKind,
    pub(crate) status: u16,
    pub(crate) category: i32,
    pub(crate) code: i32,
    pub(crate) message: String,
    pub(crate) reference: Option<String>,
    pub(crate) details: Vec<FieldError>,
    pub(crate) audience: Audience,
    pub(crate) has_envelope: bool,
}

impl ApiError {
    /// Kind selected by the HTTP status.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status of the response this error was built from.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Category from the envelope, or [`UNKNOWN_CATEGORY`].
    pub fn category(&self) -> i32 {
        self.category
    }

    /// Code from the envelope, or [`UNKNOWN_CODE`].
    pub fn code(&self) -> i32 {
        self.code
    }

    /// The message as sent by the service (or derived from the status).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Service reference for the failure, when sent.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Field-level validation failures, possibly empty.
    pub fn details(&self) -> &[FieldError] {
        &self.details
    }

    /// Who the service message is meant for.
    pub fn audience(&self) -> Audience {
        self.audience
    }

    /// Shorthand for `audience() == Audience::User`.
    pub fn is_user_error(&self) -> bool {
        self.audience == Audience::User
    }

    /// Text that can be shown to an end customer.
    ///
    /// User-facing errors return the service message verbatim. Everything
    /// else returns [`GENERIC_USER_MESSAGE`] so diagnostic text never reaches
    /// a cardholder.
    pub fn user_facing_message(&self) -> &str {
        match self.audience {
            Audience::User => &self.message,
            Audience::Developer => GENERIC_USER_MESSAGE,
        }
    }

    /// Whether the kind is safe to retry.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Whether the service sent a readable error envelope.
    pub fn has_envelope(&self) -> bool {
        self.has_envelope
    }
}
