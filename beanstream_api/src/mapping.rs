//! Translation of failing responses into [`ApiError`] values.

use reqwest::StatusCode;

use crate::{
    errors::{ApiError, Audience, ErrorKind, UNKNOWN_CATEGORY, UNKNOWN_CODE},
    response::ErrorEnvelope,
};

/// Builds the typed error for a non-success status.
///
/// The kind depends on the status alone. The audience comes from the kind's
/// user-facing rule table, applied to the category/code pair. Without an
/// envelope the pair is set to the unknown sentinels and the message is
/// derived from the status.
pub fn map_error(status: u16, envelope: Option<ErrorEnvelope>) -> ApiError {
    let kind = ErrorKind::from_status(status);
    let has_envelope = envelope.is_some();
    let (category, code, message, reference, details) = match envelope {
        Some(e) => (e.category, e.code, e.message, e.reference, e.details),
        None => (
            UNKNOWN_CATEGORY,
            UNKNOWN_CODE,
            status_message(status),
            None,
            Vec::new(),
        ),
    };
    let audience = classify(kind, category, code);

    ApiError {
        kind,
        status,
        category,
        code,
        message,
        reference,
        details,
        audience,
        has_envelope,
    }
}

/// Builds a 400-equivalent error for requests rejected before they were sent.
pub(crate) fn invalid_request(message: &str) -> ApiError {
    map_error(StatusCode::BAD_REQUEST.as_u16(), None).with_message(message)
}

fn classify(kind: ErrorKind, category: i32, code: i32) -> Audience {
    let rules = kind.user_facing_rules();
    if rules.iter().any(|r| r.matches(category, code)) {
        return Audience::User;
    }
    if kind == ErrorKind::InvalidRequest && category != UNKNOWN_CATEGORY {
        tracing::debug!(
            category,
            code,
            "Unclassified category/code pair, treating as developer-facing"
        );
    }
    Audience::Developer
}

fn status_message(status: u16) -> String {
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(reason) => format!("HTTP {} {}", status, reason),
        None => format!("HTTP {}", status),
    }
}

impl ApiError {
    fn with_message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GENERIC_USER_MESSAGE;

    fn envelope(category: i32, code: i32, message: &str) -> Option<ErrorEnvelope> {
        Some(ErrorEnvelope {
            category,
            code,
            message: message.to_string(),
            reference: None,
            details: Vec::new(),
        })
    }

    #[test]
    fn category_one_is_user_facing() {
        let err = map_error(400, envelope(1, 0, "bad card"));
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert!(err.is_user_error());
        assert_eq!(err.user_facing_message(), "bad card");
    }

    #[test]
    fn mapping_is_deterministic() {
        let a = map_error(400, envelope(1, 0, "bad card"));
        let b = map_error(400, envelope(1, 0, "bad card"));
        assert_eq!(a, b);
    }

    #[test]
    fn insufficient_funds_is_user_facing() {
        let err = map_error(400, envelope(3, 52, "Insufficient funds"));
        assert_eq!(err.audience(), Audience::User);
        assert_eq!(err.user_facing_message(), "Insufficient funds");
    }

    #[test]
    fn neighbouring_code_is_developer_facing() {
        let err = map_error(400, envelope(3, 51, "Merchant account misconfigured"));
        assert_eq!(err.audience(), Audience::Developer);
        assert_eq!(err.user_facing_message(), GENERIC_USER_MESSAGE);
        assert_ne!(err.user_facing_message(), err.message());
        assert_eq!(err.message(), "Merchant account misconfigured");
    }

    #[test]
    fn auth_errors_never_user_facing() {
        for status in [401, 403] {
            for (category, code) in [(1, 0), (3, 52), (2, 7)] {
                let err = map_error(status, envelope(category, code, "Authentication failed"));
                assert_eq!(err.kind(), ErrorKind::Unauthorized);
                assert!(!err.is_user_error());
                assert_eq!(err.user_facing_message(), GENERIC_USER_MESSAGE);
            }
        }
    }

    #[test]
    fn server_error_without_envelope() {
        let err = map_error(500, None);
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(err.category(), UNKNOWN_CATEGORY);
        assert_eq!(err.code(), UNKNOWN_CODE);
        assert_eq!(err.message(), "HTTP 500 Internal Server Error");
        assert!(err.is_retryable());
        assert!(!err.is_user_error());
    }

    #[test]
    fn unknown_status_keeps_raw_status() {
        let err = map_error(499, None);
        assert_eq!(err.kind(), ErrorKind::Unmapped);
        assert_eq!(err.status(), 499);
        assert_eq!(err.message(), "HTTP 499");
    }

    #[test]
    fn not_found_is_developer_facing() {
        let err = map_error(404, envelope(1, 0, "not here"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!err.is_user_error());
    }

    #[test]
    fn envelope_extras_are_carried() {
        let err = map_error(
            400,
            Some(ErrorEnvelope {
                category: 3,
                code: 314,
                message: "Missing or invalid payment information".to_string(),
                reference: Some("ref-1".to_string()),
                details: vec![crate::errors::FieldError {
                    field: "card:number".to_string(),
                    message: "Invalid card number".to_string(),
                }],
            }),
        );
        assert_eq!(err.reference(), Some("ref-1"));
        assert_eq!(err.details().len(), 1);
    }

    #[test]
    fn sentinel_pair_sent_by_the_service_still_counts_as_an_envelope() {
        let err = map_error(400, envelope(UNKNOWN_CATEGORY, UNKNOWN_CODE, "odd"));
        assert!(err.has_envelope());
        assert_eq!(err.message(), "odd");
        assert!(!map_error(400, None).has_envelope());
    }

    #[test]
    fn locally_rejected_request_looks_like_a_400() {
        let err = invalid_request("invalid payment request");
        assert_eq!(err.status(), 400);
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(err.message(), "invalid payment request");
        assert!(!err.has_envelope());
    }
}
