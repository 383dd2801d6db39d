//! Request execution: build, send, interpret.

use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::{
    credentials::Credentials,
    request::{ApiRequest, HttpMethod},
    response::NormalizedResponse,
    transport::Transport,
    Error,
};

/// Executes authenticated calls against the service.
///
/// Each call yields either the raw 2xx body or exactly one error.
#[derive(Clone)]
pub struct Connector {
    credentials: Credentials,
    transport: Arc<dyn Transport>,
}

impl Connector {
    pub fn new(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub async fn process<T>(
        &self,
        method: HttpMethod,
        url: Url,
        payload: Option<&T>,
    ) -> Result<String, Error>
    where
        T: Serialize + ?Sized,
    {
        let request = ApiRequest::build(method, url, payload, &self.credentials)?;
        tracing::debug!(
            merchant_id = self.credentials.merchant_id(),
            "{} {}",
            request.method(),
            request.url()
        );

        let raw = self.transport.execute(&request).await?;
        let response = NormalizedResponse::from_raw(raw);
        tracing::debug!(status = response.status(), "Received response");

        response.into_result().map_err(|e| {
            tracing::warn!(
                status = e.status(),
                category = e.category(),
                code = e.code(),
                "Request failed: {}",
                truncate_body(e.message())
            );
            Error::Api(e)
        })
    }
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::header::AUTHORIZATION;
    use secrecy::SecretString;

    use super::*;
    use crate::{
        errors::{ErrorKind, TransportError},
        transport::RawResponse,
    };

    struct Canned {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<ApiRequest>>,
    }

    impl Canned {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for Canned {
        async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(RawResponse {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn execute(&self, _request: &ApiRequest) -> Result<RawResponse, TransportError> {
            Err(TransportError::Connect("connection refused".to_string()))
        }
    }

    fn connector(transport: Arc<dyn Transport>) -> Connector {
        let creds = Credentials::new(300200578, &SecretString::from("4BaD82D9197b4cc4b70a221911eE9f70"));
        Connector::new(creds, transport)
    }

    fn url() -> Url {
        Url::parse("https://www.beanstream.com/api/v1/payments/1").unwrap()
    }

    #[tokio::test]
    async fn success_returns_raw_body() {
        let transport = Canned::new(200, r#"{"id":"1"}"#);
        let body = connector(transport.clone())
            .process::<()>(HttpMethod::Get, url(), None)
            .await
            .unwrap();
        assert_eq!(body, r#"{"id":"1"}"#);

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].headers().contains_key(AUTHORIZATION));
    }

    #[tokio::test]
    async fn failure_is_mapped() {
        let transport = Canned::new(400, r#"{"category":3,"code":52,"message":"Insufficient funds"}"#);
        let err = connector(transport)
            .process::<()>(HttpMethod::Get, url(), None)
            .await
            .unwrap_err();
        let api = err.as_api_error().unwrap();
        assert_eq!(api.kind(), ErrorKind::InvalidRequest);
        assert!(api.is_user_error());
    }

    #[tokio::test]
    async fn transport_failure_has_no_category() {
        let err = connector(Arc::new(Unreachable))
            .process::<()>(HttpMethod::Get, url(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Connect(_))));
        assert!(err.as_api_error().is_none());
    }

    #[test]
    fn truncates_long_bodies() {
        let long = "é".repeat(1500);
        let out = truncate_body(&long);
        assert!(out.ends_with("...[truncated]"));
        assert_eq!(truncate_body("short"), "short");
    }
}
