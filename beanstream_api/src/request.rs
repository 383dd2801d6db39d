//! Construction of authenticated requests.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use url::Url;

use crate::{credentials::Credentials, Error};

/// Methods the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully built request, ready for a [`Transport`](crate::Transport).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: HttpMethod,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl ApiRequest {
    /// Builds a request and attaches the JSON content type and passcode headers.
    ///
    /// `Get` and `Delete` never carry a body. For `Post` and `Put` the payload
    /// is serialized to JSON; a payload that cannot be serialized is an error.
    pub fn build<T>(
        method: HttpMethod,
        url: Url,
        payload: Option<&T>,
        credentials: &Credentials,
    ) -> Result<Self, Error>
    where
        T: Serialize + ?Sized,
    {
        let body = match payload {
            Some(payload) if method.has_body() => {
                Some(serde_json::to_string(payload).map_err(|e| {
                    tracing::error!("Failed to serialize {} payload: {}", method, e);
                    Error::Serialization(e)
                })?)
            }
            Some(_) => {
                tracing::debug!("Ignoring payload for {} request", method);
                None
            }
            None => None,
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, credentials.authorization_header()?);

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
