//! Merchant configuration and endpoint URLs.

use secrecy::SecretString;
use url::Url;

use crate::Error;

pub const DEFAULT_PLATFORM: &str = "www";
pub const DEFAULT_VERSION: &str = "1";

/// Merchant identity, passcode and endpoint selection.
#[derive(Debug, Clone)]
pub struct Configuration {
    merchant_id: u32,
    api_passcode: SecretString,
    platform: String,
    version: String,
    base_url: Option<Url>,
}

impl Configuration {
    /// Creates a configuration for the production platform, API version 1.
    pub fn new(merchant_id: u32, api_passcode: impl Into<String>) -> Self {
        Self {
            merchant_id,
            api_passcode: SecretString::from(api_passcode.into()),
            platform: DEFAULT_PLATFORM.to_string(),
            version: DEFAULT_VERSION.to_string(),
            base_url: None,
        }
    }

    pub fn with_platform(mut self, platform: &str) -> Self {
        self.platform = platform.to_string();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Overrides the API root. Used for testing with wiremock.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, Error> {
        let url = Url::parse(base_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", base_url, e);
            Error::Configuration(format!("invalid base URL {}: {}", base_url, e))
        })?;
        self.base_url = Some(url);
        Ok(self)
    }

    pub fn merchant_id(&self) -> u32 {
        self.merchant_id
    }

    pub fn api_passcode(&self) -> &SecretString {
        &self.api_passcode
    }

    /// Platform subdomain, falling back to `www` when blank.
    pub fn platform(&self) -> &str {
        let platform = self.platform.trim();
        if platform.is_empty() {
            DEFAULT_PLATFORM
        } else {
            platform
        }
    }

    /// Version path segment, e.g. `v1`.
    pub fn version_segment(&self) -> String {
        let version = self.version.trim();
        if version.is_empty() {
            format!("v{}", DEFAULT_VERSION)
        } else if version.starts_with('v') {
            version.to_string()
        } else {
            format!("v{}", version)
        }
    }

    fn api_root(&self) -> Result<Url, Error> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => {
                let root = format!("https://{}.beanstream.com/api", self.platform());
                Url::parse(&root).map_err(|e| {
                    tracing::error!("Invalid URL constructed: {}", e);
                    Error::Configuration(format!("invalid platform {:?}", self.platform()))
                })
            }
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.api_root()?;
        let version = self.version_segment();
        let invalid = format!("base URL {} cannot be a base", url);
        url.path_segments_mut()
            .map_err(|_| Error::Configuration(invalid))?
            .pop_if_empty()
            .push(&version)
            .extend(segments);
        Ok(url)
    }

    /// `<root>/v<version>/payments/<payment_id>`
    pub fn payment_url(&self, payment_id: &str) -> Result<Url, Error> {
        self.endpoint(&["payments", payment_id])
    }

    /// `<root>/v<version>/reports`
    pub fn reports_url(&self) -> Result<Url, Error> {
        self.endpoint(&["reports"])
    }
}
