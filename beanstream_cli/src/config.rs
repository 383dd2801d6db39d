//! Connection settings from flags, environment and `.env`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use beanstream_api::{Client, Configuration, HttpTransport};
use clap::Args;

#[derive(Args)]
pub struct ConnectionArgs {
    /// Merchant ID
    #[arg(long, env = "BEANSTREAM_MERCHANT_ID", global = true)]
    pub merchant_id: Option<u32>,

    /// API passcode for the merchant
    #[arg(long, env = "BEANSTREAM_API_PASSCODE", hide_env_values = true, global = true)]
    pub passcode: Option<String>,

    /// Platform subdomain (e.g. www)
    #[arg(long, env = "BEANSTREAM_PLATFORM", global = true)]
    pub platform: Option<String>,

    /// API version number
    #[arg(long, env = "BEANSTREAM_API_VERSION", global = true)]
    pub api_version: Option<String>,

    /// Override the API root URL
    #[arg(long, env = "BEANSTREAM_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "BEANSTREAM_TIMEOUT_SECS", default_value = "30", global = true)]
    pub timeout_secs: u64,
}

impl ConnectionArgs {
    pub fn configuration(&self) -> Result<Configuration> {
        let merchant_id = self
            .merchant_id
            .context("merchant ID is required (--merchant-id or BEANSTREAM_MERCHANT_ID)")?;
        let passcode = self
            .passcode
            .as_deref()
            .context("API passcode is required (--passcode or BEANSTREAM_API_PASSCODE)")?;

        let mut config = Configuration::new(merchant_id, passcode);
        if let Some(platform) = &self.platform {
            config = config.with_platform(platform);
        }
        if let Some(version) = &self.api_version {
            config = config.with_version(version);
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url)?;
        }
        Ok(config)
    }

    pub fn into_client(self) -> Result<Client> {
        let config = self.configuration()?;
        let transport = HttpTransport::with_timeout(Duration::from_secs(self.timeout_secs))?;
        Ok(Client::with_transport(config, Arc::new(transport)))
    }
}
