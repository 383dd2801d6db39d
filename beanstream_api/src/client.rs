//! Reporting client for the Beanstream REST API.

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;

use crate::{
    config::Configuration,
    connector::{truncate_body, Connector},
    credentials::Credentials,
    mapping::invalid_request,
    query::{Criteria, SearchQuery},
    request::HttpMethod,
    transport::{HttpTransport, Transport},
    types::{Records, Transaction, TransactionRecord},
    Error,
};

/// Configuration plus everything derived from it. Replaced as a whole.
struct Session {
    config: Arc<Configuration>,
    connector: Connector,
}

impl Session {
    fn new(config: Configuration, transport: Arc<dyn Transport>) -> Self {
        let credentials = Credentials::new(config.merchant_id(), config.api_passcode());
        Self {
            config: Arc::new(config),
            connector: Connector::new(credentials, transport),
        }
    }
}

/// Client for fetching and searching transactions.
///
/// Cheap to share between tasks. Every call takes a snapshot of the current
/// configuration when it starts, so [`Client::set_config`] never affects a
/// call that is already in flight.
pub struct Client {
    session: ArcSwap<Session>,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client with the default HTTP transport.
    pub fn new(config: Configuration) -> Result<Self, Error> {
        Ok(Self::with_transport(config, Arc::new(HttpTransport::new()?)))
    }

    /// Creates a client that sends every request through `transport`.
    pub fn with_transport(config: Configuration, transport: Arc<dyn Transport>) -> Self {
        let session = Session::new(config, transport.clone());
        Self {
            session: ArcSwap::from_pointee(session),
            transport,
        }
    }

    /// Replaces the configuration and re-derives the credential.
    ///
    /// The transport is kept. Calls already running finish with the old
    /// configuration.
    pub fn set_config(&self, config: Configuration) {
        tracing::debug!(merchant_id = config.merchant_id(), "Replacing configuration");
        self.session
            .store(Arc::new(Session::new(config, self.transport.clone())));
    }

    pub fn config(&self) -> Arc<Configuration> {
        self.session.load().config.clone()
    }

    /// Fetches a single transaction with its adjustments.
    ///
    /// A blank id is rejected as an invalid request without contacting the service.
    pub async fn get_transaction(&self, payment_id: &str) -> Result<Transaction, Error> {
        let payment_id = payment_id.trim();
        if payment_id.is_empty() {
            return Err(Error::Api(invalid_request("invalid payment request")));
        }

        let session = self.session.load_full();
        let url = session.config.payment_url(payment_id)?;
        let body = session
            .connector
            .process::<()>(HttpMethod::Get, url, None)
            .await?;
        parse(&body)
    }

    /// Runs a search and returns the rows in the order the service sent them.
    pub async fn search_transactions(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<TransactionRecord>, Error> {
        let session = self.session.load_full();
        let url = session.config.reports_url()?;
        let body = session
            .connector
            .process(HttpMethod::Post, url, Some(query))
            .await?;
        let records: Records = parse(&body)?;
        tracing::debug!(count = records.records.len(), "Search returned records");
        Ok(records.records)
    }

    /// Validates the arguments, then runs [`Client::search_transactions`].
    pub async fn query(
        &self,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        start_row: u32,
        end_row: u32,
        criteria: &[Criteria],
    ) -> Result<Vec<TransactionRecord>, Error> {
        let query = SearchQuery::new(start_date, end_date, start_row, end_row)?
            .with_criteria(criteria.iter().cloned());
        self.search_transactions(&query).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.session.load().config)
            .finish_non_exhaustive()
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str::<T>(body).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::Deserialization {
            source: e,
            body: snippet,
        }
    })
}
