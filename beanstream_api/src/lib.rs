//! Client for the Beanstream payments reporting API.
//!
//! Requests are authenticated with a merchant passcode, and every non-2xx
//! response is turned into a typed [`ApiError`] that knows whether its message
//! may be shown to a cardholder.
//!
//! ```no_run
//! use beanstream_api::{Client, Configuration};
//!
//! # async fn example() -> Result<(), beanstream_api::Error> {
//! let client = Client::new(Configuration::new(300200578, "your-api-passcode"))?;
//! let transaction = client.get_transaction("10000123").await?;
//! println!("{} {}", transaction.id, transaction.amount);
//! # Ok(())
//! # }
//! ```
mod client;
mod config;
mod connector;
mod credentials;
mod errors;
mod mapping;
mod query;
mod request;
mod response;
mod transport;
pub mod types;
pub use self::client::Client;
pub use self::config::{Configuration, DEFAULT_PLATFORM, DEFAULT_VERSION};
pub use self::connector::Connector;
pub use self::credentials::{encode_passcode, Credentials, PASSCODE_SCHEME};
pub use self::errors::{
    ApiError, Audience, Error, ErrorKind, FieldError, TransportError, UserFacingRule,
    GENERIC_USER_MESSAGE, UNKNOWN_CATEGORY, UNKNOWN_CODE,
};
pub use self::mapping::map_error;
pub use self::query::{Criteria, Operator, QueryField, SearchQuery, MAX_ROWS_PER_QUERY};
pub use self::request::{ApiRequest, HttpMethod};
pub use self::response::{ErrorEnvelope, NormalizedResponse};
pub use self::transport::{HttpTransport, RawResponse, Transport, REQUEST_TIMEOUT};
