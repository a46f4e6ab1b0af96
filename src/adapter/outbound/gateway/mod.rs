//! REST gateway connector.
//!
//! Talks to exchanges fronted by a gateway exposing `/markets`, `/account`
//! and `/account/balance`. Signed requests carry the API key material in
//! `X-API-*` headers; the gateway does the exchange-specific signing.

mod connector;
mod factory;
mod status;

pub use connector::HttpConnector;
pub use factory::HttpConnectorFactory;
pub use status::classify_status;
