//! Connectors for the platform services this tool drives.
//!
//! Every remote integration goes through a trait defined here so the
//! orchestrator can be exercised against mocks and never depends on HTTP
//! details. Pattern per service: `connector.rs` trait, `client.rs` reqwest
//! implementation, `types.rs` wire shapes, `mock.rs` test double.

pub mod errors;
pub mod publisher;
pub mod token_service;

pub use errors::ConnectorError;
pub use publisher::{PublisherClient, PublisherConnector};
pub use token_service::{TokenIssuer, TokenServiceClient};
