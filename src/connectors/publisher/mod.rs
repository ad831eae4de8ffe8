pub mod client;
pub mod connector;
pub mod mock;
pub mod types;

pub use client::PublisherClient;
pub use connector::PublisherConnector;
pub use mock::{MockPublisher, RecordedCall};
pub use types::{DeployedRevision, DeploymentEntry, ListParams};
