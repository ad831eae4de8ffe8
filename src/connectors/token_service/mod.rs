pub mod client;
pub mod connector;
pub mod mock;
pub mod types;

pub use client::{TokenServiceClient, TOKEN_SCOPES};
pub use connector::TokenIssuer;
pub use mock::MockTokenIssuer;
pub use types::TokenResponse;
