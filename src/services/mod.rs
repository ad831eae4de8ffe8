pub mod bindings;
pub mod credentials;
pub mod redeployer;

pub use bindings::{extract_bindings, ExtractError};
pub use credentials::{load_credentials, CredentialError};
pub use redeployer::{ApiOutcome, Redeployer, RunSummary, SkipReason, TenantOutcome};
