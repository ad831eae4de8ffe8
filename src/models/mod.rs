mod api;
mod credential;
mod revision;
mod token;

pub use api::*;
pub use credential::*;
pub use revision::*;
pub use token::*;
