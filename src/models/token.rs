/// Bearer token for one tenant's session against the publisher API.
/// Lives for the duration of that tenant's processing only; the expiry the
/// key manager reports is not tracked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub bearer: String,
}

impl AccessToken {
    pub fn new(bearer: impl Into<String>) -> Self {
        Self {
            bearer: bearer.into(),
        }
    }
}
