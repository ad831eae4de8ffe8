/// Consumer key/secret pair for one tenant, read once at startup from the
/// credential document. Entries with empty fields are kept so the
/// orchestrator can report the tenant as skipped instead of dropping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantCredential {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl TenantCredential {
    /// True when both halves of the credential pair are present.
    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_credential() {
        let cred = TenantCredential {
            tenant_id: "acme".to_string(),
            client_id: "key".to_string(),
            client_secret: "secret".to_string(),
        };
        assert!(cred.is_complete());
    }

    #[test]
    fn blank_secret_is_incomplete() {
        let cred = TenantCredential {
            tenant_id: "acme".to_string(),
            client_id: "key".to_string(),
            client_secret: "   ".to_string(),
        };
        assert!(!cred.is_complete());
    }
}
