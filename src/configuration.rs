use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    /// Resident key manager token endpoint.
    pub token_url: String,
    /// Publisher REST API base URL (the `/apis` collection).
    pub publisher_url: String,
    /// Free-text description attached to every created revision.
    pub revision_description: String,
    /// Path to the tenant credential document (JSON keyed by tenant id).
    pub credentials_file: String,
    pub api_list: ApiListSettings,
    #[serde(default)]
    pub http: HttpSettings,
}

/// Catalog listing parameters. Forwarded verbatim as query parameters;
/// the publisher owns their interpretation, so they stay strings here.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiListSettings {
    pub limit: String,
    pub offset: String,
    pub sort_by: String,
    pub order_by: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional PEM bundle appended to the client trust store, for
    /// platforms fronted by a private CA.
    #[serde(default)]
    pub ca_bundle: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            ca_bundle: None,
        }
    }
}

impl Settings {
    /// Reject missing or empty required values before any tenant work starts.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let required = [
            ("token_url", &self.token_url),
            ("publisher_url", &self.publisher_url),
            ("revision_description", &self.revision_description),
            ("credentials_file", &self.credentials_file),
            ("api_list.limit", &self.api_list.limit),
            ("api_list.offset", &self.api_list.offset),
            ("api_list.sort_by", &self.api_list.sort_by),
            ("api_list.order_by", &self.api_list.order_by),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(config::ConfigError::Message(format!(
                    "missing or empty configuration value: {}",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Build the shared HTTP client used by every connector. One pool for
    /// the whole run; calls are strictly sequential so reuse is safe.
    pub fn http_client(&self) -> Result<reqwest::Client, config::ConfigError> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(self.http.timeout_secs));

        if let Some(path) = &self.http.ca_bundle {
            let pem = std::fs::read(path).map_err(|e| {
                config::ConfigError::Message(format!("cannot read ca_bundle {}: {}", path, e))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                config::ConfigError::Message(format!("invalid ca_bundle {}: {}", path, e))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        builder
            .build()
            .map_err(|e| config::ConfigError::Message(format!("failed to build HTTP client: {}", e)))
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    get_configuration_from("configuration")
}

/// Load settings from `<base>.{yaml,json,toml}` in the working directory.
/// A `.env` file is applied first so the config file can reference the
/// environment.
pub fn get_configuration_from(base: &str) -> Result<Settings, config::ConfigError> {
    dotenvy::dotenv().ok();

    let mut settings = config::Config::default();
    settings.merge(config::File::with_name(base))?; // .json, .toml, .yaml, .yml

    let settings: Settings = settings.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
