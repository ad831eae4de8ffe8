use std::process::ExitCode;

use clap::{Parser, Subcommand};

use apim_redeployer::configuration::{get_configuration_from, Settings};
use apim_redeployer::connectors::{PublisherClient, TokenServiceClient};
use apim_redeployer::services::credentials::load_credentials;
use apim_redeployer::services::redeployer::Redeployer;
use apim_redeployer::telemetry::{get_subscriber, init_subscriber};

#[derive(Parser, Debug)]
#[command(
    name = "apim-redeployer",
    about = "Re-applies published API definitions and redeploys their revisions across tenants"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the redeployment workflow for every configured tenant
    Run {
        /// Configuration file base name (default: configuration)
        #[arg(long, value_name = "FILE")]
        config: Option<String>,
    },
    /// Validate the configuration and credential document, then exit
    CheckConfig {
        /// Configuration file base name (default: configuration)
        #[arg(long, value_name = "FILE")]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = get_subscriber("apim-redeployer".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    match cli.command {
        Commands::Run { config } => run(config.as_deref().unwrap_or("configuration")).await,
        Commands::CheckConfig { config } => check_config(config.as_deref().unwrap_or("configuration")),
    }
}

/// Everything after startup is skip-and-continue: individual tenant or API
/// failures are logged and the process still exits 0. Only a configuration
/// failure (settings, credential document, HTTP client) is fatal.
async fn run(config_base: &str) -> ExitCode {
    tracing::info!("Starting the API redeployment service");

    let settings = match load_settings(config_base) {
        Ok(settings) => settings,
        Err(code) => return code,
    };

    let credentials = match load_credentials(&settings.credentials_file) {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!(error = %e, "Cannot load tenant credentials");
            return ExitCode::FAILURE;
        }
    };

    let http = match settings.http_client() {
        Ok(http) => http,
        Err(e) => {
            tracing::error!(error = %e, "Cannot build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let token_service = TokenServiceClient::new(&settings.token_url, http.clone());
    let publisher = PublisherClient::new(&settings.publisher_url, http);

    let redeployer = Redeployer::new(&settings, &token_service, &publisher);
    redeployer.run(&credentials).await;

    tracing::info!("API redeployment service finished");
    ExitCode::SUCCESS
}

fn check_config(config_base: &str) -> ExitCode {
    let settings = match load_settings(config_base) {
        Ok(settings) => settings,
        Err(code) => return code,
    };

    match load_credentials(&settings.credentials_file) {
        Ok(credentials) => {
            let complete = credentials.iter().filter(|c| c.is_complete()).count();
            println!(
                "configuration OK: {} tenant(s), {} with complete credentials",
                credentials.len(),
                complete
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("credential document error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(config_base: &str) -> Result<Settings, ExitCode> {
    match get_configuration_from(config_base) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            tracing::error!(error = %e, "Configuration error");
            eprintln!("configuration error: {}", e);
            Err(ExitCode::FAILURE)
        }
    }
}
