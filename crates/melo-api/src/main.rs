use std::sync::Arc;

use eyre::WrapErr;
use melo_api::config::ServiceConfig;
use melo_api::state::AppState;
use melo_api::summary::SummaryService;
use melo_auth::jwks::HttpJwksFetcher;
use melo_auth::jwt::TokenValidator;
use melo_core::mapping::MappingTable;
use melo_openai::client::AzureOpenAiClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServiceConfig::from_env()?;

    let mappings = MappingTable::load(&config.mapping_path)
        .wrap_err("failed to load value mapping table")?;

    let pool = melo_storage::client::build_pool(&config.database_url, config.db_max_connections)?;

    let fetcher = HttpJwksFetcher::new(&config.kinde_uri)?;
    let fetcher_uri = fetcher.jwks_uri().to_string();
    let validator =
        TokenValidator::new(fetcher).with_refresh_cooldown(config.jwks_refresh_cooldown);
    // Keys are fetched again on first use if the provider is unreachable now.
    if let Err(e) = validator.initialize().await {
        tracing::error!(error = %e, uri = %fetcher_uri, "initial JWKS fetch failed");
    }

    let generator = AzureOpenAiClient::from_settings(config.openai.clone(), config.llm_timeout);
    if let Err(e) = &generator {
        tracing::warn!(error = %e, "text generation not configured, summaries will fail");
    }

    let state = AppState {
        pool,
        validator: Arc::new(validator),
        summaries: Arc::new(SummaryService::new(
            mappings,
            config.prompts_path.clone(),
            generator,
        )),
    };

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.addr))?;
    tracing::info!(addr = %config.addr, "listening");

    melo_api::serve(listener, state, shutdown_signal())
        .await
        .wrap_err("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
