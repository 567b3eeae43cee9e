use std::sync::Arc;

use melo_auth::jwks::HttpJwksFetcher;
use melo_auth::jwt::TokenValidator;
use melo_openai::client::AzureOpenAiClient;
use sqlx::PgPool;

use crate::summary::SummaryService;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub validator: Arc<TokenValidator<HttpJwksFetcher>>,
    pub summaries: Arc<SummaryService<AzureOpenAiClient>>,
}
