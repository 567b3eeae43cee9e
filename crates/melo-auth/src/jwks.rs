//! Fetching the identity provider's public key set.

use std::future::Future;
use std::time::Duration;

use jsonwebtoken::jwk::JwkSet;
use tracing::info;

use crate::error::AuthError;

/// Bounded wait for the key set endpoint.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of the public key set used to verify tokens.
pub trait JwksFetcher: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<JwkSet, AuthError>> + Send;
}

/// Well-known JWKS location for a provider base URI.
pub fn jwks_uri(base_uri: &str) -> String {
    format!("{}/.well-known/jwks", base_uri.trim_end_matches('/'))
}

/// Fetches the key set over HTTPS from `<base>/.well-known/jwks`.
#[derive(Debug, Clone)]
pub struct HttpJwksFetcher {
    client: reqwest::Client,
    jwks_uri: String,
}

impl HttpJwksFetcher {
    pub fn new(base_uri: &str) -> Result<Self, AuthError> {
        if base_uri.trim().is_empty() {
            return Err(AuthError::Config("identity provider URI is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AuthError::Config(e.to_string()))?;

        Ok(Self {
            client,
            jwks_uri: jwks_uri(base_uri),
        })
    }

    pub fn jwks_uri(&self) -> &str {
        &self.jwks_uri
    }
}

impl JwksFetcher for HttpJwksFetcher {
    async fn fetch(&self) -> Result<JwkSet, AuthError> {
        info!(uri = %self.jwks_uri, "fetching JWKS");

        let response = self
            .client
            .get(&self.jwks_uri)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeyParse(e.to_string()))
    }
}
