use std::collections::HashMap;
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::jwks::JwksFetcher;

/// Minimum time between two key set refreshes triggered by unknown key ids.
pub const DEFAULT_REFRESH_COOLDOWN: Duration = Duration::from_secs(300);

/// Claims extracted from a verified access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iss: Option<String>,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
}

#[derive(Default)]
struct KeyCache {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Option<Instant>,
}

impl KeyCache {
    fn refresh_due(&self, cooldown: Duration) -> bool {
        self.fetched_at.is_none_or(|at| at.elapsed() >= cooldown)
    }

    fn replace(&mut self, keys: HashMap<String, DecodingKey>) {
        self.keys = keys;
        self.fetched_at = Some(Instant::now());
    }
}

/// Verifies RS256 tokens against a cached key set.
///
/// One instance is shared by the whole process. Keys are fetched on
/// [`initialize`](Self::initialize) or lazily on first use. A token whose
/// `kid` is not cached triggers one refresh, unless the last refresh is
/// younger than the cooldown.
pub struct TokenValidator<F> {
    fetcher: F,
    cache: RwLock<KeyCache>,
    refresh_cooldown: Duration,
    validation: Validation,
}

impl<F: JwksFetcher> TokenValidator<F> {
    pub fn new(fetcher: F) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_aud = false;
        validation.validate_exp = true;

        Self {
            fetcher,
            cache: RwLock::new(KeyCache::default()),
            refresh_cooldown: DEFAULT_REFRESH_COOLDOWN,
            validation,
        }
    }

    pub fn with_refresh_cooldown(mut self, cooldown: Duration) -> Self {
        self.refresh_cooldown = cooldown;
        self
    }

    /// Seed the cache with an already known key set. Counts as a fresh fetch.
    pub fn with_keys(mut self, jwks: &JwkSet) -> Result<Self, AuthError> {
        let keys = decoding_keys(jwks)?;
        self.cache.get_mut().replace(keys);
        Ok(self)
    }

    /// Fetch the key set now. Returns the number of usable keys.
    pub async fn initialize(&self) -> Result<usize, AuthError> {
        let mut cache = self.cache.write().await;
        let keys = self.fetch_keys().await?;
        let count = keys.len();
        cache.replace(keys);
        info!(keys = count, "JWKS loaded");
        Ok(count)
    }

    /// Verify signature and expiry of `token` and return its claims.
    pub async fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)?;
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;
        let key = self.key_for(&kid).await?;

        let token_data = decode::<Claims>(token, &key, &self.validation)?;
        Ok(token_data.claims)
    }

    async fn key_for(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(key) = cache.keys.get(kid) {
                return Ok(key.clone());
            }
            if !cache.refresh_due(self.refresh_cooldown) {
                return Err(AuthError::UnknownKeyId(kid.to_string()));
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(key) = cache.keys.get(kid) {
            return Ok(key.clone());
        }
        if !cache.refresh_due(self.refresh_cooldown) {
            return Err(AuthError::UnknownKeyId(kid.to_string()));
        }

        debug!(kid, "key id not cached, refreshing JWKS");
        let keys = self.fetch_keys().await?;
        cache.replace(keys);

        match cache.keys.get(kid) {
            Some(key) => Ok(key.clone()),
            None => {
                warn!(kid, "key id not found after JWKS refresh");
                Err(AuthError::UnknownKeyId(kid.to_string()))
            }
        }
    }

    async fn fetch_keys(&self) -> Result<HashMap<String, DecodingKey>, AuthError> {
        let jwks = self.fetcher.fetch().await?;
        decoding_keys(&jwks)
    }
}

fn decoding_keys(jwks: &JwkSet) -> Result<HashMap<String, DecodingKey>, AuthError> {
    jwks.keys
        .iter()
        .map(|jwk| {
            let kid = jwk
                .common
                .key_id
                .clone()
                .ok_or_else(|| AuthError::KeyParse("JWK without 'kid'".to_string()))?;
            let key = DecodingKey::from_jwk(jwk).map_err(|e| AuthError::KeyParse(e.to_string()))?;
            Ok((kid, key))
        })
        .collect()
}
