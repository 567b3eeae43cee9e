use std::time::{Duration, Instant};

use reqwest::Url;
use tracing::{error, info};

use crate::chat::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, TextGenerator};
use crate::error::OpenAiError;

pub const API_KEY_VAR: &str = "AZURE_OPENAI_API_KEY";
pub const ENDPOINT_VAR: &str = "AZURE_OPENAI_ENDPOINT";
pub const DEPLOYMENT_VAR: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";

/// Raw provider settings as found in the environment.
#[derive(Debug, Clone, Default)]
pub struct AzureOpenAiSettings {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub deployment: Option<String>,
}

impl AzureOpenAiSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            api_key: get(API_KEY_VAR),
            endpoint: get(ENDPOINT_VAR),
            deployment: get(DEPLOYMENT_VAR),
        }
    }

    /// Check that every setting is present and the endpoint is usable.
    pub fn resolve(self) -> Result<AzureOpenAiConfig, OpenAiError> {
        let api_key = self.api_key.ok_or(OpenAiError::MissingSetting(API_KEY_VAR))?;
        let endpoint = self.endpoint.ok_or(OpenAiError::MissingSetting(ENDPOINT_VAR))?;
        let deployment = self
            .deployment
            .ok_or(OpenAiError::MissingSetting(DEPLOYMENT_VAR))?;

        let (base_url, api_version) = parse_endpoint(&endpoint)?;

        Ok(AzureOpenAiConfig {
            api_key,
            base_url,
            api_version,
            deployment,
        })
    }
}

/// Validated provider settings.
#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub api_version: String,
    pub deployment: String,
}

impl AzureOpenAiConfig {
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.base_url, self.deployment
        )
    }
}

/// Split a resource endpoint into its origin and the `api-version` it names.
///
/// The endpoint may be a bare resource URL or a full completions URL, but
/// must carry an `api-version` query parameter.
pub fn parse_endpoint(endpoint: &str) -> Result<(String, String), OpenAiError> {
    let url = Url::parse(endpoint.trim())
        .map_err(|e| OpenAiError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

    if !url.has_host() {
        return Err(OpenAiError::InvalidEndpoint(format!("{endpoint}: no host")));
    }

    let api_version = url
        .query_pairs()
        .find(|(key, _)| key == "api-version")
        .map(|(_, value)| value.into_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            OpenAiError::InvalidEndpoint(format!("{endpoint}: missing api-version query parameter"))
        })?;

    Ok((url.origin().ascii_serialization(), api_version))
}

/// Chat completions against one Azure OpenAI deployment.
#[derive(Debug, Clone)]
pub struct AzureOpenAiClient {
    http: reqwest::Client,
    config: AzureOpenAiConfig,
}

impl AzureOpenAiClient {
    pub fn new(config: AzureOpenAiConfig, timeout: Duration) -> Result<Self, OpenAiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OpenAiError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn from_settings(
        settings: AzureOpenAiSettings,
        timeout: Duration,
    ) -> Result<Self, OpenAiError> {
        Self::new(settings.resolve()?, timeout)
    }

    pub fn config(&self) -> &AzureOpenAiConfig {
        &self.config
    }
}

impl TextGenerator for AzureOpenAiClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, OpenAiError> {
        let started = Instant::now();

        let response = self
            .http
            .post(self.config.completions_url())
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", &self.config.api_key)
            .json(&ChatCompletionRequest::deterministic(messages))
            .send()
            .await
            .map_err(|e| OpenAiError::Invocation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, deployment = %self.config.deployment, "chat completion rejected");
            return Err(OpenAiError::Invocation(format!(
                "provider returned {status}: {body}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| OpenAiError::ResponseParse(e.to_string()))?;

        info!(
            deployment = %self.config.deployment,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chat completion received"
        );

        completion.into_text()
    }
}
