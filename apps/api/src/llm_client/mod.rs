/// LLM Client — the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the inference backend directly.
/// Handlers and the generator depend on the `TextGenerator` trait, never on `LlmClient`.
///
/// Wire format: Hugging Face text-generation inference
/// (`{"inputs", "parameters"}` in, `[{"generated_text"}]` out).
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Sampling parameters passed through unchanged to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    /// Prompt + continuation, in tokens.
    pub max_length: u32,
    pub num_return_sequences: u32,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

/// The narrow generation interface. `LlmClient` is the production implementation;
/// tests substitute deterministic stand-ins.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the raw generated texts in backend order. Each is expected
    /// (but not guaranteed) to start with `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<String>, LlmError>;
}

/// Process-wide seed source. Seeded once at startup; every backend call draws
/// the next seed, so a fresh process replays the same sequence of samples.
#[derive(Debug)]
pub struct SeedSequence {
    rng: Mutex<StdRng>,
}

impl SeedSequence {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn next_seed(&self) -> u64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen()
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    #[serde(flatten)]
    sampling: GenerationParams,
    do_sample: bool,
    return_full_text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Hosted inference returns a list; some self-hosted servers return one object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<GeneratedText>),
    One(GeneratedText),
}

impl InferenceResponse {
    fn into_texts(self) -> Vec<String> {
        match self {
            InferenceResponse::Many(records) => {
                records.into_iter().map(|r| r.generated_text).collect()
            }
            InferenceResponse::One(record) => vec![record.generated_text],
        }
    }
}

#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}

/// HTTP client for the text-generation backend.
/// Fail-fast: a failed call is returned to the caller, never retried.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    model: String,
    api_token: Option<String>,
    seeds: Option<Arc<SeedSequence>>,
}

impl LlmClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_token: Option<String>,
        seed: Option<u64>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint_url(base_url, model),
            model: model.to_string(),
            api_token,
            seeds: seed.map(|s| Arc::new(SeedSequence::new(s))),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Self::new(
            &config.generation_api_url,
            &config.generation_model,
            config.generation_api_token.clone(),
            config.generation_seed,
            Duration::from_secs(config.generation_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<String>, LlmError> {
        let request_body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                sampling: *params,
                do_sample: true,
                return_full_text: true,
                seed: self.seeds.as_ref().map(|s| s.next_seed()),
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&request_body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Generation backend returned {}: {}", status, body);
            let message = serde_json::from_str::<InferenceError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let texts = serde_json::from_str::<InferenceResponse>(&body)?.into_texts();

        debug!(
            "Generation call succeeded: model={}, sequences={}",
            self.model,
            texts.len()
        );

        Ok(texts)
    }
}

/// `{base}/models/{model}` for hosted inference; the bare base URL when no model is named.
fn endpoint_url(base_url: &str, model: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if model.is_empty() {
        base.to_string()
    } else {
        format!("{base}/models/{model}")
    }
}
