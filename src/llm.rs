//! LLM adapter: client abstraction + OpenAI chat completions + mock/disabled clients.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{Credential, DiscoveryConfig};
use crate::error::DiscoveryError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Everything needed for one completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

/// Text completion provider used by discovery.
pub trait LlmClient: Send + Sync {
    fn complete<'a>(
        &'a self,
        req: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

pub type DynLlmClient = Arc<dyn LlmClient>;

/// Factory: build a client according to config and environment variables.
///
/// * If `LLM_TEST_MODE=mock`, returns a mock answering `{"events": []}`.
/// * Else builds the OpenAI client; a missing key is a `MissingCredential` error.
pub fn build_client_from_config(cfg: &DiscoveryConfig) -> Result<DynLlmClient, DiscoveryError> {
    if std::env::var("LLM_TEST_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        return Ok(Arc::new(MockLlmClient::new(r#"{"events": []}"#)));
    }
    let key = cfg.resolve_credential(Credential::OpenAi)?;
    let client = OpenAiClient::new(key, cfg.openai_base_url.clone()).map_err(DiscoveryError::Setup)?;
    Ok(Arc::new(client))
}

/// OpenAI Chat Completions client.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("event-scout/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(90))
            .build()
            .context("building openai http client")?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatReq<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Deserialize)]
struct ChatResp {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMsg,
}

#[derive(Deserialize)]
struct ChoiceMsg {
    #[serde(default)]
    content: Option<String>,
}

impl LlmClient for OpenAiClient {
    fn complete<'a>(
        &'a self,
        req: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let body = ChatReq {
                model: &req.model,
                messages: vec![
                    Msg {
                        role: "system",
                        content: &req.system,
                    },
                    Msg {
                        role: "user",
                        content: &req.prompt,
                    },
                ],
                temperature: req.temperature,
                max_tokens: req.max_tokens,
                top_p: req.top_p,
            };

            let resp = self
                .http
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .context("sending chat completion request")?;

            let status = resp.status();
            if !status.is_success() {
                let text = resp.text().await.unwrap_or_default();
                bail!("openai returned HTTP {status}: {}", text.chars().take(200).collect::<String>());
            }

            let parsed: ChatResp = resp.json().await.context("decoding chat completion")?;
            parsed
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content.unwrap_or_default())
                .ok_or_else(|| anyhow!("openai returned no choices"))
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Always fails; stands in when no provider is configured.
pub struct DisabledClient;

impl LlmClient for DisabledClient {
    fn complete<'a>(
        &'a self,
        _req: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async { Err(anyhow!("LLM client is disabled")) })
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Returns a fixed completion and remembers every request it saw.
pub struct MockLlmClient {
    fixed: String,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    pub fn new(fixed: impl Into<String>) -> Self {
        Self {
            fixed: fixed.into(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl LlmClient for MockLlmClient {
    fn complete<'a>(
        &'a self,
        req: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(req.clone());
        let out = self.fixed.clone();
        Box::pin(async move { Ok(out) })
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
