//! Ollama local LLM provider implementation.
//!
//! Ollama allows running LLMs locally without API keys.
//! Install from: https://ollama.ai

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{CaseGroupsError, Result};
use crate::report::ReportContext;

use super::prompts;
use super::provider::{LlmConfig, LlmProvider, strip_code_fence};

/// Default Ollama API endpoint.
const DEFAULT_API_URL: &str = "http://localhost:11434/api/chat";

/// Default local model.
const DEFAULT_MODEL: &str = "llama3.2";

/// Ollama local LLM provider.
pub struct OllamaProvider {
    client: Client,
    api_url: String,
    config: LlmConfig,
}

impl OllamaProvider {
    /// Create a new Ollama provider with default settings.
    ///
    /// Uses llama3.2 model by default. Make sure you've pulled it:
    /// `ollama pull llama3.2`
    pub fn new() -> Result<Self> {
        Self::with_config(LlmConfig::with_model(DEFAULT_MODEL))
    }

    /// Create with custom configuration.
    ///
    /// The endpoint is taken from `OLLAMA_HOST` when set.
    pub fn with_config(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300)) // Local models can be slower
            .build()
            .map_err(|e| CaseGroupsError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let api_url = std::env::var("OLLAMA_HOST")
            .map(|host| format!("{}/api/chat", host.trim_end_matches('/')))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            client,
            api_url,
            config,
        })
    }

    /// The model used when none is chosen.
    pub fn default_model() -> &'static str {
        DEFAULT_MODEL
    }

    /// Send a message to Ollama.
    fn send_message(&self, user_prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "stream": false,
            "options": {
                "temperature": self.config.temperature,
                "num_predict": self.config.max_tokens
            },
            "messages": [
                {
                    "role": "system",
                    "content": prompts::system_prompt()
                },
                {
                    "role": "user",
                    "content": user_prompt
                }
            ]
        });

        debug!(
            model = %self.config.model,
            url = %self.api_url,
            "sending request to Ollama"
        );

        let response = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    CaseGroupsError::Llm(
                        "Failed to connect to Ollama. Is it running? Start with: ollama serve"
                            .to_string(),
                    )
                } else {
                    CaseGroupsError::Llm(format!("Ollama request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();

            if error_text.contains("not found") {
                return Err(CaseGroupsError::Llm(format!(
                    "Model '{}' not found. Pull it with: ollama pull {}",
                    self.config.model, self.config.model
                )));
            }

            return Err(CaseGroupsError::Llm(format!(
                "Ollama error ({}): {}",
                status, error_text
            )));
        }

        let api_response: OllamaResponse = response
            .json()
            .map_err(|e| CaseGroupsError::Llm(format!("Failed to parse Ollama response: {}", e)))?;

        Ok(api_response.message.content)
    }
}

impl LlmProvider for OllamaProvider {
    fn generate_report(&self, context: &ReportContext) -> Result<String> {
        let prompt = prompts::report_prompt(context, &self.config);
        let response = self.send_message(&prompt)?;
        Ok(strip_code_fence(&response))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama API response structure.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}
