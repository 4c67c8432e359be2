//! LLM provider trait and configuration.

use crate::error::Result;
use crate::report::ReportContext;

/// Configuration for LLM providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (e.g., "claude-sonnet-4-20250514").
    pub model: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,

    /// Extra instructions appended to the report prompt.
    pub instructions: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 4096,
            temperature: 0.3,
            instructions: None,
        }
    }
}

impl LlmConfig {
    /// Default configuration with a different model.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }
}

/// A text generator that writes group comparison reports.
///
/// Implementations must be thread-safe (Send + Sync) so one provider can be
/// shared between sessions.
pub trait LlmProvider: Send + Sync {
    /// Write a markdown report grounded in `context`.
    fn generate_report(&self, context: &ReportContext) -> Result<String>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}

/// Remove a code fence the model may have wrapped the whole report in.
pub(crate) fn strip_code_fence(response: &str) -> String {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed.to_string();
    };
    // Drop the info string ("markdown", "md", ...) on the opening line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim().to_string(),
        None => body.trim().to_string(),
    }
}
