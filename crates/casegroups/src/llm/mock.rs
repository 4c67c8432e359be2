//! Mock LLM provider for testing and offline runs.

use crate::error::Result;
use crate::report::ReportContext;

use super::provider::{LlmConfig, LlmProvider};

/// Mock LLM provider that returns a predictable report built from the context.
pub struct MockProvider {
    config: LlmConfig,
}

impl MockProvider {
    /// Create a new mock provider.
    pub fn new() -> Self {
        Self {
            config: LlmConfig::with_model("mock"),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(config: LlmConfig) -> Self {
        Self { config }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn generate_report(&self, context: &ReportContext) -> Result<String> {
        let header = context
            .dataset
            .trim_start_matches('\u{feff}')
            .lines()
            .next()
            .unwrap_or_default();

        let scope = if context.filters.is_empty() {
            "all groups".to_string()
        } else {
            context.filters.clone()
        };

        Ok(format!(
            "# Group comparison report\n\n\
             This report covers {} summary rows ({}).\n\n\
             Columns: {}",
            context.row_count, scope, header
        ))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}
