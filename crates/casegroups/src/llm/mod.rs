//! LLM provider integration for narrative reports.
//!
//! Summaries are computed without any model; a provider is only needed to turn
//! a summary into a written report.
//!
//! # Supported Providers
//!
//! - **Anthropic** - Claude models via API (requires `ANTHROPIC_API_KEY`)
//! - **OpenAI** - GPT models via API (requires `OPENAI_API_KEY`)
//! - **Ollama** - Local models, no API key needed (requires Ollama installed)
//! - **Mock** - Deterministic output for tests and offline runs
//!
//! # Example
//!
//! ```no_run
//! use casegroups::{LlmConfig, OllamaProvider, ReportSelection, Session, SummarySpec};
//!
//! let mut session = Session::load("cases.csv").unwrap();
//! session.create_summary(SummarySpec::new(["region"], ["status"])).unwrap();
//!
//! let provider = OllamaProvider::with_config(LlmConfig::with_model("llama3.2")).unwrap();
//! let report = session.generate_report(&provider, ReportSelection::TopRanks(3)).unwrap();
//! println!("{}", report.text);
//! ```

mod anthropic;
mod mock;
mod ollama;
mod openai;
mod prompts;
mod provider;

pub use anthropic::AnthropicProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
pub use prompts::{report_prompt, system_prompt};
pub use provider::{LlmConfig, LlmProvider};
