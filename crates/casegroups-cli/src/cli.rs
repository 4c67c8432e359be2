//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use casegroups::{Result, SummarySpec};

/// Casegroups: compare groups of case records
#[derive(Parser)]
#[command(name = "casegroups")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the columns of a data file and the filters it offers
    Options {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Summarize groups and write the summary CSV
    Summarize {
        #[command(flatten)]
        summary: SummaryArgs,

        /// Output path for the summary (default: <file>.group_summary.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize groups and generate a narrative report
    Report {
        #[command(flatten)]
        summary: SummaryArgs,

        /// Report only on these groups; multi-column keys join values with '|'
        #[arg(long = "group", value_name = "KEY")]
        groups: Vec<String>,

        /// Report only on groups ranked this high or higher (0 = all)
        #[arg(long)]
        top: Option<u32>,

        /// LLM provider to write the report
        #[arg(long, default_value = "anthropic")]
        llm: LlmProviderChoice,

        /// Model to use (provider-specific, e.g., "gpt-4o", "llama3.2")
        #[arg(long)]
        model: Option<String>,

        /// Output path for the report markdown (default: print only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Selections shared by every command that builds a summary.
#[derive(Args)]
pub struct SummaryArgs {
    /// Path to the data file (CSV/TSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON file with groups, aggregates, temporal and filters
    #[arg(long, value_name = "JSON")]
    pub spec: Option<PathBuf>,

    /// Column whose values define the groups (repeatable)
    #[arg(short, long = "group-by", value_name = "COL")]
    pub group_by: Vec<String>,

    /// Column whose values are counted within groups (repeatable)
    #[arg(short, long = "aggregate", value_name = "COL")]
    pub aggregates: Vec<String>,

    /// Column whose values define time windows
    #[arg(short, long, value_name = "COL")]
    pub temporal: Option<String>,

    /// Keep only rows where COL equals VAL (repeatable, all must match)
    #[arg(short, long = "filter", value_name = "COL:VAL")]
    pub filters: Vec<String>,
}

impl SummaryArgs {
    /// Build the summary selections; flags extend or override the `--spec` file.
    pub fn to_spec(&self) -> Result<SummarySpec> {
        let mut spec = match &self.spec {
            Some(path) => SummarySpec::load(path)?,
            None => SummarySpec::default(),
        };

        if !self.group_by.is_empty() {
            spec.groups = self.group_by.clone();
        }
        if !self.aggregates.is_empty() {
            spec.aggregates = self.aggregates.clone();
        }
        if let Some(temporal) = &self.temporal {
            spec.temporal = Some(temporal.clone());
        }
        spec.filters.extend(self.filters.iter().cloned());

        Ok(spec)
    }
}

/// LLM provider choice for reports
#[derive(Clone, Debug, Default)]
pub enum LlmProviderChoice {
    /// Anthropic Claude API (requires ANTHROPIC_API_KEY)
    #[default]
    Anthropic,
    /// OpenAI GPT API (requires OPENAI_API_KEY)
    OpenAI,
    /// Ollama local models (requires Ollama running)
    Ollama,
    /// Mock provider for testing
    Mock,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(LlmProviderChoice::Anthropic),
            "openai" | "gpt" => Ok(LlmProviderChoice::OpenAI),
            "ollama" | "local" => Ok(LlmProviderChoice::Ollama),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: anthropic, openai, ollama, or mock.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::Anthropic => write!(f, "anthropic"),
            LlmProviderChoice::OpenAI => write!(f, "openai"),
            LlmProviderChoice::Ollama => write!(f, "ollama"),
            LlmProviderChoice::Mock => write!(f, "mock"),
        }
    }
}
