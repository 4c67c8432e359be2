//! Report command - summarize, select groups, and have an LLM write a report.

use std::path::PathBuf;

use casegroups::{
    AnthropicProvider, GroupKey, LlmConfig, LlmProvider, MockProvider, OllamaProvider,
    OpenAIProvider, ReportSelection,
};
use colored::Colorize;

use crate::cli::{LlmProviderChoice, SummaryArgs};

/// Separator between values of a multi-column group key.
const KEY_SEPARATOR: char = '|';

pub fn run(
    args: SummaryArgs,
    groups: Vec<String>,
    top: Option<u32>,
    llm: LlmProviderChoice,
    model: Option<String>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = super::load_and_summarize(&args)?;

    let groups: Vec<GroupKey> = groups
        .iter()
        .map(|g| GroupKey::parse(g, KEY_SEPARATOR))
        .collect();
    let known = session.group_options();
    if let Some(unknown) = groups.iter().find(|g| !known.contains(g)) {
        return Err(format!("Unknown group: {}", unknown).into());
    }
    let selection = ReportSelection::from_inputs(groups, top);

    let provider = build_provider(&llm, model)?;
    if verbose {
        println!(
            "Using {} ({})",
            provider.name().cyan(),
            provider.config().model
        );
        let filters = selection.description();
        if !filters.is_empty() {
            println!("{}", filters);
        }
    }

    println!(
        "{} {}",
        "Generating report with".cyan().bold(),
        llm.to_string().white()
    );
    let report = session.generate_report(provider.as_ref(), selection)?;

    println!();
    println!("{}", report.text);

    if let Some(path) = output {
        std::fs::write(&path, &report.text)?;
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn build_provider(
    choice: &LlmProviderChoice,
    model: Option<String>,
) -> Result<Box<dyn LlmProvider>, Box<dyn std::error::Error>> {
    let provider: Box<dyn LlmProvider> = match choice {
        LlmProviderChoice::Anthropic => {
            let config = model.map(LlmConfig::with_model).unwrap_or_default();
            Box::new(AnthropicProvider::from_env(config)?)
        }
        LlmProviderChoice::OpenAI => {
            let model = model.unwrap_or_else(|| OpenAIProvider::default_model().to_string());
            Box::new(OpenAIProvider::from_env(LlmConfig::with_model(model))?)
        }
        LlmProviderChoice::Ollama => {
            let model = model.unwrap_or_else(|| OllamaProvider::default_model().to_string());
            Box::new(OllamaProvider::with_config(LlmConfig::with_model(model))?)
        }
        LlmProviderChoice::Mock => Box::new(MockProvider::new()),
    };
    Ok(provider)
}
