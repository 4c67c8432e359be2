//! Session state: one loaded table and the last summary and report made from it.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{CaseGroupsError, Result};
use crate::input::{Parser, ParserConfig, SourceMetadata, Table};
use crate::llm::LlmProvider;
use crate::report::{Report, ReportContext, ReportSelection};
use crate::summary::{GroupKey, SummaryOutput, SummarySpec, normalize, summarize};

/// A loaded table and the results computed from it.
///
/// The summary and report are only replaced by a successful call, so a bad
/// selection or a failed provider call leaves the previous results in place.
#[derive(Debug, Clone)]
pub struct Session {
    table: Table,
    source: Option<SourceMetadata>,
    summary: Option<SummaryOutput>,
    report: Option<Report>,
}

impl Session {
    /// Start a session over an in-memory table.
    pub fn new(table: &Table) -> Self {
        Self {
            table: normalize(table),
            source: None,
            summary: None,
            report: None,
        }
    }

    /// Load a case-record file with default parser settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_config(path, ParserConfig::default())
    }

    /// Load a case-record file.
    pub fn load_with_config(path: impl AsRef<Path>, config: ParserConfig) -> Result<Self> {
        let (table, source) = Parser::with_config(config).parse_file(path)?;
        info!(
            file = %source.file,
            rows = source.row_count,
            columns = source.column_count,
            "loaded case records"
        );

        let mut session = Self::new(&table);
        session.source = Some(source);
        Ok(session)
    }

    /// The normalized input table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Where the table was loaded from, if it came from a file.
    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    /// The last summary created.
    pub fn summary(&self) -> Option<&SummaryOutput> {
        self.summary.as_ref()
    }

    /// The last report generated.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Filter tokens available for the loaded table.
    pub fn filter_options(&self) -> Vec<String> {
        self.table.filter_options()
    }

    /// Compute a new summary, replacing the previous one on success.
    ///
    /// A new summary invalidates any report generated from the old one.
    pub fn create_summary(&mut self, spec: SummarySpec) -> Result<&SummaryOutput> {
        let output = match summarize(&self.table, &spec) {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "summary not created");
                return Err(e);
            }
        };

        self.report = None;
        Ok(self.summary.insert(output))
    }

    /// Group keys of the current summary, sorted; empty before any summary.
    pub fn group_options(&self) -> Vec<GroupKey> {
        self.summary
            .as_ref()
            .map(|output| output.summary.groups())
            .unwrap_or_default()
    }

    /// Context a report over `selection` would be generated from.
    pub fn report_context(&self, selection: &ReportSelection) -> Result<ReportContext> {
        let output = self.require_summary()?;
        ReportContext::from_summary(output, selection)
    }

    /// Generate a narrative report over the current summary.
    ///
    /// The summary is never modified; the previous report is kept if the
    /// provider fails.
    pub fn generate_report(
        &mut self,
        provider: &dyn LlmProvider,
        selection: ReportSelection,
    ) -> Result<&Report> {
        let context = self.report_context(&selection)?;

        info!(
            provider = provider.name(),
            model = %provider.config().model,
            rows = context.row_count,
            "generating report"
        );

        let text = match provider.generate_report(&context) {
            Ok(text) => text,
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "report generation failed");
                return Err(e);
            }
        };

        let report = Report {
            text,
            selection,
            provider: provider.name().to_string(),
            model: provider.config().model.clone(),
            generated_at: Utc::now(),
        };
        Ok(self.report.insert(report))
    }

    fn require_summary(&self) -> Result<&SummaryOutput> {
        self.summary
            .as_ref()
            .ok_or_else(|| CaseGroupsError::Config("no summary has been created yet".to_string()))
    }
}
