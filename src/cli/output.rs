//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! run results to the user in various formats.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::reconciler::{EntryOutcome, ParameterStatus, PlanPreview, ReconcileSummary};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Plan outcome row for table display.
#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Plan")]
    plan: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Preview row for table display.
#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Plan")]
    plan: String,
    #[tabled(rename = "Parameter")]
    parameter: String,
}

/// Parameter row for table display.
#[derive(Tabled)]
struct ParameterRow {
    #[tabled(rename = "Parameter")]
    parameter: String,
    #[tabled(rename = "Plan ID")]
    value: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the summary of a provisioning run.
    #[must_use]
    pub fn format_summary(&self, summary: &ReconcileSummary) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Text => Self::format_summary_text(summary),
        }
    }

    /// Formats a summary as text.
    fn format_summary_text(summary: &ReconcileSummary) -> String {
        let mut output = String::new();

        let rows: Vec<OutcomeRow> = summary
            .outcomes
            .iter()
            .map(|outcome| OutcomeRow {
                plan: outcome.name().to_string(),
                result: Self::format_outcome(outcome),
                id: outcome.plan().map_or_else(|| "-".to_string(), |p| p.id.clone()),
            })
            .collect();

        if !rows.is_empty() {
            output.push_str(&Table::new(rows).to_string());
            output.push('\n');
        }

        let _ = write!(
            output,
            "\n{}\n📊 Summary ({}):\n   Created: {} plan(s)\n   Skipped: {} plan(s)\n   Failed:  {} plan(s)\n   Total:   {} plan(s)\n{}\n",
            "=".repeat(60),
            summary.environment,
            summary.created.to_string().green(),
            summary.skipped.to_string().yellow(),
            summary.failed.to_string().red(),
            summary.total,
            "=".repeat(60)
        );

        if !summary.persistence_failures.is_empty() {
            let _ = write!(output, "\n{} Parameter store errors:\n", "⚠".yellow());
            for failure in &summary.persistence_failures {
                let _ = writeln!(output, "   - {}: {}", failure.name, failure.error);
            }
            if summary.stored.is_empty() {
                output.push_str("   Plan IDs will need to be manually configured\n");
            }
        }

        if summary.is_success() {
            let _ = write!(
                output,
                "\n{} Subscription plans initialized successfully!\n",
                "✓".green()
            );
        } else {
            let _ = write!(output, "\n{} No plans were created or found\n", "✗".red());
        }

        output
    }

    /// Formats a single outcome label.
    fn format_outcome(outcome: &EntryOutcome) -> String {
        match outcome {
            EntryOutcome::Created { .. } => "created".green().to_string(),
            EntryOutcome::Skipped { .. } => "exists".yellow().to_string(),
            EntryOutcome::Failed { error, .. } => {
                format!("{} {}", "failed".red(), Self::truncate(error, 40))
            }
        }
    }

    /// Formats a dry-run preview.
    #[must_use]
    pub fn format_preview(&self, preview: &PlanPreview) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(preview).unwrap_or_default(),
            OutputFormat::Text => Self::format_preview_text(preview),
        }
    }

    /// Formats a preview as text.
    fn format_preview_text(preview: &PlanPreview) -> String {
        let mut output = String::new();

        let _ = write!(
            output,
            "\n📋 Plan for {} ({} existing plan(s) in Razorpay)\n\n",
            preview.environment, preview.remote_count
        );

        let rows: Vec<PreviewRow> = preview
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| PreviewRow {
                index: i + 1,
                action: if entry.create {
                    "+ create".green().to_string()
                } else {
                    format!(
                        "= exists ({})",
                        entry.plan_id.as_deref().unwrap_or_default()
                    )
                },
                plan: entry.name.clone(),
                parameter: entry.parameter.clone(),
            })
            .collect();

        if !rows.is_empty() {
            output.push_str(&Table::new(rows).to_string());
            output.push('\n');
        }

        let create_count = preview.create_count();
        if create_count == 0 {
            let _ = write!(
                output,
                "\n{} No changes required - all plans exist.\n",
                "✓".green()
            );
        } else {
            let _ = write!(
                output,
                "\nPlan: {} to create, {} already present\n",
                create_count.to_string().green(),
                (preview.entries.len() - create_count).to_string().yellow()
            );
        }

        output
    }

    /// Formats stored parameter values.
    #[must_use]
    pub fn format_status(&self, statuses: &[ParameterStatus]) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(statuses).unwrap_or_default(),
            OutputFormat::Text => Self::format_status_text(statuses),
        }
    }

    /// Formats parameter values as text.
    fn format_status_text(statuses: &[ParameterStatus]) -> String {
        let rows: Vec<ParameterRow> = statuses
            .iter()
            .map(|status| ParameterRow {
                parameter: status.parameter.clone(),
                value: match (&status.value, &status.error) {
                    (Some(value), _) => value.clone(),
                    (None, Some(error)) => format!("{} {}", "error".red(), Self::truncate(error, 40)),
                    (None, None) => "missing".yellow().to_string(),
                },
            })
            .collect();

        let mut output = Table::new(rows).to_string();
        output.push('\n');

        let missing = statuses.iter().filter(|s| s.value.is_none()).count();
        if missing > 0 {
            let _ = write!(
                output,
                "\n{} {missing} plan ID(s) not stored; run `tradeflow-plans run <environment>`\n",
                "⚠".yellow()
            );
        }

        output
    }

    /// Truncates a string to a maximum number of characters.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else {
            let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
            format!("{kept}...")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::razorpay::{RemoteItem, RemotePlan};
    use crate::reconciler::{PersistenceFailure, PreviewEntry};
    use uuid::Uuid;

    fn plan(id: &str, name: &str) -> RemotePlan {
        RemotePlan {
            id: id.to_string(),
            item: RemoteItem {
                name: name.to_string(),
                amount: 29900,
                currency: "USD".to_string(),
                description: None,
            },
            period: Some("monthly".to_string()),
            interval: Some(1),
        }
    }

    fn summary() -> ReconcileSummary {
        ReconcileSummary::new(
            Uuid::nil(),
            Environment::Dev,
            vec![
                EntryOutcome::Created {
                    plan: plan("plan_1", "TradeFlow Basic - Monthly"),
                },
                EntryOutcome::Failed {
                    name: "TradeFlow Basic - Yearly".to_string(),
                    error: "Razorpay API request failed: 400 - bad".to_string(),
                },
            ],
            vec![],
            vec![PersistenceFailure {
                name: "/tradeflow/dev/razorpay/plan/basic_monthly".to_string(),
                error: "denied".to_string(),
            }],
        )
    }

    #[test]
    fn test_summary_text_mentions_counts() {
        colored::control::set_override(false);
        let text = OutputFormatter::new(OutputFormat::Text).format_summary(&summary());
        assert!(text.contains("Created: 1 plan(s)"));
        assert!(text.contains("Failed:  1 plan(s)"));
        assert!(text.contains("manually configured"));
        assert!(text.contains("initialized successfully"));
    }

    #[test]
    fn test_summary_json_has_counts() {
        let json = OutputFormatter::new(OutputFormat::Json).format_summary(&summary());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["created"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["environment"], "dev");
        assert_eq!(value["outcomes"][0]["outcome"], "created");
        assert_eq!(value["outcomes"][1]["outcome"], "failed");
    }

    #[test]
    fn test_preview_text() {
        colored::control::set_override(false);
        let preview = PlanPreview {
            environment: Environment::Prod,
            remote_count: 1,
            entries: vec![PreviewEntry {
                name: "TradeFlow Pro - Yearly".to_string(),
                create: true,
                plan_id: None,
                parameter: "/tradeflow/prod/razorpay/plan/pro_yearly".to_string(),
            }],
        };
        let text = OutputFormatter::new(OutputFormat::Text).format_preview(&preview);
        assert!(text.contains("1 to create"));
        assert!(text.contains("/tradeflow/prod/razorpay/plan/pro_yearly"));
    }

    #[test]
    fn test_status_text_flags_missing() {
        colored::control::set_override(false);
        let statuses = vec![ParameterStatus {
            plan_name: "TradeFlow Pro - Yearly".to_string(),
            parameter: "/tradeflow/prod/razorpay/plan/pro_yearly".to_string(),
            value: None,
            error: None,
        }];
        let text = OutputFormatter::new(OutputFormat::Text).format_status(&statuses);
        assert!(text.contains("missing"));
        assert!(text.contains("1 plan ID(s) not stored"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(OutputFormatter::truncate("short", 10), "short");
        assert_eq!(OutputFormatter::truncate("a very long message", 10), "a very ...");
    }
}
