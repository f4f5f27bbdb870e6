//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use proprel_domain::{CompatibilityType, Issue, Recommendation, ValidationResult};
use proprel_server::wire::{ApiResponse, CorpusStatsDto, RecommendResultDto, ValidationResultDto};
use proprel_store::CorpusStats;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a validation result.
    pub fn format_validation(&self, result: &ValidationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&ApiResponse::ok(
                ValidationResultDto::from(result),
            ))?),
            OutputFormat::Text => Ok(self.validation_text(result)),
        }
    }

    /// Format ranked recommendations.
    pub fn format_recommendations(&self, recommendations: &[Recommendation]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&ApiResponse::ok(
                RecommendResultDto::from(recommendations),
            ))?),
            OutputFormat::Text if recommendations.is_empty() => {
                Ok(self.warning("No value clears the support threshold."))
            }
            OutputFormat::Text => Ok(recommendations_table(recommendations)),
        }
    }

    /// Format corpus figures.
    pub fn format_stats(&self, stats: &CorpusStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&ApiResponse::ok(
                CorpusStatsDto::from(stats),
            ))?),
            OutputFormat::Text => {
                let mut builder = Builder::default();
                builder.push_record(["Material", "Rules", "Properties"]);
                for (material, figures) in &stats.materials {
                    builder.push_record([
                        material.clone(),
                        figures.relationships.to_string(),
                        figures.properties.to_string(),
                    ]);
                }

                let summary = self.success(&format!(
                    "Corpus OK: {} rule(s) across {} material type(s)",
                    stats.relationship_count,
                    stats.materials.len()
                ));
                Ok(format!("{}\n{}", styled(builder), summary))
            }
        }
    }

    /// Format a failure: the error envelope in JSON mode, a message otherwise.
    pub fn format_failure(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&ApiResponse::<()>::failure(message))
                .unwrap_or_else(|_| format!("{{\"success\":false,\"error\":{:?}}}", message)),
            OutputFormat::Text => self.error(message),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn validation_text(&self, result: &ValidationResult) -> String {
        if result.is_clean() {
            return self.success("No issues found.");
        }

        let mut sections = Vec::new();
        if result.issues.is_empty() {
            sections.push(self.success("No issues found."));
        } else {
            sections.push(self.issues_table(&result.issues));
            sections.push(self.severity_summary(result));
        }

        if !result.recommendations.is_empty() {
            sections.push(format!(
                "{}\n{}",
                self.colorize("Suggested improvements:", "cyan"),
                recommendations_table(&result.recommendations)
            ));
        }

        sections.join("\n")
    }

    fn issues_table(&self, issues: &[Issue]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Severity", "Source", "Target", "Reason"]);

        for issue in issues {
            let severity = match issue.compatibility {
                CompatibilityType::Incompatible => self.colorize(issue.compatibility.as_str(), "red"),
                _ => self.colorize(issue.compatibility.as_str(), "yellow"),
            };
            builder.push_record([
                severity,
                format!("{}={}", issue.source_property, issue.source_value),
                format!("{}={}", issue.target_property, issue.target_value),
                issue.reason.clone(),
            ]);
        }

        styled(builder)
    }

    fn severity_summary(&self, result: &ValidationResult) -> String {
        let incompatible = result.incompatible_count();
        let discouraged = result.issues.len() - incompatible;
        let message = format!(
            "{} incompatible, {} not recommended",
            incompatible, discouraged
        );
        if incompatible > 0 {
            self.error(&message)
        } else {
            self.warning(&message)
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn recommendations_table(recommendations: &[Recommendation]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Property", "Value", "Confidence", "Reason"]);

    for rec in recommendations {
        builder.push_record([
            rec.property.clone(),
            rec.recommended_value.to_string(),
            rec.confidence.to_string(),
            rec.reason.clone(),
        ]);
    }

    styled(builder)
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proprel_domain::{Confidence, PropertyValue, Relationship};
    use proprel_store::MaterialStats;
    use std::collections::BTreeMap;

    fn glossy_fabric() -> ValidationResult {
        let rule = Relationship::new(
            "tile",
            ("finish", "glossy"),
            ("material", "fabric"),
            CompatibilityType::Incompatible,
            "fabric cannot be glossy-finished",
        )
        .unwrap();
        ValidationResult {
            issues: vec![Issue::from_relationship(&rule)],
            recommendations: vec![Recommendation {
                property: "finish".to_string(),
                recommended_value: PropertyValue::from("matte"),
                confidence: Confidence::clamped(0.9),
                score: 0.9,
                reason: "Compatible with material=fabric".to_string(),
            }],
        }
    }

    #[test]
    fn test_text_validation() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_validation(&glossy_fabric()).unwrap();

        assert!(output.contains("INCOMPATIBLE"));
        assert!(output.contains("finish=glossy"));
        assert!(output.contains("fabric cannot be glossy-finished"));
        assert!(output.contains("1 incompatible, 0 not recommended"));
        assert!(output.contains("Suggested improvements:"));
        assert!(output.contains("0.90"));
    }

    #[test]
    fn test_json_validation_is_envelope() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_validation(&glossy_fabric()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["success"], serde_json::json!(true));
        assert_eq!(
            value["result"]["issues"][0]["compatibilityType"],
            serde_json::json!("INCOMPATIBLE")
        );
    }

    #[test]
    fn test_clean_result() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_validation(&ValidationResult::empty()).unwrap();
        assert_eq!(output, "✓ No issues found.");
    }

    #[test]
    fn test_empty_recommendations() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_recommendations(&[]).unwrap();
        assert!(output.contains("No value clears the support threshold"));
    }

    #[test]
    fn test_stats_table() {
        let mut materials = BTreeMap::new();
        materials.insert(
            "tile".to_string(),
            MaterialStats {
                relationships: 3,
                properties: 2,
            },
        );
        let stats = CorpusStats {
            version: 1,
            relationship_count: 3,
            materials,
        };

        let output = Formatter::new(OutputFormat::Text, false).format_stats(&stats).unwrap();
        assert!(output.contains("Material"));
        assert!(output.contains("tile"));
        assert!(output.contains("3 rule(s) across 1 material type(s)"));
    }

    #[test]
    fn test_failure_formats() {
        let text = Formatter::new(OutputFormat::Text, false).format_failure("boom");
        assert_eq!(text, "✗ boom");

        let json = Formatter::new(OutputFormat::Json, false).format_failure("boom");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
