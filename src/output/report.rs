//! Formatters for the analysis report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::analyzer::{AnalysisResult, EngineStatus, WeightingStrategy};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Analysis result plus the context a reader needs to interpret it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredReport {
    pub analysis: AnalysisResult,
    pub status: EngineStatus,
    pub strategy: WeightingStrategy,
    pub resume_path: String,
    pub job_path: String,
    pub generated_at: DateTime<Utc>,
}

pub trait ReportFormatter {
    fn format_report(&self, report: &ScoredReport) -> Result<String>;
}

/// Render with the formatter matching the requested output format.
pub fn render_report(
    report: &ScoredReport,
    format: OutputFormat,
    detailed: bool,
    color_output: bool,
) -> Result<String> {
    match format {
        OutputFormat::Console => ConsoleFormatter::new(color_output, detailed).format_report(report),
        OutputFormat::Json => JsonFormatter::new(true).format_report(report),
        OutputFormat::Markdown => MarkdownFormatter.format_report(report),
    }
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn score_line(&self, label: &str, score: f32) -> String {
        let value = format!("{:.2}%", score);
        let value = if !self.use_colors {
            value
        } else if score >= 75.0 {
            value.green().to_string()
        } else if score >= 40.0 {
            value.yellow().to_string()
        } else {
            value.red().to_string()
        };
        format!("  {:<22} {}", label, value)
    }

    fn skill_list(&self, label: &str, skills: &[String]) -> String {
        if skills.is_empty() {
            format!("  {}: none", label)
        } else {
            format!("  {}: {}", label, skills.join(", "))
        }
    }
}

impl ReportFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoredReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut lines = Vec::new();

        let title = "Fit analysis";
        lines.push(if self.use_colors {
            title.bold().to_string()
        } else {
            title.to_string()
        });
        lines.push(format!("  Resume: {}", report.resume_path));
        lines.push(format!("  Job posting: {}", report.job_path));
        lines.push(format!("  Strategy: {}", report.strategy));
        lines.push(String::new());

        lines.push(self.score_line("Overall score", analysis.score_overall));
        lines.push(self.score_line("Technical skills", analysis.score_technical));
        lines.push(self.score_line("Behavioral skills", analysis.score_behavioral));
        lines.push(self.score_line("Semantic similarity", analysis.score_semantic));
        lines.push(String::new());

        lines.push(self.skill_list(
            "Technical matched",
            &analysis.technical_skills_matched,
        ));
        lines.push(self.skill_list(
            "Technical missing",
            &analysis.technical_skills_missing,
        ));
        lines.push(self.skill_list(
            "Behavioral matched",
            &analysis.behavioral_skills_matched,
        ));

        if report.status.semantic_degraded {
            lines.push(String::new());
            let note = "Note: no embedding model loaded; semantic score is 0";
            lines.push(if self.use_colors {
                format!("  {}", note.yellow())
            } else {
                format!("  {}", note)
            });
        }

        if self.detailed {
            lines.push(String::new());
            lines.push(format!("  Matching mode: {}", report.status.matching_mode));
            lines.push(format!(
                "  Generated at: {}",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        Ok(lines.join("\n"))
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoredReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoredReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut out = String::new();

        out.push_str("# Fit Analysis Report\n\n");
        out.push_str(&format!("- **Resume**: {}\n", report.resume_path));
        out.push_str(&format!("- **Job posting**: {}\n", report.job_path));
        out.push_str(&format!("- **Strategy**: {}\n", report.strategy));
        out.push_str(&format!(
            "- **Generated**: {}\n\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        out.push_str("## Scores\n\n");
        out.push_str("| Component | Score |\n|---|---|\n");
        out.push_str(&format!("| Overall | {:.2}% |\n", analysis.score_overall));
        out.push_str(&format!("| Technical | {:.2}% |\n", analysis.score_technical));
        out.push_str(&format!("| Behavioral | {:.2}% |\n", analysis.score_behavioral));
        out.push_str(&format!("| Semantic | {:.2}% |\n\n", analysis.score_semantic));

        out.push_str("## Skills\n\n");
        push_skill_section(&mut out, "Technical matched", &analysis.technical_skills_matched);
        push_skill_section(&mut out, "Technical missing", &analysis.technical_skills_missing);
        push_skill_section(&mut out, "Behavioral matched", &analysis.behavioral_skills_matched);

        if report.status.semantic_degraded {
            out.push_str("> No embedding model loaded; the semantic component is 0.\n");
        }

        Ok(out)
    }
}

fn push_skill_section(out: &mut String, title: &str, skills: &[String]) {
    out.push_str(&format!("### {}\n\n", title));
    if skills.is_empty() {
        out.push_str("_none_\n\n");
    } else {
        for skill in skills {
            out.push_str(&format!("- {}\n", skill));
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::skill_extractor::MatchingMode;

    fn sample_report() -> ScoredReport {
        ScoredReport {
            analysis: AnalysisResult {
                score_overall: 45.0,
                score_technical: 100.0,
                score_behavioral: 0.0,
                score_semantic: 0.0,
                technical_skills_matched: vec!["docker".to_string(), "python".to_string()],
                behavioral_skills_matched: vec![],
                technical_skills_missing: vec![],
            },
            status: EngineStatus {
                matching_mode: MatchingMode::Phrase,
                semantic_degraded: true,
            },
            strategy: WeightingStrategy::AdditiveWeighted,
            resume_path: "resume.txt".to_string(),
            job_path: "job.txt".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_console_format_plain() {
        let report = sample_report();
        let rendered = ConsoleFormatter::new(false, false)
            .format_report(&report)
            .unwrap();

        assert!(rendered.contains("Overall score"));
        assert!(rendered.contains("45.00%"));
        assert!(rendered.contains("docker, python"));
        assert!(rendered.contains("semantic score is 0"));
    }

    #[test]
    fn test_json_format_round_trips() {
        let report = sample_report();
        let rendered = JsonFormatter::new(true).format_report(&report).unwrap();

        let parsed: ScoredReport = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.analysis, report.analysis);
    }

    #[test]
    fn test_markdown_format() {
        let report = sample_report();
        let rendered = MarkdownFormatter.format_report(&report).unwrap();

        assert!(rendered.starts_with("# Fit Analysis Report"));
        assert!(rendered.contains("| Technical | 100.00% |"));
        assert!(rendered.contains("- docker"));
        assert!(rendered.contains("_none_"));
    }
}
