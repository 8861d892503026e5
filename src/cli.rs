//! CLI interface for the fit scorer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fit-scorer")]
#[command(about = "Explainable resume and job-posting compatibility scoring")]
#[command(
    long_about = "Compare a resume against a job posting and produce technical, behavioral, semantic, and composite fit scores with the matched and missing skills"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job posting
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job posting file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Weighting strategy: additive or gated
        #[arg(short, long)]
        strategy: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save the rendered report to a file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Output detailed report
        #[arg(short, long)]
        detailed: bool,

        /// Skip loading the embedding model (semantic score becomes 0)
        #[arg(long)]
        no_embeddings: bool,

        /// Use degraded substring matching instead of phrase matching
        #[arg(long)]
        substring_match: bool,
    },

    /// List the loaded skill taxonomy
    Taxonomy,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Parse and validate weighting strategy
pub fn parse_strategy(
    strategy: &str,
) -> Result<crate::processing::analyzer::WeightingStrategy, String> {
    match strategy.to_lowercase().as_str() {
        "additive" | "additive_weighted" => {
            Ok(crate::processing::analyzer::WeightingStrategy::AdditiveWeighted)
        }
        "gated" | "semantic_gated" => {
            Ok(crate::processing::analyzer::WeightingStrategy::SemanticGated)
        }
        _ => Err(format!(
            "Invalid strategy: {}. Supported: additive, gated",
            strategy
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
