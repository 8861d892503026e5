//! Fit scorer library: resume vs. job-posting compatibility scoring

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod taxonomy;

pub use config::Config;
pub use error::{FitScorerError, Result};
pub use processing::analyzer::{AnalysisEngine, AnalysisResult, WeightingStrategy};
pub use taxonomy::TaxonomyIndex;
