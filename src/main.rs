//! Fit scorer: explainable resume and job-posting compatibility scoring

use chrono::Utc;
use clap::Parser;
use fit_scorer::cli::{self, Cli, Commands, ConfigAction};
use fit_scorer::config::Config;
use fit_scorer::error::{FitScorerError, Result};
use fit_scorer::input::manager::InputManager;
use fit_scorer::output::report::{render_report, ScoredReport};
use fit_scorer::processing::analyzer::AnalysisEngine;
use fit_scorer::processing::embeddings::{Model2VecEncoder, SemanticScorer};
use fit_scorer::processing::skill_extractor::{
    MatchingMode, PhraseMatchExtractor, SkillExtractor, SubstringExtractor,
};
use fit_scorer::processing::text_processor::TextProcessor;
use fit_scorer::taxonomy::TaxonomyIndex;
use log::{error, info, warn};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            strategy,
            output,
            save,
            detailed,
            no_embeddings,
            substring_match,
        } => {
            info!("Starting fit analysis");

            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| FitScorerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["pdf", "txt", "md"])
                .map_err(|e| FitScorerError::InvalidInput(format!("Job posting file: {}", e)))?;

            let output_format =
                cli::parse_output_format(&output).map_err(FitScorerError::InvalidInput)?;

            let strategy = match strategy {
                Some(name) => cli::parse_strategy(&name).map_err(FitScorerError::InvalidInput)?,
                None => config.scoring.strategy,
            };

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;
            info!(
                "Extracted {} chars from resume, {} from job posting",
                resume_text.len(),
                job_text.len()
            );

            let engine = build_engine(&config, no_embeddings, substring_match)?;
            let status = engine.status();
            info!(
                "Engine ready: {} matching, semantic {}",
                status.matching_mode,
                if status.semantic_degraded {
                    "degraded"
                } else {
                    "enabled"
                }
            );

            let analysis = engine.analyze(&resume_text, &job_text, strategy)?;

            let report = ScoredReport {
                analysis,
                status,
                strategy,
                resume_path: resume.to_string_lossy().to_string(),
                job_path: job.to_string_lossy().to_string(),
                generated_at: Utc::now(),
            };

            let detailed = detailed || config.output.detailed;
            let rendered =
                render_report(&report, output_format, detailed, config.output.color_output)?;
            println!("{}", rendered);

            if let Some(save_path) = save {
                std::fs::write(&save_path, &rendered)?;
                info!("Report saved to {}", save_path.display());
            }
        }

        Commands::Taxonomy => {
            let processor = build_processor(&config);
            let taxonomy = TaxonomyIndex::from_config(&config.taxonomy, &processor)?;

            println!("Skill taxonomy ({} phrases)\n", taxonomy.skill_count());
            for (name, skills) in taxonomy.categories() {
                let marker = if name == taxonomy.behavioral_category() {
                    " (behavioral)"
                } else {
                    ""
                };
                println!("{}{}:", name, marker);
                for skill in skills {
                    println!("  - {}", skill);
                }
                println!();
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Current configuration\n");
                println!("Behavioral category: {}", config.taxonomy.behavioral_category);
                println!("Categories: {}", config.taxonomy.categories.len());
                println!("Stopwords: {}", config.stopwords.words.len());
                println!("Matching mode: {}", config.processing.matching_mode);
                println!("Strategy: {}", config.scoring.strategy);
                println!("Embedding model: {}", config.models.embedding_model);
                println!("Embeddings enabled: {}", config.models.enable_embeddings);
            }

            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}

fn build_processor(config: &Config) -> TextProcessor {
    TextProcessor::new(config.stopwords.words.iter().cloned().collect())
}

/// Wire taxonomy, extractor, and encoder into an engine.
///
/// Degraded variants are selected here, once, at startup: substring matching
/// only when requested, the no-embedding scorer when embeddings are disabled
/// or the model cannot be loaded.
fn build_engine(
    config: &Config,
    no_embeddings: bool,
    substring_match: bool,
) -> Result<AnalysisEngine> {
    let processor = build_processor(config);
    let taxonomy = TaxonomyIndex::from_config(&config.taxonomy, &processor)?;

    let matching_mode = if substring_match {
        MatchingMode::Substring
    } else {
        config.processing.matching_mode
    };
    let extractor: Box<dyn SkillExtractor> = match matching_mode {
        MatchingMode::Phrase => Box::new(PhraseMatchExtractor::new()),
        MatchingMode::Substring => Box::new(SubstringExtractor::new(taxonomy.all_skills())?),
    };

    let semantic = if no_embeddings || !config.models.enable_embeddings {
        SemanticScorer::degraded()
    } else {
        let model_path = config.embedding_model_path();
        match Model2VecEncoder::load(&model_path) {
            Ok(encoder) => SemanticScorer::full(Box::new(encoder)),
            Err(e) => {
                warn!(
                    "Embedding model unavailable at {}: {}",
                    model_path.display(),
                    e
                );
                SemanticScorer::degraded()
            }
        }
    };

    Ok(AnalysisEngine::new(
        taxonomy,
        processor,
        extractor,
        semantic,
    ))
}
