//! Configuration management for the fit scorer

use crate::error::{FitScorerError, Result};
use crate::processing::analyzer::WeightingStrategy;
use crate::processing::skill_extractor::MatchingMode;
use crate::processing::text_processor::default_stopwords;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub taxonomy: TaxonomyConfig,
    pub stopwords: StopwordConfig,
    pub models: ModelConfig,
    pub processing: ProcessingConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

/// Static catalog of skill categories. One category is designated
/// behavioral; every other category counts toward the technical universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    pub behavioral_category: String,
    pub categories: BTreeMap<String, SkillCategoryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategoryConfig {
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopwordConfig {
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub embedding_model: String,
    pub enable_embeddings: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub matching_mode: MatchingMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub strategy: WeightingStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fit-scorer")
            .join("models");

        Self {
            taxonomy: default_taxonomy(),
            stopwords: StopwordConfig {
                words: default_stopwords().iter().map(|s| s.to_string()).collect(),
            },
            models: ModelConfig {
                models_dir,
                embedding_model: "minishlab/M2V_base_output".to_string(),
                enable_embeddings: true,
            },
            processing: ProcessingConfig {
                matching_mode: MatchingMode::Phrase,
            },
            scoring: ScoringConfig {
                strategy: WeightingStrategy::AdditiveWeighted,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| FitScorerError::Configuration(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| FitScorerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("fit-scorer")
            .join("config.toml")
    }

    /// Location of the configured embedding model: an existing path is used
    /// as-is, anything else resolves under the models directory.
    pub fn embedding_model_path(&self) -> PathBuf {
        let direct = PathBuf::from(&self.models.embedding_model);
        if direct.exists() {
            return direct;
        }
        self.models.models_dir.join(&self.models.embedding_model)
    }
}

/// The default taxonomy shipped with the tool: a Portuguese-language
/// technology catalog with behavioral skills and action verbs.
fn default_taxonomy() -> TaxonomyConfig {
    let mut categories = BTreeMap::new();

    categories.insert(
        "technology".to_string(),
        SkillCategoryConfig {
            skills: [
                "python", "java", "javascript", "go", "c#", "react", "angular", "vue.js",
                "node.js", "spring", "django", "flask", "express", "sql", "nosql",
                "postgresql", "mongodb", "mysql", "aws", "azure", "google cloud", "docker",
                "kubernetes", "git", "agile", "scrum", "kanban", "devops", "ci/cd",
                "machine learning", "ia", "inteligencia artificial", "analise de dados",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        },
    );

    categories.insert(
        "action_verbs".to_string(),
        SkillCategoryConfig {
            skills: [
                "desenvolveu", "implementou", "otimizou", "automatizou", "projetou",
                "integrou", "migrou", "liderou", "criou", "gerenciou",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        },
    );

    categories.insert(
        "behavioral".to_string(),
        SkillCategoryConfig {
            skills: [
                "proatividade", "colaboracao", "resolucao de problemas", "comunicacao",
                "lideranca", "adaptabilidade", "trabalho em equipe", "flexibilidade",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        },
    );

    TaxonomyConfig {
        behavioral_category: "behavioral".to_string(),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_behavioral_category() {
        let config = Config::default();
        assert!(config
            .taxonomy
            .categories
            .contains_key(&config.taxonomy.behavioral_category));
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.taxonomy.behavioral_category, "behavioral");
        assert_eq!(parsed.scoring.strategy, WeightingStrategy::AdditiveWeighted);
        assert_eq!(parsed.processing.matching_mode, MatchingMode::Phrase);
        assert_eq!(
            parsed.taxonomy.categories.len(),
            config.taxonomy.categories.len()
        );
    }

    #[test]
    fn test_load_from_file() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, serialized).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.stopwords.words.len(), config.stopwords.words.len());
    }
}
