//! Composite scoring engine combining skill extraction and semantic similarity

use crate::error::{FitScorerError, Result};
use crate::processing::embeddings::SemanticScorer;
use crate::processing::skill_extractor::{MatchingMode, SkillExtractor};
use crate::processing::text_processor::TextProcessor;
use crate::taxonomy::TaxonomyIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Named formula used to combine the three component scores.
///
/// Both formulas are kept as explicit, selectable policies; which one is
/// right for a given deployment is a product decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingStrategy {
    /// Weighted average; a zero semantic score cannot zero out the result.
    AdditiveWeighted,
    /// Semantic similarity acts as a multiplicative relevance gate over the
    /// skill-based base score.
    SemanticGated,
}

impl WeightingStrategy {
    pub fn combine(&self, technical: f32, behavioral: f32, semantic: f32) -> f32 {
        match self {
            WeightingStrategy::AdditiveWeighted => {
                0.45 * technical + 0.35 * semantic + 0.20 * behavioral
            }
            WeightingStrategy::SemanticGated => {
                let base = 0.7 * technical + 0.3 * behavioral;
                base * (semantic / 100.0)
            }
        }
    }
}

impl fmt::Display for WeightingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightingStrategy::AdditiveWeighted => write!(f, "additive_weighted"),
            WeightingStrategy::SemanticGated => write!(f, "semantic_gated"),
        }
    }
}

/// Final compatibility report for one (resume, job) pair.
///
/// Scores are in [0, 100] and rounded to 2 decimals; skill lists are sorted
/// and distinct. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score_overall: f32,
    pub score_technical: f32,
    pub score_behavioral: f32,
    pub score_semantic: f32,
    pub technical_skills_matched: Vec<String>,
    pub behavioral_skills_matched: Vec<String>,
    pub technical_skills_missing: Vec<String>,
}

/// Operational status of the constructed engine, so callers can tell when
/// precision is reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub matching_mode: MatchingMode,
    pub semantic_degraded: bool,
}

/// Orchestrates extraction, set algebra, semantic similarity, and score
/// aggregation. All collaborators are injected once at construction and
/// shared read-only across calls; `analyze` keeps no state between calls.
pub struct AnalysisEngine {
    taxonomy: TaxonomyIndex,
    processor: TextProcessor,
    extractor: Box<dyn SkillExtractor>,
    semantic: SemanticScorer,
}

impl AnalysisEngine {
    pub fn new(
        taxonomy: TaxonomyIndex,
        processor: TextProcessor,
        extractor: Box<dyn SkillExtractor>,
        semantic: SemanticScorer,
    ) -> Self {
        Self {
            taxonomy,
            processor,
            extractor,
            semantic,
        }
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            matching_mode: self.extractor.mode(),
            semantic_degraded: self.semantic.is_degraded(),
        }
    }

    pub fn taxonomy(&self) -> &TaxonomyIndex {
        &self.taxonomy
    }

    /// Score a resume against a job posting.
    ///
    /// Fails with `InvalidInput` when either text is empty after
    /// normalization; degraded collaborators never cause an error here.
    pub fn analyze(
        &self,
        resume_text: &str,
        job_text: &str,
        strategy: WeightingStrategy,
    ) -> Result<AnalysisResult> {
        let resume_norm = self.processor.normalize(resume_text);
        let job_norm = self.processor.normalize(job_text);

        if resume_norm.trim().is_empty() {
            return Err(FitScorerError::InvalidInput(
                "Resume text is empty after normalization".to_string(),
            ));
        }
        if job_norm.trim().is_empty() {
            return Err(FitScorerError::InvalidInput(
                "Job posting text is empty after normalization".to_string(),
            ));
        }

        let technical = self.taxonomy.all_technical_skills();
        let behavioral = self.taxonomy.all_behavioral_skills();

        let job_technical = self.extractor.extract(&job_norm, technical);
        let resume_technical = self.extractor.extract(&resume_norm, technical);
        let job_behavioral = self.extractor.extract(&job_norm, behavioral);
        let resume_behavioral = self.extractor.extract(&resume_norm, behavioral);

        let matched_technical: HashSet<String> = job_technical
            .intersection(&resume_technical)
            .cloned()
            .collect();
        let missing_technical: HashSet<String> = job_technical
            .difference(&matched_technical)
            .cloned()
            .collect();
        let matched_behavioral: HashSet<String> = job_behavioral
            .intersection(&resume_behavioral)
            .cloned()
            .collect();

        log::debug!(
            "Job names {} technical / {} behavioral skills; resume covers {} / {}",
            job_technical.len(),
            job_behavioral.len(),
            matched_technical.len(),
            matched_behavioral.len()
        );

        let score_technical = coverage_ratio(matched_technical.len(), job_technical.len());
        let score_behavioral = coverage_ratio(matched_behavioral.len(), job_behavioral.len());
        let score_semantic = self
            .semantic
            .similarity(&self.processor, resume_text, job_text);
        let score_overall = strategy.combine(score_technical, score_behavioral, score_semantic);

        Ok(AnalysisResult {
            score_overall: round2(score_overall),
            score_technical: round2(score_technical),
            score_behavioral: round2(score_behavioral),
            score_semantic: round2(score_semantic),
            technical_skills_matched: sorted(matched_technical),
            behavioral_skills_matched: sorted(matched_behavioral),
            technical_skills_missing: sorted(missing_technical),
        })
    }
}

/// Percentage of `total` covered by `matched`; an empty denominator scores
/// 0, never 100 and never a division error.
fn coverage_ratio(matched: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        matched as f32 / total as f32 * 100.0
    }
}

/// Rounding happens only at the output boundary, never mid-computation.
fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

fn sorted(set: HashSet<String>) -> Vec<String> {
    let mut skills: Vec<String> = set.into_iter().collect();
    skills.sort();
    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::embeddings::SentenceEncoder;
    use crate::processing::skill_extractor::PhraseMatchExtractor;

    /// Deterministic bag-of-words encoder: identical texts hash to identical
    /// vectors, disjoint texts to near-orthogonal ones.
    struct HashingEncoder;

    impl SentenceEncoder for HashingEncoder {
        fn encode(&self, text: &str) -> Vec<f32> {
            let mut vector = vec![0.0f32; 64];
            for token in text.split_whitespace() {
                let mut hash: u64 = 0xcbf29ce484222325;
                for byte in token.bytes() {
                    hash ^= byte as u64;
                    hash = hash.wrapping_mul(0x100000001b3);
                }
                vector[(hash % 64) as usize] += 1.0;
            }
            vector
        }
    }

    fn engine(semantic: SemanticScorer) -> AnalysisEngine {
        let config = Config::default();
        let processor = TextProcessor::with_default_stopwords();
        let taxonomy = TaxonomyIndex::from_config(&config.taxonomy, &processor).unwrap();
        AnalysisEngine::new(
            taxonomy,
            processor,
            Box::new(PhraseMatchExtractor::new()),
            semantic,
        )
    }

    #[test]
    fn test_full_technical_match_scenario() {
        let engine = engine(SemanticScorer::Degraded);
        let result = engine
            .analyze(
                "Desenvolvi em Python e Docker",
                "Precisamos de um desenvolvedor Python com Docker",
                WeightingStrategy::AdditiveWeighted,
            )
            .unwrap();

        assert_eq!(result.technical_skills_matched, vec!["docker", "python"]);
        assert!(result.technical_skills_missing.is_empty());
        assert_eq!(result.score_technical, 100.0);
        assert_eq!(result.score_behavioral, 0.0);
        assert_eq!(result.score_semantic, 0.0);
        assert_eq!(result.score_overall, 45.0);
    }

    #[test]
    fn test_job_without_technical_skills_scores_zero() {
        let engine = engine(SemanticScorer::Degraded);
        let result = engine
            .analyze(
                "Experiência com Python e Docker",
                "Vaga para analista financeiro",
                WeightingStrategy::AdditiveWeighted,
            )
            .unwrap();

        assert_eq!(result.score_technical, 0.0);
        assert!(result.technical_skills_matched.is_empty());
        assert!(result.technical_skills_missing.is_empty());
    }

    #[test]
    fn test_matched_is_exact_intersection_and_missing_is_difference() {
        let engine = engine(SemanticScorer::Degraded);
        let result = engine
            .analyze(
                "Sei Python e um pouco de SQL",
                "Buscamos Python, Docker e Kubernetes",
                WeightingStrategy::AdditiveWeighted,
            )
            .unwrap();

        assert_eq!(result.technical_skills_matched, vec!["python"]);
        assert_eq!(result.technical_skills_missing, vec!["docker", "kubernetes"]);
        assert_eq!(result.score_technical, 33.33);
    }

    #[test]
    fn test_behavioral_scoring() {
        let engine = engine(SemanticScorer::Degraded);
        let result = engine
            .analyze(
                "Forte em trabalho em equipe e comunicacao",
                "Exigimos trabalho em equipe, comunicacao e lideranca",
                WeightingStrategy::AdditiveWeighted,
            )
            .unwrap();

        assert_eq!(
            result.behavioral_skills_matched,
            vec!["comunicacao", "trabalho em equipe"]
        );
        assert_eq!(result.score_behavioral, 66.67);
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let engine = engine(SemanticScorer::Degraded);

        let result = engine.analyze("", "Vaga Python", WeightingStrategy::AdditiveWeighted);
        assert!(matches!(result, Err(FitScorerError::InvalidInput(_))));

        let result = engine.analyze("Python", "  !!! ", WeightingStrategy::AdditiveWeighted);
        assert!(matches!(result, Err(FitScorerError::InvalidInput(_))));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let engine = engine(SemanticScorer::full(Box::new(HashingEncoder)));
        let resume = "Desenvolvi em Python, Docker e AWS com trabalho em equipe";
        let job = "Vaga Python com Docker, Kubernetes e lideranca";

        let first = engine
            .analyze(resume, job, WeightingStrategy::SemanticGated)
            .unwrap();
        let second = engine
            .analyze(resume, job, WeightingStrategy::SemanticGated)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_texts_gated_equals_base() {
        let engine = engine(SemanticScorer::full(Box::new(HashingEncoder)));
        let text = "Desenvolvedor Python com Docker e lideranca";

        let result = engine
            .analyze(text, text, WeightingStrategy::SemanticGated)
            .unwrap();

        assert_eq!(result.score_semantic, 100.0);
        let base = 0.7 * result.score_technical + 0.3 * result.score_behavioral;
        assert_eq!(result.score_overall, round2(base));
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let engine = engine(SemanticScorer::full(Box::new(HashingEncoder)));
        let cases = [
            ("Desenvolvi em Python e Docker", "Python Docker AWS SQL"),
            ("Nada relacionado aqui", "Vaga Python"),
            ("trabalho em equipe", "trabalho em equipe e python"),
        ];

        for (resume, job) in cases {
            for strategy in [
                WeightingStrategy::AdditiveWeighted,
                WeightingStrategy::SemanticGated,
            ] {
                let result = engine.analyze(resume, job, strategy).unwrap();
                for score in [
                    result.score_overall,
                    result.score_technical,
                    result.score_behavioral,
                    result.score_semantic,
                ] {
                    assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
                }
            }
        }
    }

    #[test]
    fn test_additive_zero_semantic_does_not_zero_result() {
        let result = WeightingStrategy::AdditiveWeighted.combine(100.0, 100.0, 0.0);
        assert!(result > 0.0);
        assert!((result - 65.0).abs() < 1e-4);
    }

    #[test]
    fn test_gated_zero_semantic_suppresses_result() {
        let result = WeightingStrategy::SemanticGated.combine(100.0, 100.0, 0.0);
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_coverage_ratio_zero_denominator() {
        assert_eq!(coverage_ratio(0, 0), 0.0);
        assert_eq!(coverage_ratio(3, 0), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(100.0), 100.0);
    }
}
