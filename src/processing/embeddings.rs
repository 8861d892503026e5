//! Sentence embeddings and semantic similarity scoring

use crate::error::{FitScorerError, Result};
use crate::processing::text_processor::TextProcessor;
use model2vec_rs::model::StaticModel;
use std::path::Path;

/// Injected embedding capability: turns a cleaned text into a dense vector.
pub trait SentenceEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Vec<f32>;
}

/// Model2Vec static embeddings, loaded once at startup.
pub struct Model2VecEncoder {
    model: StaticModel,
}

impl Model2VecEncoder {
    pub fn load(model_path: &Path) -> Result<Self> {
        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| FitScorerError::Embedding(format!("Failed to load model: {}", e)))?;

        Ok(Self { model })
    }
}

impl SentenceEncoder for Model2VecEncoder {
    fn encode(&self, text: &str) -> Vec<f32> {
        self.model.encode_single(text)
    }
}

/// Cosine similarity with zero-norm and dimension guards; never divides by
/// zero, mismatched or empty vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Semantic similarity between two texts, scaled to [0, 100].
///
/// The variant is fixed at construction: `Full` carries an encoder,
/// `Degraded` scores every pair 0.0 so the rest of the pipeline stays
/// usable when no embedding model is available.
pub enum SemanticScorer {
    Full { encoder: Box<dyn SentenceEncoder> },
    Degraded,
}

impl SemanticScorer {
    pub fn full(encoder: Box<dyn SentenceEncoder>) -> Self {
        Self::Full { encoder }
    }

    pub fn degraded() -> Self {
        log::warn!("No embedding model available; semantic scores will be 0");
        Self::Degraded
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded)
    }

    /// Normalize, strip stopwords, encode, and compare.
    ///
    /// Negative cosine is floored at 0 before scaling by 100.
    pub fn similarity(&self, processor: &TextProcessor, text1: &str, text2: &str) -> f32 {
        let encoder = match self {
            Self::Full { encoder } => encoder,
            Self::Degraded => return 0.0,
        };

        let cleaned1 = processor.remove_stopwords(&processor.normalize(text1));
        let cleaned2 = processor.remove_stopwords(&processor.normalize(text2));

        let embedding1 = encoder.encode(&cleaned1);
        let embedding2 = encoder.encode(&cleaned2);

        cosine_similarity(&embedding1, &embedding2).max(0.0) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEncoder(Vec<f32>);

    impl SentenceEncoder for FixedEncoder {
        fn encode(&self, _text: &str) -> Vec<f32> {
            self.0.clone()
        }
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let v = vec![0.5, 0.25, 1.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_opposite_vectors() {
        let a = vec![1.0, 2.0];
        let b = vec![-1.0, -2.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_norm_guard() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_dimension_mismatch() {
        let a = vec![1.0];
        let b = vec![1.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_degraded_scorer_returns_zero() {
        let processor = TextProcessor::with_default_stopwords();
        let scorer = SemanticScorer::Degraded;

        assert_eq!(scorer.similarity(&processor, "python", "python"), 0.0);
        assert!(scorer.is_degraded());
    }

    #[test]
    fn test_negative_cosine_floored_at_zero() {
        let processor = TextProcessor::with_default_stopwords();

        let scorer = SemanticScorer::full(Box::new(FixedEncoder(vec![1.0, 0.0])));
        assert!(!scorer.is_degraded());

        let score = scorer.similarity(&processor, "texto um", "texto dois");
        assert!((score - 100.0).abs() < 1e-3);

        assert_eq!(cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).max(0.0) * 100.0, 0.0);
    }
}
