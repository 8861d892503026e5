//! Skill phrase extraction against the taxonomy

use aho_corasick::AhoCorasick;
use crate::error::{FitScorerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchingMode {
    /// Token-boundary phrase matching.
    Phrase,
    /// Plain substring containment; accepts false positives on collisions.
    Substring,
}

impl fmt::Display for MatchingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchingMode::Phrase => write!(f, "phrase"),
            MatchingMode::Substring => write!(f, "substring"),
        }
    }
}

/// Finds which candidate phrases occur in a normalized text.
///
/// The implementation is chosen once at startup; degraded precision is a
/// construction-time decision, never a runtime fallback.
pub trait SkillExtractor: Send + Sync {
    /// Subset of `candidates` present in `text`. Both sides must already be
    /// in normal form (see `TextProcessor::normalize`).
    fn extract(&self, text: &str, candidates: &HashSet<String>) -> HashSet<String>;

    fn mode(&self) -> MatchingMode;
}

/// Full-precision extractor: a candidate matches only as a contiguous run of
/// whole tokens, so "go" never matches inside "golang" and
/// "machine learning" requires both tokens adjacent.
pub struct PhraseMatchExtractor;

impl PhraseMatchExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PhraseMatchExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillExtractor for PhraseMatchExtractor {
    fn extract(&self, text: &str, candidates: &HashSet<String>) -> HashSet<String> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() || candidates.is_empty() {
            return HashSet::new();
        }

        // Index candidates by first token so each text position only checks
        // the phrases that could start there.
        let mut by_first_token: HashMap<&str, Vec<(&String, Vec<&str>)>> = HashMap::new();
        for candidate in candidates {
            let candidate_tokens: Vec<&str> = candidate.split_whitespace().collect();
            if let Some(&first) = candidate_tokens.first() {
                by_first_token
                    .entry(first)
                    .or_default()
                    .push((candidate, candidate_tokens));
            }
        }

        let mut found = HashSet::new();
        for (position, token) in tokens.iter().enumerate() {
            let Some(starters) = by_first_token.get(token) else {
                continue;
            };
            for (candidate, candidate_tokens) in starters {
                if found.contains(candidate.as_str()) {
                    continue;
                }
                let window = &tokens[position..];
                if window.len() >= candidate_tokens.len()
                    && window[..candidate_tokens.len()] == candidate_tokens[..]
                {
                    found.insert((*candidate).clone());
                }
            }
        }

        found
    }

    fn mode(&self) -> MatchingMode {
        MatchingMode::Phrase
    }
}

/// Degraded extractor: substring containment over the whole vocabulary.
///
/// The multi-pattern automaton is built once at startup from every taxonomy
/// phrase; `extract` scans the text a single time and keeps the hits that
/// are in the requested candidate set.
pub struct SubstringExtractor {
    patterns: Vec<String>,
    matcher: AhoCorasick,
}

impl SubstringExtractor {
    pub fn new(vocabulary: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut patterns: Vec<String> = vocabulary.into_iter().collect();
        patterns.sort();
        patterns.dedup();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| {
                FitScorerError::Processing(format!("Failed to build substring matcher: {}", e))
            })?;

        Ok(Self { patterns, matcher })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.patterns.len()
    }
}

impl SkillExtractor for SubstringExtractor {
    fn extract(&self, text: &str, candidates: &HashSet<String>) -> HashSet<String> {
        let mut found = HashSet::new();
        // Overlapping search: "java" must still be reported inside a text
        // that also matches "javascript".
        for mat in self.matcher.find_overlapping_iter(text) {
            let pattern = &self.patterns[mat.pattern().as_usize()];
            if candidates.contains(pattern) {
                found.insert(pattern.clone());
            }
        }
        found
    }

    fn mode(&self) -> MatchingMode {
        MatchingMode::Substring
    }
}
