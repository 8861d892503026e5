//! Skill taxonomy index

use crate::config::TaxonomyConfig;
use crate::error::{FitScorerError, Result};
use crate::processing::text_processor::TextProcessor;
use std::collections::{BTreeMap, HashSet};

/// Process-wide, read-only index of skill categories.
///
/// Built once at startup from configuration; every phrase is stored in the
/// same normal form as matched text, so `ci/cd` is indexed as `cicd` and
/// `node.js` as `nodejs`. The two derived universes used by scoring are the
/// union of all non-behavioral categories (`all_technical_skills`) and the
/// behavioral category alone.
pub struct TaxonomyIndex {
    categories: BTreeMap<String, Vec<String>>,
    behavioral_category: String,
    all_technical: HashSet<String>,
    all_behavioral: HashSet<String>,
}

impl TaxonomyIndex {
    /// Validates and indexes the configured taxonomy. A missing behavioral
    /// category is a startup-fatal configuration error.
    pub fn from_config(config: &TaxonomyConfig, processor: &TextProcessor) -> Result<Self> {
        if !config.categories.contains_key(&config.behavioral_category) {
            return Err(FitScorerError::Configuration(format!(
                "Behavioral category '{}' not present in taxonomy",
                config.behavioral_category
            )));
        }

        let mut categories = BTreeMap::new();
        let mut all_technical = HashSet::new();
        let mut all_behavioral = HashSet::new();

        for (name, category) in &config.categories {
            let mut skills: Vec<String> = category
                .skills
                .iter()
                .map(|skill| processor.normalize(skill).trim().to_string())
                .filter(|skill| !skill.is_empty())
                .collect();
            skills.sort();
            skills.dedup();

            if name == &config.behavioral_category {
                all_behavioral.extend(skills.iter().cloned());
            } else {
                all_technical.extend(skills.iter().cloned());
            }
            categories.insert(name.clone(), skills);
        }

        log::debug!(
            "Taxonomy loaded: {} categories, {} technical skills, {} behavioral skills",
            categories.len(),
            all_technical.len(),
            all_behavioral.len()
        );

        Ok(Self {
            categories,
            behavioral_category: config.behavioral_category.clone(),
            all_technical,
            all_behavioral,
        })
    }

    /// Union of every non-behavioral category.
    pub fn all_technical_skills(&self) -> &HashSet<String> {
        &self.all_technical
    }

    /// The behavioral category alone.
    pub fn all_behavioral_skills(&self) -> &HashSet<String> {
        &self.all_behavioral
    }

    /// Every indexed phrase, technical and behavioral.
    pub fn all_skills(&self) -> impl Iterator<Item = String> + '_ {
        self.all_technical
            .iter()
            .chain(self.all_behavioral.iter())
            .cloned()
    }

    pub fn behavioral_category(&self) -> &str {
        &self.behavioral_category
    }

    /// Category names with their normalized phrases, for display.
    pub fn categories(&self) -> &BTreeMap<String, Vec<String>> {
        &self.categories
    }

    pub fn skill_count(&self) -> usize {
        self.categories.values().map(|skills| skills.len()).sum()
    }
}
