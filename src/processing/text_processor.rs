//! Text normalization and stopword filtering

use regex::Regex;
use std::collections::HashSet;

/// Canonicalizes raw text for matching and embedding.
///
/// Normalization lower-cases the input and strips every character outside
/// `[\w\s#+]`, so skill tokens like `c#` and `c++` survive while punctuation
/// does not. Whitespace is preserved, which keeps multi-word phrase
/// boundaries intact.
pub struct TextProcessor {
    stop_words: HashSet<String>,
    strip_regex: Regex,
}

impl TextProcessor {
    pub fn new(stop_words: HashSet<String>) -> Self {
        let strip_regex = Regex::new(r"[^\w\s#+]").expect("Invalid normalization regex");

        Self {
            stop_words,
            strip_regex,
        }
    }

    /// Processor with the built-in Portuguese stopword list.
    pub fn with_default_stopwords() -> Self {
        Self::new(default_stopwords().iter().map(|s| s.to_string()).collect())
    }

    /// Lower-case and strip every character outside `[\w\s#+]`.
    ///
    /// Idempotent: `normalize(normalize(s)) == normalize(s)`.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        self.strip_regex.replace_all(&lowered, "").to_string()
    }

    /// True when nothing matchable is left after normalization.
    pub fn is_blank(&self, text: &str) -> bool {
        self.normalize(text).trim().is_empty()
    }

    /// Whitespace tokenization over already-normalized text.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }

    /// Drop stopword tokens and rejoin with single spaces.
    ///
    /// Expects normalized input; used to clean text ahead of embedding.
    pub fn remove_stopwords(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|token| !self.stop_words.contains(*token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn stopword_count(&self) -> usize {
        self.stop_words.len()
    }
}

/// Common Portuguese stopwords, matching the language of the default
/// taxonomy. Override via `stopwords.words` in the configuration file.
pub fn default_stopwords() -> &'static [&'static str] {
    &[
        "a", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo",
        "as", "até", "com", "como", "da", "das", "de", "dela", "delas",
        "dele", "deles", "depois", "do", "dos", "e", "é", "ela", "elas",
        "ele", "eles", "em", "entre", "era", "eram", "essa", "essas", "esse",
        "esses", "esta", "está", "estão", "estas", "este", "estes", "eu",
        "foi", "for", "foram", "fosse", "há", "isso", "isto", "já", "lhe",
        "lhes", "mais", "mas", "me", "mesmo", "meu", "meus", "minha",
        "minhas", "muito", "na", "não", "nas", "nem", "no", "nos", "nós",
        "nossa", "nossas", "nosso", "nossos", "num", "numa", "o", "os", "ou",
        "para", "pela", "pelas", "pelo", "pelos", "por", "qual", "quando",
        "que", "quem", "são", "se", "seja", "sem", "ser", "será", "seu",
        "seus", "só", "sua", "suas", "também", "te", "tem", "têm", "tenho",
        "ter", "teu", "tinha", "um", "uma", "você", "vocês",
    ]
}
