//! Word tables used by the lexicon scorer

use std::collections::{HashMap, HashSet};

/// Multiplier applied to a negated assessment
pub const NEGATION_FACTOR: f64 = -0.5;

/// Polarity of sentiment-bearing words, in [-1.0, 1.0]
const POLARITY: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("fantastic", 0.4),
    ("wonderful", 1.0),
    ("brilliant", 0.9),
    ("superb", 1.0),
    ("perfect", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("fine", 0.4),
    ("love", 0.5),
    ("loved", 0.7),
    ("loves", 0.5),
    ("lovely", 0.5),
    ("like", 0.2),
    ("liked", 0.3),
    ("enjoy", 0.4),
    ("enjoyed", 0.5),
    ("happy", 0.8),
    ("glad", 0.5),
    ("pleased", 0.5),
    ("satisfied", 0.5),
    ("helpful", 0.5),
    ("useful", 0.3),
    ("easy", 0.43),
    ("fast", 0.2),
    ("quick", 0.33),
    ("clean", 0.37),
    ("beautiful", 0.85),
    ("pretty", 0.25),
    ("fun", 0.3),
    ("friendly", 0.38),
    ("recommend", 0.4),
    ("reliable", 0.45),
    ("smooth", 0.4),
    ("impressive", 1.0),
    ("impressed", 0.6),
    ("favorite", 0.5),
    ("favourite", 0.5),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("outstanding", 0.5),
    ("cool", 0.35),
    ("positive", 0.23),
    ("correct", 0.4),
    ("right", 0.29),
    ("worth", 0.3),
    ("comfortable", 0.4),
    ("intuitive", 0.5),
    ("delighted", 0.7),
    ("incredible", 0.9),
    ("exciting", 0.3),
    ("excited", 0.38),
    ("polite", 0.3),
    ("responsive", 0.4),
    ("stable", 0.3),
    ("affordable", 0.3),
    ("cheap", 0.4),
    ("valuable", 0.5),
    // negative
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("hate", -0.8),
    ("hated", -0.9),
    ("hates", -0.8),
    ("dislike", -0.5),
    ("poor", -0.4),
    ("sad", -0.5),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("annoyed", -0.4),
    ("boring", -1.0),
    ("bored", -0.5),
    ("disappointing", -0.6),
    ("disappointed", -0.75),
    ("frustrating", -0.4),
    ("frustrated", -0.7),
    ("useless", -0.5),
    ("broken", -0.4),
    ("buggy", -0.5),
    ("slow", -0.3),
    ("difficult", -0.5),
    ("hard", -0.29),
    ("confusing", -0.3),
    ("confused", -0.4),
    ("ugly", -0.7),
    ("rude", -0.5),
    ("wrong", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("fails", -0.5),
    ("failure", -0.3),
    ("problem", -0.2),
    ("problems", -0.2),
    ("issue", -0.1),
    ("issues", -0.1),
    ("crash", -0.4),
    ("crashes", -0.4),
    ("crashed", -0.4),
    ("expensive", -0.5),
    ("unhappy", -0.6),
    ("unreliable", -0.5),
    ("unusable", -0.8),
    ("mediocre", -0.3),
    ("waste", -0.2),
    ("negative", -0.3),
    ("sucks", -0.3),
    ("stupid", -0.8),
    ("painful", -0.7),
    ("unfortunately", -0.5),
    ("disgusting", -1.0),
    ("pathetic", -1.0),
    ("dreadful", -0.9),
    ("lame", -0.5),
    ("ridiculous", -0.33),
    ("worthless", -0.8),
    ("unacceptable", -0.6),
];

/// Words that scale the next assessment
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("so", 1.2),
    ("too", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("totally", 1.4),
    ("completely", 1.4),
    ("highly", 1.3),
    ("super", 1.3),
    ("truly", 1.2),
    ("most", 1.2),
    ("quite", 1.1),
    ("fairly", 0.8),
    ("rather", 0.8),
    ("somewhat", 0.7),
    ("slightly", 0.5),
    ("barely", 0.5),
    ("hardly", 0.5),
];

/// Words that flip the next assessment
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "cannot", "nothing", "nobody", "neither", "nor", "without", "none",
];

/// Tokens that close a clause and discard pending modifiers
const CLAUSE_BREAKS: &[&str] = &[".", ",", ";", ":", "!", "?", "but", "however"];

/// Lookup tables for the lexicon scorer
#[derive(Debug, Clone)]
pub struct Lexicon {
    polarity: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
    clause_breaks: HashSet<&'static str>,
}

impl Lexicon {
    /// Polarity of a sentiment-bearing word
    pub fn polarity(&self, word: &str) -> Option<f64> {
        self.polarity.get(word).copied()
    }

    /// Intensity multiplier of a modifier word
    pub fn intensity(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    /// Whether a token negates what follows. Any `n't` contraction counts.
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }

    pub fn is_clause_break(&self, token: &str) -> bool {
        self.clause_breaks.contains(token)
    }

    /// Number of sentiment-bearing words
    pub fn word_count(&self) -> usize {
        self.polarity.len()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            polarity: POLARITY.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
            clause_breaks: CLAUSE_BREAKS.iter().copied().collect(),
        }
    }
}
