//! Syntactic analysis capability
//!
//! The contextual analyzer needs named entities and shallow dependency
//! structure. Both come through the [`SyntacticAnalyzer`] trait so a real
//! parser can be injected by the enclosing service; [`HeuristicAnalyzer`]
//! is the built-in lexicon/regex implementation. The capability as a whole
//! is optional: the engine degrades gracefully when none is available.

use async_trait::async_trait;
use biaslens_core::{split_sentences, Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Entity category, mirroring the usual NER tag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// Named person
    Person,
    /// Nationality, religious, or political group
    Norp,
    /// Organization
    Org,
    /// Geo-political entity (country, city)
    Gpe,
    /// Date or date-like period (years, generations)
    Date,
}

/// A named entity found in a sentence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Surface form as it appeared in the text
    pub text: String,

    /// Entity category
    pub label: EntityLabel,
}

/// A token with a shallow dependency head.
///
/// `head` is the index of the governing token within the sentence; a token
/// that is its own head is unattached (a root).
#[derive(Debug, Clone)]
pub struct DepToken {
    /// Surface form, punctuation stripped
    pub text: String,

    /// Lowercased form, precomputed for matching
    pub lower: String,

    /// Index of the governing token
    pub head: usize,
}

/// One parsed sentence: text, entities, and dependency tokens
#[derive(Debug, Clone)]
pub struct ParsedSentence {
    /// The sentence text
    pub text: String,

    /// Entities found in the sentence
    pub entities: Vec<Entity>,

    /// Tokens with head links
    pub tokens: Vec<DepToken>,
}

/// Trait for syntactic analyzers (entity recognition + dependency structure)
#[async_trait]
pub trait SyntacticAnalyzer: Send + Sync {
    /// Parse text into sentences with entities and dependency tokens
    async fn parse(&self, text: &str) -> Result<Vec<ParsedSentence>>;

    /// Get the analyzer name
    fn name(&self) -> &str;
}

/// Subject tokens that can govern a gender-role stereotype chain
pub const GENDER_SUBJECTS: [&str; 6] = ["women", "woman", "men", "man", "females", "males"];

/// Comparative / suitability tokens
pub const COMPARATIVES: [&str; 5] = ["better", "suited", "more", "naturally", "tend"];

/// Role-noun tokens
pub const ROLE_NOUNS: [&str; 4] = ["roles", "positions", "jobs", "suited"];

/// Lexicon/regex analyzer used when no external parser is injected.
///
/// Entity recognition is list-based (NORP and GPE lexicons, date words and
/// year patterns, capitalized-token person heuristic). Dependency heads are
/// assigned by a shallow chain rule: comparatives attach to the nearest
/// preceding gender subject, role nouns to the nearest preceding
/// comparative, everything else stays unattached.
pub struct HeuristicAnalyzer {
    name: String,
    norp: HashSet<&'static str>,
    gpe: HashSet<&'static str>,
    date_words: HashSet<&'static str>,
    year: Regex,
    gender_subjects: HashSet<&'static str>,
    comparatives: HashSet<&'static str>,
    role_nouns: HashSet<&'static str>,
}

impl HeuristicAnalyzer {
    /// Create a new heuristic analyzer
    pub fn new() -> Result<Self> {
        let norp = [
            "american", "americans", "british", "french", "german", "germans", "chinese",
            "mexican", "mexicans", "indian", "indians", "russian", "russians", "muslim",
            "muslims", "christian", "christians", "jewish", "jews", "hindu", "hindus",
            "atheist", "atheists", "democrat", "democrats", "republican", "republicans",
            "liberal", "liberals", "conservative", "conservatives", "millennials", "boomers",
        ];
        let gpe = [
            "america", "england", "france", "germany", "china", "mexico", "india", "russia",
            "europe", "asia", "africa", "london", "paris", "berlin", "beijing",
        ];
        let date_words = [
            "today", "yesterday", "tomorrow", "decade", "decades", "century", "today's",
        ];

        let year = Regex::new(r"^(19|20)\d{2}s?$")
            .map_err(|e| Error::config(format!("Failed to compile year pattern: {e}")))?;

        Ok(Self {
            name: "heuristic".to_string(),
            norp: norp.into_iter().collect(),
            gpe: gpe.into_iter().collect(),
            date_words: date_words.into_iter().collect(),
            year,
            gender_subjects: GENDER_SUBJECTS.into_iter().collect(),
            comparatives: COMPARATIVES.into_iter().collect(),
            role_nouns: ROLE_NOUNS.into_iter().collect(),
        })
    }

    fn tokenize(sentence: &str) -> Vec<(String, String)> {
        sentence
            .split_whitespace()
            .map(|raw| {
                let stripped =
                    raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-');
                (stripped.to_string(), stripped.to_lowercase())
            })
            .filter(|(text, _)| !text.is_empty())
            .collect()
    }

    fn entities_in(&self, tokens: &[(String, String)]) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let (text, lower) = &tokens[i];

            if self.norp.contains(lower.as_str()) {
                entities.push(Entity {
                    text: text.clone(),
                    label: EntityLabel::Norp,
                });
                i += 1;
                continue;
            }

            if self.gpe.contains(lower.as_str()) {
                entities.push(Entity {
                    text: text.clone(),
                    label: EntityLabel::Gpe,
                });
                i += 1;
                continue;
            }

            if self.date_words.contains(lower.as_str()) || self.year.is_match(lower) {
                entities.push(Entity {
                    text: text.clone(),
                    label: EntityLabel::Date,
                });
                i += 1;
                continue;
            }

            // "past generations", "older generation" and the like read as
            // date-period entities
            if matches!(lower.as_str(), "past" | "previous" | "older" | "current" | "future")
                && i + 1 < tokens.len()
                && matches!(tokens[i + 1].1.as_str(), "generation" | "generations")
            {
                entities.push(Entity {
                    text: format!("{} {}", text, tokens[i + 1].0),
                    label: EntityLabel::Date,
                });
                i += 2;
                continue;
            }

            // Person heuristic: run of capitalized tokens not at sentence
            // start and not covered by the lexicons above
            if i > 0 && Self::is_capitalized_word(text) {
                let mut span = vec![text.clone()];
                let mut j = i + 1;
                while j < tokens.len() && Self::is_capitalized_word(&tokens[j].0) {
                    span.push(tokens[j].0.clone());
                    j += 1;
                }
                entities.push(Entity {
                    text: span.join(" "),
                    label: EntityLabel::Person,
                });
                i = j;
                continue;
            }

            i += 1;
        }

        entities
    }

    fn is_capitalized_word(text: &str) -> bool {
        let mut chars = text.chars();
        match chars.next() {
            Some(first) if first.is_uppercase() => chars.all(|c| c.is_lowercase()),
            _ => false,
        }
    }

    fn assign_heads(&self, tokens: &[(String, String)]) -> Vec<DepToken> {
        let mut dep_tokens: Vec<DepToken> = Vec::with_capacity(tokens.len());
        let mut last_subject: Option<usize> = None;
        let mut last_comparative: Option<usize> = None;

        for (i, (text, lower)) in tokens.iter().enumerate() {
            let mut head = i;

            if self.gender_subjects.contains(lower.as_str()) {
                last_subject = Some(i);
            } else if self.role_nouns.contains(lower.as_str()) && last_comparative.is_some() {
                head = last_comparative.unwrap_or(i);
                if self.comparatives.contains(lower.as_str()) {
                    last_comparative = Some(i);
                }
            } else if self.comparatives.contains(lower.as_str()) {
                if let Some(subject) = last_subject {
                    head = subject;
                }
                last_comparative = Some(i);
            }

            dep_tokens.push(DepToken {
                text: text.clone(),
                lower: lower.clone(),
                head,
            });
        }

        dep_tokens
    }
}

#[async_trait]
impl SyntacticAnalyzer for HeuristicAnalyzer {
    async fn parse(&self, text: &str) -> Result<Vec<ParsedSentence>> {
        let sentences = split_sentences(text)
            .into_iter()
            .map(|sentence| {
                let tokens = Self::tokenize(sentence);
                ParsedSentence {
                    text: sentence.to_string(),
                    entities: self.entities_in(&tokens),
                    tokens: self.assign_heads(&tokens),
                }
            })
            .collect();

        Ok(sentences)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
