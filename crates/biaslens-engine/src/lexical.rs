//! Lexical matcher
//!
//! Pure pattern-based scan of the text against every category. No external
//! calls; running twice on identical text yields identical output in
//! identical order.

use crate::category::CategoryRegistry;
use biaslens_core::{Flag, Suggestion};
use std::sync::Arc;

/// Output of one lexical scan
#[derive(Debug, Default)]
pub struct LexicalOutput {
    /// Flags in match order (category order, then pattern order, then
    /// position order)
    pub flags: Vec<Flag>,

    /// Suggestions in match order, at most one per flag
    pub suggestions: Vec<Suggestion>,

    /// Deduplicated category identifiers, in first-trigger order
    pub categories: Vec<String>,
}

/// Scans text against the category registry
pub struct LexicalMatcher {
    registry: Arc<CategoryRegistry>,
}

impl LexicalMatcher {
    /// Create a matcher over the given registry
    pub fn new(registry: Arc<CategoryRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this matcher scans against
    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Scan text for category pattern matches
    pub fn scan(&self, text: &str) -> LexicalOutput {
        let mut output = LexicalOutput::default();
        let text_lower = text.to_lowercase();

        for category in self.registry.all() {
            for pattern in &category.patterns {
                for matched in pattern.find_iter(&text_lower) {
                    let matched_text = matched.as_str();

                    // Age matches mentioning generations are a distinct
                    // sub-classification that scores differently downstream.
                    let flag_kind = if category.id == "age" && matched_text.contains("generation") {
                        format!("{}_generational", category.id)
                    } else {
                        category.id.clone()
                    };

                    if !output.categories.iter().any(|c| c == &flag_kind) {
                        output.categories.push(flag_kind.clone());
                    }

                    output
                        .flags
                        .push(Flag::lexical(flag_kind, matched_text, category.severity));

                    // First trigger found inside the span wins; at most one
                    // suggestion per flag.
                    for (trigger, replacement) in &category.suggestions {
                        if matched_text.contains(trigger.as_str()) {
                            output.suggestions.push(Suggestion::new(
                                matched_text,
                                matched_text.replace(trigger.as_str(), replacement),
                                category.id.clone(),
                            ));
                            break;
                        }
                    }
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biaslens_core::Severity;

    fn matcher() -> LexicalMatcher {
        LexicalMatcher::new(Arc::new(CategoryRegistry::standard().unwrap()))
    }

    #[test]
    fn test_chairman_suggestion() {
        let output = matcher().scan("The chairman approved it");

        assert_eq!(output.flags.len(), 1);
        assert_eq!(output.flags[0].kind, "gender");
        assert_eq!(output.categories, vec!["gender"]);

        assert_eq!(output.suggestions.len(), 1);
        let suggestion = &output.suggestions[0];
        assert!(suggestion.original.contains("chairman"));
        assert!(suggestion.suggested.contains("chairperson"));
        assert_eq!(suggestion.category, "gender");
    }

    #[test]
    fn test_age_generational_refinement() {
        let output = matcher().scan("Boomers and past generations are resistant to change");

        assert!(output.flags.iter().any(|f| f.kind == "age_generational"));
        assert!(!output.flags.iter().any(|f| f.kind == "age"));
        assert!(output.categories.contains(&"age_generational".to_string()));
    }

    #[test]
    fn test_age_without_generation_stays_plain() {
        let output = matcher().scan("She is too old for this job");

        assert!(output.flags.iter().any(|f| f.kind == "age"));
        assert!(!output.flags.iter().any(|f| f.kind == "age_generational"));
    }

    #[test]
    fn test_disability_high_severity() {
        let output = matcher().scan("That plan is crazy and will never work");

        let flag = output.flags.iter().find(|f| f.kind == "disability").unwrap();
        assert_eq!(flag.severity, Severity::High);
        assert_eq!(flag.matched_text.as_deref(), Some("crazy"));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let output = matcher().scan("The CHAIRMAN spoke first");
        assert_eq!(output.flags.len(), 1);
        assert_eq!(output.flags[0].matched_text.as_deref(), Some("chairman"));
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let text = "The chairman said old people are slow. Millennials are lazy.";
        let first = matcher().scan(text);
        let second = matcher().scan(text);

        assert_eq!(first.flags.len(), second.flags.len());
        for (a, b) in first.flags.iter().zip(second.flags.iter()) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.matched_text, b.matched_text);
        }
        assert_eq!(first.categories, second.categories);
        assert_eq!(first.suggestions.len(), second.suggestions.len());
    }

    #[test]
    fn test_clean_text_produces_nothing() {
        let output = matcher().scan("The quarterly report is attached for review.");
        assert!(output.flags.is_empty());
        assert!(output.suggestions.is_empty());
        assert!(output.categories.is_empty());
    }
}
