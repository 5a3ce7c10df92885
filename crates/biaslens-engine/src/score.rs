//! Score aggregator
//!
//! Fuses all flag streams into one bounded 0–100 score. The weighting is
//! part of the engine's contract: identical evidence must always produce
//! an identical score, so the arithmetic here never changes shape, only
//! the configured weights.

use crate::config::PenaltyWeights;
use biaslens_core::round1;

/// Evidence counts and retained probabilities feeding the score
#[derive(Debug, Default)]
pub struct EvidenceTally<'a> {
    /// Total number of flags from all streams
    pub total_flags: usize,

    /// Raw above-threshold hate probabilities
    pub hate_scores: &'a [f32],

    /// Raw above-threshold toxicity probabilities
    pub toxicity_scores: &'a [f32],

    /// Number of contextual flags
    pub contextual_flags: usize,

    /// Number of lexical flags
    pub lexical_flags: usize,

    /// All triggered category identifiers
    pub categories: &'a [String],
}

/// Compute the bias score for the given evidence.
///
/// No flags means a clean 100.0. Otherwise a penalty is subtracted:
/// average above-threshold classifier probabilities weigh heaviest,
/// contextual flags next, lexical hits lightest. Age-related categories
/// (`age_generational`, `contextual_age`) carry an extra per-category
/// penalty. The result is clamped at 0 and rounded to one decimal.
pub fn aggregate_score(tally: &EvidenceTally<'_>, weights: &PenaltyWeights) -> f64 {
    if tally.total_flags == 0 {
        return 100.0;
    }

    let avg_hate = average(tally.hate_scores);
    let avg_toxicity = average(tally.toxicity_scores);
    let age_categories = tally
        .categories
        .iter()
        .filter(|category| category.contains("age"))
        .count();

    let penalty = weights.hate * avg_hate
        + weights.toxicity * avg_toxicity
        + weights.contextual * tally.contextual_flags as f64
        + weights.age * age_categories as f64
        + weights.lexical * tally.lexical_flags as f64;

    round1((100.0 - penalty).max(0.0))
}

fn average(scores: &[f32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|s| *s as f64).sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tally_with_flags(total: usize, lexical: usize) -> EvidenceTally<'static> {
        EvidenceTally {
            total_flags: total,
            lexical_flags: lexical,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_flags_scores_clean() {
        let score = aggregate_score(&EvidenceTally::default(), &PenaltyWeights::default());
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_single_lexical_flag() {
        let score = aggregate_score(&tally_with_flags(1, 1), &PenaltyWeights::default());
        assert_eq!(score, 92.0);
    }

    #[test]
    fn test_ml_averages_weigh_in() {
        let hate = [0.8f32];
        let toxicity = [0.6f32];
        let tally = EvidenceTally {
            total_flags: 2,
            hate_scores: &hate,
            toxicity_scores: &toxicity,
            ..Default::default()
        };
        // 100 - 25*0.8 - 25*0.6 = 65.0
        let score = aggregate_score(&tally, &PenaltyWeights::default());
        assert_eq!(score, 65.0);
    }

    #[test]
    fn test_age_categories_counted() {
        let categories = vec![
            "age_generational".to_string(),
            "contextual_age".to_string(),
            "gender".to_string(),
        ];
        let tally = EvidenceTally {
            total_flags: 3,
            lexical_flags: 1,
            contextual_flags: 1,
            categories: &categories,
            ..Default::default()
        };
        // 100 - 20*1 - 10*2 - 8*1 = 52.0
        let score = aggregate_score(&tally, &PenaltyWeights::default());
        assert_eq!(score, 52.0);
    }

    #[test]
    fn test_heavy_evidence_clamps_to_zero() {
        let tally = tally_with_flags(20, 20);
        let score = aggregate_score(&tally, &PenaltyWeights::default());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_added_evidence_never_raises_score() {
        let weights = PenaltyWeights::default();
        let base = aggregate_score(&tally_with_flags(2, 2), &weights);
        let more = aggregate_score(&tally_with_flags(3, 3), &weights);
        assert!(more <= base);
    }

    proptest! {
        #[test]
        fn prop_score_always_bounded(
            total in 0usize..50,
            lexical in 0usize..50,
            contextual in 0usize..50,
            hate in proptest::collection::vec(0.0f32..=1.0, 0..10),
            toxicity in proptest::collection::vec(0.0f32..=1.0, 0..10),
        ) {
            let categories = vec!["age_generational".to_string(), "hate".to_string()];
            let tally = EvidenceTally {
                total_flags: total,
                hate_scores: &hate,
                toxicity_scores: &toxicity,
                contextual_flags: contextual,
                lexical_flags: lexical,
                categories: &categories,
            };
            let score = aggregate_score(&tally, &PenaltyWeights::default());
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn prop_extra_lexical_flag_monotonic(lexical in 0usize..30) {
            let weights = PenaltyWeights::default();
            let base = aggregate_score(&tally_with_flags(lexical + 1, lexical), &weights);
            let more = aggregate_score(&tally_with_flags(lexical + 2, lexical + 1), &weights);
            prop_assert!(more <= base);
        }
    }
}
