//! Report generator
//!
//! Pure formatting over finalized detection output; no new evidence is
//! produced here. The report is a rendering artifact for humans — all
//! structured consumers read the `BiasResult` fields instead. Identical
//! input must produce a byte-identical report, so every ordering below is
//! a stable sort.

use biaslens_core::{Flag, Suggestion};
use std::cmp::Ordering;
use std::collections::HashSet;

const RULE_HEAVY: &str =
    "===============================================================";
const RULE_LIGHT: &str =
    "---------------------------------------------------------------";

/// Maximum flags and suggestions listed in the report body
const MAX_LISTED: usize = 10;

/// Score below which the status label flips from minor issues to detected
const DETECTED_CUTOFF: f64 = 70.0;

/// Render the detailed report for a finalized detection outcome
pub fn render(bias_score: f64, categories: &[String], flags: &[Flag], suggestions: &[Suggestion]) -> String {
    if flags.is_empty() {
        return "No significant bias detected. Content appears inclusive and balanced.".to_string();
    }

    let mut lines: Vec<String> = vec![
        RULE_HEAVY.to_string(),
        "           PROFESSIONAL BIAS ANALYSIS REPORT".to_string(),
        RULE_HEAVY.to_string(),
        String::new(),
        format!("Overall Bias Score: {bias_score:.1}% (100% = No Bias Detected)"),
        format!(
            "Bias Status: {}",
            if bias_score < DETECTED_CUTOFF {
                "DETECTED"
            } else {
                "MINOR ISSUES DETECTED"
            }
        ),
        format!(
            "Categories Identified: {}",
            if categories.is_empty() {
                "None".to_string()
            } else {
                categories.join(", ")
            }
        ),
        format!("Total Issues Found: {}", flags.len()),
        String::new(),
        RULE_LIGHT.to_string(),
        "DETAILED BREAKDOWN BY CATEGORY".to_string(),
        RULE_LIGHT.to_string(),
    ];

    for (kind, count) in category_tally(flags) {
        lines.push(format!("  - {}: {} issue(s)", title_case(&kind), count));
    }

    lines.push(String::new());
    lines.push(RULE_LIGHT.to_string());
    lines.push("PRIORITY ISSUES (Sorted by Severity & Confidence)".to_string());
    lines.push(RULE_LIGHT.to_string());

    for (i, flag) in ranked_flags(flags).into_iter().take(MAX_LISTED).enumerate() {
        lines.push(format!(
            "{}. [{}] [{}]",
            i + 1,
            flag.severity.label(),
            flag.kind.replace('_', " ").to_uppercase()
        ));
        lines.push(format!("   Text: \"{}\"", flag.evidence_text()));
        lines.push(format!(
            "   Severity: {} | Confidence: {}",
            flag.severity.label(),
            flag.confidence
                .map(|c| c.to_string())
                .unwrap_or_else(|| "N/A".to_string())
        ));
        if let Some(explanation) = &flag.explanation {
            lines.push(format!("   Explanation: {explanation}"));
        }
        lines.push(String::new());
    }

    if !suggestions.is_empty() {
        lines.push(RULE_LIGHT.to_string());
        lines.push("RECOMMENDED IMPROVEMENTS".to_string());
        lines.push(RULE_LIGHT.to_string());

        let mut seen: HashSet<(String, String)> = HashSet::new();
        for suggestion in suggestions {
            let key = (suggestion.original.clone(), suggestion.category.clone());
            if seen.contains(&key) {
                continue;
            }
            seen.insert(key);
            lines.push(format!("{}. Replace: \"{}\"", seen.len(), suggestion.original));
            lines.push(format!("   With: \"{}\"", suggestion.suggested));
            lines.push(format!("   Category: {}", title_case(&suggestion.category)));
            lines.push(String::new());
            if seen.len() >= MAX_LISTED {
                break;
            }
        }
    }

    lines.push(RULE_HEAVY.to_string());
    lines.push("PROFESSIONAL RECOMMENDATIONS".to_string());
    lines.push(RULE_HEAVY.to_string());

    if categories
        .iter()
        .any(|c| c.contains("age") || c.contains("generational"))
    {
        lines.push("GENERATIONAL BIAS DETECTED:".to_string());
        lines.push("   - Avoid sweeping generalizations about age groups".to_string());
        lines.push("   - Promote balanced perspectives on work ethic across generations".to_string());
        lines.push("   - Encourage empathy and understanding of diverse experiences".to_string());
        lines.push("   - Focus on individual merit rather than age-based stereotypes".to_string());
        lines.push(String::new());
    }

    if categories.iter().any(|c| c.contains("gender")) {
        lines.push("GENDER BIAS DETECTED:".to_string());
        lines.push("   - Use gender-neutral language where possible".to_string());
        lines.push("   - Avoid reinforcing traditional gender role stereotypes".to_string());
        lines.push("   - Consider using inclusive pronouns (they/them)".to_string());
        lines.push(String::new());
    }

    lines.push("GENERAL BEST PRACTICES:".to_string());
    lines.push("   - Review content for implicit assumptions about demographic groups".to_string());
    lines.push("   - Seek diverse perspectives in content creation and review".to_string());
    lines.push("   - Focus on individual qualities rather than group stereotypes".to_string());
    lines.push("   - Use person-first language when discussing characteristics".to_string());
    lines.push(String::new());
    lines.push(RULE_HEAVY.to_string());

    lines.join("\n")
}

/// Per-kind flag counts in first-seen order, stable-sorted by descending
/// incidence
fn category_tally(flags: &[Flag]) -> Vec<(String, usize)> {
    let mut tally: Vec<(String, usize)> = Vec::new();
    for flag in flags {
        match tally.iter_mut().find(|(kind, _)| kind == &flag.kind) {
            Some((_, count)) => *count += 1,
            None => tally.push((flag.kind.clone(), 1)),
        }
    }
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally
}

/// Flags stable-sorted by `(severity == high, confidence)` descending;
/// ties keep original flag order
fn ranked_flags(flags: &[Flag]) -> Vec<&Flag> {
    let mut ranked: Vec<&Flag> = flags.iter().collect();
    ranked.sort_by(|a, b| {
        let key_a = (a.is_high(), a.confidence_or_zero());
        let key_b = (b.is_high(), b.confidence_or_zero());
        key_b.partial_cmp(&key_a).unwrap_or(Ordering::Equal)
    });
    ranked
}

fn title_case(kind: &str) -> String {
    kind.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use biaslens_core::Severity;

    fn sample_flags() -> Vec<Flag> {
        vec![
            Flag::lexical("gender", "chairman", Severity::Medium),
            Flag::ml("ml_hate", "They are vermin.", Severity::High, 0.9),
            Flag::ml("ml_toxicity", "You idiot.", Severity::Medium, 0.55),
            Flag::lexical("gender", "mailman", Severity::Medium),
        ]
    }

    #[test]
    fn test_no_flags_one_liner() {
        let report = render(100.0, &[], &[], &[]);
        assert_eq!(
            report,
            "No significant bias detected. Content appears inclusive and balanced."
        );
    }

    #[test]
    fn test_report_is_deterministic() {
        let flags = sample_flags();
        let categories = vec!["gender".to_string(), "hate".to_string()];
        let suggestions = vec![Suggestion::new("chairman", "chairperson", "gender")];

        let first = render(61.5, &categories, &flags, &suggestions);
        let second = render(61.5, &categories, &flags, &suggestions);
        assert_eq!(first, second);
    }

    #[test]
    fn test_high_severity_listed_first() {
        let report = render(61.5, &["hate".to_string()], &sample_flags(), &[]);

        let hate_pos = report.find("ML HATE").unwrap();
        let gender_pos = report.find("GENDER").unwrap();
        assert!(hate_pos < gender_pos);
    }

    #[test]
    fn test_status_flips_below_seventy() {
        let flags = sample_flags();
        let detected = render(42.0, &[], &flags, &[]);
        assert!(detected.contains("Bias Status: DETECTED"));

        let minor = render(84.0, &[], &flags, &[]);
        assert!(minor.contains("Bias Status: MINOR ISSUES DETECTED"));
    }

    #[test]
    fn test_duplicate_suggestions_collapsed() {
        let flags = sample_flags();
        let suggestions = vec![
            Suggestion::new("chairman", "chairperson", "gender"),
            Suggestion::new("chairman", "chairperson", "gender"),
        ];
        let report = render(61.5, &[], &flags, &suggestions);
        assert_eq!(report.matches("Replace: \"chairman\"").count(), 1);
    }

    #[test]
    fn test_category_tally_sorted_by_incidence() {
        let report = render(61.5, &[], &sample_flags(), &[]);
        // gender appears twice and should lead the breakdown
        let breakdown = report
            .split("DETAILED BREAKDOWN BY CATEGORY")
            .nth(1)
            .unwrap();
        let gender_pos = breakdown.find("Gender: 2 issue(s)").unwrap();
        let hate_pos = breakdown.find("Ml Hate: 1 issue(s)").unwrap();
        assert!(gender_pos < hate_pos);
    }

    #[test]
    fn test_generational_recommendations_present() {
        let categories = vec!["age_generational".to_string()];
        let report = render(50.0, &categories, &sample_flags(), &[]);
        assert!(report.contains("GENERATIONAL BIAS DETECTED:"));
        assert!(!report.contains("GENDER BIAS DETECTED:"));
    }
}
