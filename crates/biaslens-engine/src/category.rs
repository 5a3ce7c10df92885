//! Category registry
//!
//! Bias categories are fixed data: match patterns, a default severity
//! tier, and an ordered suggestion map. The registry is constructed and
//! validated once at startup and is read-only thereafter; a pattern that
//! fails to compile is fatal at construction, never at request time.
//!
//! Suggestion maps are ordered lists, not hash maps: the first trigger
//! found inside a matched span wins, and that tie-break must be
//! reproducible.

use biaslens_core::{Error, Result, Severity};
use regex::Regex;

/// A named bias dimension
pub struct Category {
    /// Category identifier (e.g. `gender`, `age`, `disability`)
    pub id: String,

    /// Compiled match patterns, in registration order
    pub patterns: Vec<Regex>,

    /// Default severity for flags in this category
    pub severity: Severity,

    /// Ordered (trigger, replacement) pairs
    pub suggestions: Vec<(String, String)>,
}

impl Category {
    fn new(
        id: &str,
        severity: Severity,
        patterns: &[&str],
        suggestions: &[(&str, &str)],
    ) -> Result<Self> {
        let compiled = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    Error::config(format!("category '{id}': invalid pattern '{pattern}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for (trigger, _) in suggestions {
            if trigger.trim().is_empty() {
                return Err(Error::config(format!(
                    "category '{id}': empty suggestion trigger"
                )));
            }
        }

        Ok(Self {
            id: id.to_string(),
            patterns: compiled,
            severity,
            suggestions: suggestions
                .iter()
                .map(|(trigger, replacement)| (trigger.to_string(), replacement.to_string()))
                .collect(),
        })
    }
}

/// Immutable set of all bias categories, in registration order
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Build the standard registry. Fails fast on any malformed pattern.
    pub fn standard() -> Result<Self> {
        let categories = vec![
            Category::new(
                "gender",
                Severity::Medium,
                &[
                    r"\b(mankind|manmade|chairman|fireman|policeman|stewardess|waitress|salesman|mailman)\b",
                    r"\b(he|him|his)\s+(is|was|should be)\s+(a\s+)?(leader|engineer|scientist|boss|doctor|pilot)\b",
                    r"\b(she|her)\s+(is|was)\s+(a\s+)?(nurse|assistant|secretary|teacher|housewife)\b",
                    r"\b(men|women)\s+are\s+(better|worse)\s+at\s+\w+",
                ],
                &[
                    ("mankind", "humankind"),
                    ("manmade", "artificial"),
                    ("chairman", "chairperson"),
                    ("fireman", "firefighter"),
                    ("policeman", "police officer"),
                    ("stewardess", "flight attendant"),
                    ("waitress", "server"),
                    ("salesman", "salesperson"),
                    ("mailman", "mail carrier"),
                ],
            )?,
            Category::new(
                "age",
                Severity::High,
                &[
                    r"\b(old people|elderly|senior citizens?|boomers|past generations?)\b.*\b(slow|confused|forgetful|outdated|tech-illiterate|resistant to change)\b",
                    r"\b(young people|young professionals|millennials?|gen z|gen y|zoomers|current generation|today's youth|today's workers)\b.*\b(lazy|naive|entitled|snowflakes|addicted to phones|spoiled|overly focused on|instant rewards|minimal sacrifice|reject proven|no commitment|demand constant|flexible hours|rapid success)\b",
                    r"\b(unlike past generations?)\b.*\b(respected hard work|committed to lifelong|valued discipline)\b",
                    r"\b(return to traditional|stop indulging|crumble standards)\b.*\b(entitled attitudes|every demand)\b",
                    r"\b(too old|too young)\s+(for|to)\s+\w+",
                ],
                &[
                    ("old people", "older adults"),
                    ("elderly", "older adults"),
                    ("senior citizen", "older adult"),
                    ("boomers", "older generations"),
                    ("past generations", "previous generations"),
                    ("young people", "younger individuals"),
                    ("young professionals", "early-career professionals"),
                    ("millennial", "young adult"),
                    ("gen z", "young adult"),
                    ("zoomers", "younger generations"),
                    ("current generation", "contemporary professionals"),
                    ("today's youth", "younger generations"),
                    ("entitled", "high expectations"),
                    ("instant rewards", "quick feedback"),
                    ("minimal sacrifice", "balanced effort"),
                    ("reject proven practices", "innovate on established methods"),
                    ("flexible hours", "work-life balance"),
                    ("constant praise", "regular recognition"),
                    ("entitled attitudes", "aspirational mindsets"),
                ],
            )?,
            Category::new(
                "disability",
                Severity::High,
                &[
                    r"\b(crippled|handicapped|retarded|insane|crazy|psycho|lame|dumb|blind to|deaf to)\b",
                    r"\b(suffers from|victim of|afflicted with)\b.*\b(disability|condition|illness)\b",
                    r"\b(wheelchair-bound|confined to a wheelchair)\b",
                    r"\b(people with|person with|individuals with|those with)\s+(cognitive|mental|physical|intellectual|developmental)?\s*(disabilities|disability|challenges|impairments?)\b.*\b(cannot|can't|unable to|incapable of|not able to|should not|shouldn't|better off|kept out|excluded from)\b",
                    r"\b(disabled people|disabled individuals|the disabled)\b.*\b(cannot|can't|unable to|less capable|not suitable|inappropriate for|burden|liability)\b",
                    r"\b(for the sake of efficiency|for productivity|to maintain standards)\b.*\b(disability|disabled|cognitive|mental|physical)\b",
                ],
                &[
                    ("handicapped", "person with a disability"),
                    ("crippled", "person with a disability"),
                    ("retarded", "person with intellectual disability"),
                    ("insane", "person with mental health challenges"),
                    ("crazy", "person with mental health challenges"),
                    ("psycho", "person with mental health challenges"),
                    ("suffers from", "lives with"),
                    ("victim of", "has"),
                    ("wheelchair-bound", "wheelchair user"),
                    ("cannot contribute", "can contribute with appropriate support"),
                    ("kept out", "supported to participate"),
                    ("better off being", "deserves opportunity"),
                ],
            )?,
            Category::new(
                "racial",
                Severity::High,
                &[
                    r"\b(illegal alien|illegals|wetback|thug|gangster|criminal)\b",
                    r"\b(black|white|asian|hispanic|native)\s+(neighborhood|community|area)\b.*\b(dangerous|ghetto|poor|rich)\b",
                    r"\b(all \w+ people are)\b.*\b(lazy|smart|criminal|terrorists)\b",
                ],
                &[
                    ("illegal alien", "undocumented immigrant"),
                    ("illegals", "undocumented people"),
                    ("thug", "person"),
                    ("gangster", "individual"),
                ],
            )?,
            Category::new(
                "cultural",
                Severity::Medium,
                &[
                    r"\b(tradition(al)? values|respect for authority|stable communities|abandoning traditions|primitive cultures)\b",
                    r"\b(progress should never come at the cost of cultural identity)\b",
                    r"\b(our way of life|superior culture|inferior culture|backward society)\b",
                    r"\b(assimilate or leave|go back to your country)\b",
                ],
                &[
                    ("respect for authority", "respect for diverse perspectives"),
                    ("abandoning traditions", "adapting traditions"),
                    ("superior culture", "unique culture"),
                    ("inferior culture", "different culture"),
                    ("primitive cultures", "diverse cultures"),
                    ("backward society", "evolving society"),
                ],
            )?,
            Category::new(
                "socioeconomic",
                Severity::Medium,
                &[
                    r"\b(poor people|the poor|low-income families|welfare queens)\b.*\b(lazy|unmotivated|criminal|drain on society)\b",
                    r"\b(rich people|the rich|wealthy|one percent)\b.*\b(greedy|selfish|out of touch|elitist)\b",
                    r"\b(pull yourself up by your bootstraps)\b",
                ],
                &[
                    ("poor people", "people experiencing poverty"),
                    ("the poor", "people experiencing poverty"),
                    ("low-income families", "families with limited financial resources"),
                    ("welfare queens", "people receiving assistance"),
                    ("rich people", "people with financial means"),
                    ("the rich", "people with financial means"),
                    ("one percent", "high-income individuals"),
                ],
            )?,
            Category::new(
                "political",
                Severity::Medium,
                &[
                    r"\b(left-wing|right-wing|liberal|conservative|democrat|republican)\b.*\b(radical|extremist|irrational|traitors|sheeple)\b",
                    r"\b(politicians|government)\b.*\b(always lie|never care|corrupt|deep state)\b",
                    r"\b(fake news|mainstream media)\b.*\b(lies|propaganda)\b",
                ],
                &[
                    ("left-wing", "progressive"),
                    ("right-wing", "traditionalist"),
                    ("liberal", "progressive"),
                    ("conservative", "traditionalist"),
                    ("fake news", "misinformation"),
                ],
            )?,
            Category::new(
                "sexual_orientation",
                Severity::High,
                &[
                    r"\b(gay|lesbian|queer|homo|dyke|fag)\b.*\b(agenda|lifestyle|choice|perverted|sinful)\b",
                    r"\b(straight people are normal)\b",
                    r"\b(that's so gay)\b",
                ],
                &[
                    ("homo", "gay person"),
                    ("dyke", "lesbian person"),
                    ("fag", "gay person"),
                    ("agenda", "rights"),
                    ("lifestyle", "orientation"),
                    ("choice", "identity"),
                ],
            )?,
            Category::new(
                "religion",
                Severity::High,
                &[
                    r"\b(muslim|christian|jewish|hindu|atheist)\b.*\b(terrorists|fanatics|superstitious|greedy|godless)\b",
                    r"\b(all religions are)\b.*\b(evil|the same|oppressive)\b",
                    r"\b(war on christmas|sharia law)\b",
                ],
                &[
                    ("terrorists", "extremists"),
                    ("fanatics", "extremists"),
                    ("superstitious", "devout"),
                    ("godless", "non-religious"),
                ],
            )?,
            Category::new(
                "body_image",
                Severity::Medium,
                &[
                    r"\b(fat|skinny|obese|anorexic)\b.*\b(lazy|ugly|unhealthy|disgusting)\b",
                    r"\b(real women have curves|men should be muscular)\b",
                    r"\b(body positivity is promoting obesity)\b",
                ],
                &[
                    ("fat", "person with larger body"),
                    ("skinny", "person with smaller body"),
                    ("obese", "person with obesity"),
                    ("anorexic", "person with eating disorder"),
                ],
            )?,
            Category::new(
                "environmental",
                Severity::Medium,
                &[
                    r"\b(climate change is a hoax|environmentalists are extremists)\b",
                    r"\b(green energy is a scam|tree huggers)\b",
                ],
                &[
                    ("hoax", "debated issue"),
                    ("extremists", "advocates"),
                    ("scam", "initiative"),
                    ("tree huggers", "environmentalists"),
                ],
            )?,
        ];

        Ok(Self { categories })
    }

    /// All categories, in registration order
    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_builds() {
        let registry = CategoryRegistry::standard().unwrap();
        assert_eq!(registry.len(), 11);
        assert!(registry.get("gender").is_some());
        assert!(registry.get("environmental").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_high_severity_categories() {
        let registry = CategoryRegistry::standard().unwrap();
        for id in ["disability", "racial", "sexual_orientation", "religion", "age"] {
            assert_eq!(registry.get(id).unwrap().severity, Severity::High, "{id}");
        }
        assert_eq!(registry.get("gender").unwrap().severity, Severity::Medium);
    }

    #[test]
    fn test_empty_trigger_rejected() {
        let result = Category::new("broken", Severity::Medium, &[r"\bx\b"], &[("  ", "y")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_pattern_is_fatal() {
        let result = Category::new("broken", Severity::Medium, &[r"\b(unclosed"], &[]);
        assert!(result.is_err());
    }
}
