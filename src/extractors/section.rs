// src/extractors/section.rs

// --- Imports ---
use crate::corpus::document::{clean_text, Article};
use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::Node;
use std::fmt;

// --- Regex Patterns for Title Normalization (Lazy Static) ---
// Leading enumeration on a section title: digits or roman numerals followed by
// punctuation or whitespace, e.g. "3.", "iii.", "(1)". The enumeration must be
// followed by a separator so that titles which merely start with i/v/x
// ("introduction") are left alone.
static LEADING_ENUMERATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9ivx.:()\s]*[.:()\s]+").expect("Failed to compile LEADING_ENUMERATION_RE")
});

// Trailing digits, punctuation and whitespace, e.g. "Results:" or "Methods (2)".
static TRAILING_TRIM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9.:()\s]+$").expect("Failed to compile TRAILING_TRIM_RE")
});

// --- Data Structures ---

/// Semantic section categories, independent of how a given publisher labels
/// them in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Abstract,
    Introduction,
    Methods,
    Results,
    Discussion,
}

/// How a section was located, reported in the output for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Schema-declared attribute (e.g. `sec-type="results"`). Authoritative.
    Structured,
    /// Exact match of the normalized free-text `<title>` against curated
    /// real-world variants. Fallback only.
    Title,
    /// Nothing matched; the section text is empty.
    None,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Structured => write!(f, "structured"),
            MatchKind::Title => write!(f, "title"),
            MatchKind::None => write!(f, "none"),
        }
    }
}

/// Classifier result for one target kind in one document.
#[derive(Debug, Clone)]
pub struct SectionMatch {
    /// Normalized text of the representative matched section ("" if none).
    pub text: String,
    /// How many candidates matched. Always 1 for a structured match; for
    /// title matches this counts every matching candidate even though only
    /// the longest contributes `text`.
    pub count: usize,
    pub matched_by: MatchKind,
}

impl SectionMatch {
    fn none() -> Self {
        Self { text: String::new(), count: 0, matched_by: MatchKind::None }
    }
}

/// Recognition data for one section kind: schema attribute labels and
/// curated free-text title variants. Kept as data rather than code so the
/// lists can be extended without touching the classifier.
#[derive(Debug, Clone)]
pub struct SectionTable {
    pub kind: SectionKind,
    pub tag_labels: Vec<&'static str>,
    pub title_variants: Vec<&'static str>,
}

/// The full kind -> recognition-data mapping used by a run.
#[derive(Debug, Clone)]
pub struct SectionTables {
    tables: Vec<SectionTable>,
}

impl SectionTables {
    /// The curated lists. The results titles were compiled by scouring every
    /// section title containing the word "results" in the May 2013 PubMed
    /// open access subset, ordered in roughly decreasing frequency.
    pub fn curated() -> Self {
        let tables = vec![
            SectionTable {
                kind: SectionKind::Results,
                tag_labels: vec!["results"],
                title_variants: vec![
                    "results",
                    "results and discussion",
                    "methods and results",
                    "results and discussions",
                    "results, discussion and conclusions",
                    "discussion and results",
                    "study results",
                    "results and conclusions",
                    "results and conclusion",
                    "experimental results",
                    "observations and results",
                    "results and observations",
                    "results and observation",
                    "observations, results and discussion",
                    "empirical results",
                    "materials and results",
                    "experimental procedures and results",
                    "research results",
                    "analysis and results",
                    "results and analysis",
                    "methodsandresults",
                    "resultsanddiscussion",
                    "resultsandconclusions",
                    "method and results",
                ],
            },
            SectionTable {
                kind: SectionKind::Methods,
                tag_labels: vec!["methods", "materials|methods"],
                title_variants: vec![
                    "methods",
                    "materials and methods",
                    "material and methods",
                ],
            },
            SectionTable {
                kind: SectionKind::Discussion,
                tag_labels: vec!["discussion"],
                title_variants: vec![
                    "discussion",
                    "discussion and conclusions",
                    "discussion and conclusion",
                    "general discussion",
                ],
            },
            SectionTable {
                kind: SectionKind::Introduction,
                tag_labels: vec!["intro", "introduction"],
                title_variants: vec!["introduction", "background"],
            },
            SectionTable {
                kind: SectionKind::Abstract,
                tag_labels: vec!["abstract"],
                title_variants: vec!["abstract", "summary"],
            },
        ];
        Self { tables }
    }

    pub fn get(&self, kind: SectionKind) -> Option<&SectionTable> {
        self.tables.iter().find(|t| t.kind == kind)
    }
}

// --- Classifier ---

/// Locates the best-matching section of the given kind in one document.
///
/// A structured attribute match anywhere wins outright and stops the scan
/// (document order decides between several). Only when the whole document has
/// no structured match do the free-text title variants apply, and then every
/// matching candidate is counted while the longest text is kept — a short,
/// irrelevant subsection that happens to share a title should not shadow the
/// real section. Malformed candidates (no title, no attributes) are
/// non-matches, never errors.
pub fn classify_section(article: &Article, table: &SectionTable) -> SectionMatch {
    let mut title_matches: Vec<String> = Vec::new();

    for sec in article.sections() {
        if sec
            .attributes()
            .any(|a| table.tag_labels.iter().any(|label| a.value() == *label))
        {
            tracing::trace!("Structured {:?} match on attribute", table.kind);
            return SectionMatch {
                text: clean_text(sec),
                count: 1,
                matched_by: MatchKind::Structured,
            };
        }

        if let Some(title) = section_title(sec) {
            if table.title_variants.iter().any(|v| *v == title) {
                tracing::trace!("Title {:?} match: '{}'", table.kind, title);
                title_matches.push(clean_text(sec));
            }
        }
    }

    let count = title_matches.len();
    let mut best: Option<String> = None;
    for text in title_matches {
        // strict > keeps the first of equally long matches
        if best.as_ref().map_or(true, |b| text.len() > b.len()) {
            best = Some(text);
        }
    }

    match best {
        Some(text) => SectionMatch { text, count, matched_by: MatchKind::Title },
        None => SectionMatch::none(),
    }
}

/// Normalized text of a candidate's first `<title>` descendant, or None when
/// there is no usable title.
fn section_title(sec: Node) -> Option<String> {
    let title_node = sec
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "title")?;
    let normalized = normalize_title(&clean_text(title_node));
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Reduces a free-text section title to canonical form, so that e.g.
/// "results/discussion", "3. Results and Discussion" and
/// "iii. Results \n& Discussion " all become "results and discussion".
pub fn normalize_title(raw: &str) -> String {
    let lowered: String = raw.to_lowercase().chars().filter(char::is_ascii).collect();
    let collapsed = lowered.replace('\n', " ").replace('\r', " ");
    let trimmed = collapsed.trim();
    let trimmed = LEADING_ENUMERATION_RE.replace(trimmed, "");
    let trimmed = TRAILING_TRIM_RE.replace(&trimmed, "");
    trimmed
        .trim()
        .replace('&', "and")
        .replace('/', "and")
        .replace('|', "and")
}
