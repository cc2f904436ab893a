// src/extractors/keywords.rs

// Keyword scans over section text: blinding language in the methods,
// experiment language in the abstract, replication sentences for qualitative
// flagging. All counts, never errors.

use once_cell::sync::Lazy;
use regex::Regex;

// \W is unicode-aware in the regex crate, matching the word boundaries these
// corpora actually contain (non-breaking spaces, typographic punctuation).
static BLIND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W[Bb]lind\W").expect("Failed to compile BLIND_RE"));
static NOT_BLIND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W[Nn]ot\s[Bb]lind\W").expect("Failed to compile NOT_BLIND_RE"));
static BLINDED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W[Bb]linded\W").expect("Failed to compile BLINDED_RE"));
static NOT_BLINDED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W[Nn]ot\s[Bb]linded\W").expect("Failed to compile NOT_BLINDED_RE"));
static BLINDLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W[Bb]lindly\W").expect("Failed to compile BLINDLY_RE"));
static NOT_BLINDLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W[Nn]ot\s[Bb]lindly\W").expect("Failed to compile NOT_BLINDLY_RE"));

static EXPERIMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\W[Ee]xperiment(al(ly)?)?\W").expect("Failed to compile EXPERIMENT_RE")
});

// A sentence is a period-terminated run that does not cross other periods.
static REPLICATION_SENTENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[^.]*replic[^.]*\.").expect("Failed to compile REPLICATION_SENTENCE_RE")
});

/// Occurrence counts of the six blinding-language forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlindCounts {
    pub blind: usize,
    pub not_blind: usize,
    pub blinded: usize,
    pub not_blinded: usize,
    pub blindly: usize,
    pub not_blindly: usize,
}

pub fn blind_counts(text: &str) -> BlindCounts {
    BlindCounts {
        blind: BLIND_RE.find_iter(text).count(),
        not_blind: NOT_BLIND_RE.find_iter(text).count(),
        blinded: BLINDED_RE.find_iter(text).count(),
        not_blinded: NOT_BLINDED_RE.find_iter(text).count(),
        blindly: BLINDLY_RE.find_iter(text).count(),
        not_blindly: NOT_BLINDLY_RE.find_iter(text).count(),
    }
}

/// Does the text mention experiment / experimental / experimentally?
pub fn has_experiment(text: &str) -> bool {
    EXPERIMENT_RE.is_match(text)
}

/// Every sentence containing a "replic" stem (replicate, replication, ...),
/// verbatim. Used for qualitative flagging rather than counting.
pub fn replication_sentences(text: &str) -> Vec<String> {
    REPLICATION_SENTENCE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_blinding_form() {
        let text = " Observers were blind to condition. Scoring was not blind either. \
                    The assessor was blinded; raters scored blindly. ";
        let c = blind_counts(text);
        assert_eq!(c.blind, 2); // "blind to" and "not blind" both contain " blind "
        assert_eq!(c.not_blind, 1);
        assert_eq!(c.blinded, 1);
        assert_eq!(c.blindly, 1);
        assert_eq!(c.not_blinded, 0);
        assert_eq!(c.not_blindly, 0);
    }

    #[test]
    fn blinding_requires_word_boundaries() {
        let c = blind_counts(" the blinds were drawn, colorblindness aside ");
        assert_eq!(c, BlindCounts::default());
    }

    #[test]
    fn experiment_forms_detected() {
        assert!(has_experiment(" we ran an experiment with controls "));
        assert!(has_experiment(" an experimental design "));
        assert!(has_experiment(" verified experimentally here "));
        assert!(!has_experiment(" the experimenter effect "));
        assert!(!has_experiment(" no such term present "));
    }

    #[test]
    fn replication_sentences_are_verbatim() {
        let text = "We did a study. We sought to replicate Smith et al. Nothing else.";
        let sentences = replication_sentences(text);
        assert_eq!(sentences, vec!["We sought to replicate Smith et al."]);
    }

    #[test]
    fn replication_is_case_insensitive_and_multi_hit() {
        let text = "Replication failed. Unrelated text. This replicates prior work.";
        let sentences = replication_sentences(text);
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("Replication"));
    }
}
