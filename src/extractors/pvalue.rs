// src/extractors/pvalue.rs

use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// A p-value mention in running prose: a boundary character that is not
// alphanumeric and not one of the significance-marker symbols (*, #, †, _),
// then 'p'/'P', an optional-whitespace comparison operator, and a decimal
// with an optional leading 0 or 1 — "p < .001" is a common rendering.
static P_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-zA-Z0-9*#†_][Pp]\s*[=<>≤≥]\s*[01]?\.\d+")
        .expect("Failed to compile P_VALUE_RE")
});

// The canonical core re-extracted after whitespace stripping.
static P_CORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[Pp][=<>≤≥][01]?\.\d+").expect("Failed to compile P_CORE_RE")
});

/// One p-value mention, immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PValue {
    /// One of '=', '<', '>', '≤', '≥'.
    pub operator: char,
    pub value: f64,
    /// Digits after the decimal point as literally written. Kept from the
    /// source text, not recomputed from the float, so "p=0.050" reports 3.
    pub decimal_places: usize,
    /// Which section the mention came from ("abstract", "results").
    pub section: String,
}

/// Scans a block of normalized text and returns every well-formed p-value
/// mention in order of occurrence, labeled with its source section. Matches
/// are not deduplicated. Parsed values above 1.0 are silently dropped — a
/// probability cannot exceed 1, so such a match is a numeric coincidence
/// (e.g. a ratio), not an error.
pub fn extract_p_values(text: &str, section: &str) -> Vec<PValue> {
    let mut found = Vec::new();

    for m in P_VALUE_RE.find_iter(text) {
        // remove all whitespace, then pull out just the "p<op><digits>" core
        let compact: String = m.as_str().split_whitespace().collect();
        let core = match P_CORE_RE.find(&compact) {
            Some(c) => c.as_str(),
            None => continue,
        };

        let mut chars = core.chars();
        chars.next(); // the leading 'p'
        let operator = match chars.next() {
            Some(op) => op,
            None => continue,
        };
        let digits: String = chars.collect();
        let decimal_places = digits.split('.').nth(1).map_or(0, str::len);
        let value: f64 = match digits.parse() {
            Ok(v) => v,
            Err(_) => continue,
        };

        if value <= 1.0 {
            found.push(PValue {
                operator,
                value,
                decimal_places,
                section: section.to_string(),
            });
        } else {
            tracing::trace!("Dropping out-of-range p-value candidate: {}", core);
        }
    }

    found
}
