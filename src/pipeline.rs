// src/pipeline.rs

// Per-document orchestration: compose the normalizer, classifier and scanners
// into one report, then flatten it to output rows. One row per extracted
// p-value; a document with no p-values still gets a single sentinel row so
// every input file is represented in the output.

use crate::corpus::Article;
use crate::extractors::keywords::{self, BlindCounts};
use crate::extractors::metadata;
use crate::extractors::pvalue::{extract_p_values, PValue};
use crate::extractors::section::{classify_section, MatchKind, SectionKind, SectionTables};

/// Sentinel recorded when a field cannot be determined. Post-processing
/// happens in R, where "NA" is the native missing value.
pub const NA: &str = "NA";

/// Fixed column header of the output CSV.
pub const OUTPUT_HEADER: &[&str] = &[
    "p.value",
    "operator",
    "decimal.places",
    "section",
    "first.doi",
    "num.dois",
    "journal.name",
    "abstract.found",
    "abstract.experiment",
    "methods.blind",
    "methods.not_blind",
    "methods.blinded",
    "methods.not_blinded",
    "methods.blindly",
    "methods.not_blindly",
    "num.methods",
    "type.methods",
    "num.results",
    "type.results",
    "num.authors",
    "year",
    "replication.sentences",
    "file.name",
    "folder.name",
];

/// Document-level fields shared by every row of one document.
#[derive(Debug, Clone)]
pub struct DocumentSummary {
    pub doi: Option<String>,
    pub num_dois: usize,
    pub journal: Option<String>,
    pub abstract_found: bool,
    pub abstract_experiment: bool,
    pub blind: BlindCounts,
    pub num_methods: usize,
    pub type_methods: MatchKind,
    pub num_results: usize,
    pub type_results: MatchKind,
    pub num_authors: usize,
    pub year: Option<String>,
    pub replication: Vec<String>,
    pub file_name: String,
    pub folder_name: String,
}

/// Everything mined from one document.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub p_values: Vec<PValue>,
    pub summary: DocumentSummary,
}

/// Runs every extractor over one parsed article.
pub fn process_document(
    article: &Article,
    file_name: &str,
    folder_name: &str,
    tables: &SectionTables,
) -> DocumentReport {
    let mut p_values = Vec::new();

    // abstract first; body sections never include abstract subtrees
    let abstract_text = article.abstract_text();
    let abstract_found = abstract_text.is_some();
    let abstract_text = abstract_text.unwrap_or_default();
    p_values.extend(extract_p_values(&abstract_text, "abstract"));

    let results_table = tables.get(SectionKind::Results);
    let results = results_table
        .map(|t| classify_section(article, t))
        .unwrap_or_else(|| no_table_match(SectionKind::Results));
    if results.count > 0 {
        p_values.extend(extract_p_values(&results.text, "results"));
    }

    let methods_table = tables.get(SectionKind::Methods);
    let methods = methods_table
        .map(|t| classify_section(article, t))
        .unwrap_or_else(|| no_table_match(SectionKind::Methods));

    let summary = DocumentSummary {
        doi: metadata::first_doi(article),
        num_dois: metadata::distinct_doi_count(article),
        journal: metadata::journal_name(article),
        abstract_found,
        abstract_experiment: keywords::has_experiment(&abstract_text),
        blind: keywords::blind_counts(&methods.text),
        num_methods: methods.count,
        type_methods: methods.matched_by,
        num_results: results.count,
        type_results: results.matched_by,
        num_authors: metadata::author_count(article),
        year: metadata::publication_year(article),
        replication: keywords::replication_sentences(&methods.text),
        file_name: file_name.to_string(),
        folder_name: folder_name.to_string(),
    };

    DocumentReport { p_values, summary }
}

fn no_table_match(kind: SectionKind) -> crate::extractors::SectionMatch {
    tracing::warn!("No recognition table configured for {:?}", kind);
    crate::extractors::SectionMatch {
        text: String::new(),
        count: 0,
        matched_by: MatchKind::None,
    }
}

impl DocumentReport {
    /// Flattens the report: one field vector per p-value, or a single
    /// sentinel row when none were found. Field order follows OUTPUT_HEADER.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let s = &self.summary;
        let shared = vec![
            s.doi.clone().unwrap_or_else(|| NA.to_string()),
            s.num_dois.to_string(),
            s.journal.as_deref().map_or_else(|| NA.to_string(), quoted),
            s.abstract_found.to_string(),
            s.abstract_experiment.to_string(),
            s.blind.blind.to_string(),
            s.blind.not_blind.to_string(),
            s.blind.blinded.to_string(),
            s.blind.not_blinded.to_string(),
            s.blind.blindly.to_string(),
            s.blind.not_blindly.to_string(),
            s.num_methods.to_string(),
            s.type_methods.to_string(),
            s.num_results.to_string(),
            s.type_results.to_string(),
            s.num_authors.to_string(),
            s.year.clone().unwrap_or_else(|| NA.to_string()),
            if s.replication.is_empty() {
                NA.to_string()
            } else {
                quoted(&s.replication.join("; "))
            },
            s.file_name.clone(),
            quoted(&s.folder_name),
        ];

        let mut rows = Vec::new();
        if self.p_values.is_empty() {
            let mut row = vec![NA.to_string(); 4];
            row.extend(shared);
            rows.push(row);
        } else {
            for p in &self.p_values {
                let mut row = vec![
                    p.value.to_string(),
                    p.operator.to_string(),
                    p.decimal_places.to_string(),
                    p.section.clone(),
                ];
                row.extend(shared.iter().cloned());
                rows.push(row);
            }
        }
        rows
    }
}

// No escaping of embedded delimiters is performed; quoting is the only
// disambiguation, matching what the downstream R stage expects.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value)
}
