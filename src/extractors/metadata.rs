// src/extractors/metadata.rs

// Narrow single-purpose scans over the article tree. Missing data is never an
// error here: each lookup returns an Option or a count and the orchestrator
// maps absence to the "NA" sentinel at output time.

use crate::corpus::document::{raw_text, Article};
use std::collections::BTreeSet;

fn strip_breaks(text: String) -> String {
    // some DOIs and years arrive with embedded newlines
    text.replace('\n', "").replace('\r', "")
}

/// First `article-id` declared as a DOI, in document order.
pub fn first_doi(article: &Article) -> Option<String> {
    article
        .find_all("article-id")
        .find(|n| n.attributes().any(|a| a.value() == "doi"))
        .map(|n| strip_breaks(raw_text(n)))
}

/// Number of *distinct* DOI values across all `article-id` nodes. Some
/// malformed corpus files bundle whole journal issues into one document;
/// a count above 1 flags those for downstream filtering.
pub fn distinct_doi_count(article: &Article) -> usize {
    let dois: BTreeSet<String> = article
        .find_all("article-id")
        .filter(|n| n.attributes().any(|a| a.value() == "doi"))
        .map(|n| raw_text(n))
        .collect();
    dois.len()
}

/// NLM title-abbreviation journal id, the stable journal name for analysis.
pub fn journal_name(article: &Article) -> Option<String> {
    article
        .find_all("journal-id")
        .find(|n| n.attributes().any(|a| a.value() == "nlm-ta"))
        .map(|n| strip_breaks(raw_text(n)))
}

/// Count of contributor nodes declared as authors.
pub fn author_count(article: &Article) -> usize {
    article
        .find_all("contrib")
        .filter(|n| n.attributes().any(|a| a.value() == "author"))
        .count()
}

/// Year nested inside the first `pub-date` node.
pub fn publication_year(article: &Article) -> Option<String> {
    let pub_date = article.find_all("pub-date").next()?;
    let year = pub_date
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "year")?;
    Some(strip_breaks(raw_text(year)))
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const FRONT: &str = r#"<article><front>
        <journal-meta>
            <journal-id journal-id-type="nlm-ta">PLoS ONE</journal-id>
            <journal-id journal-id-type="publisher-id">plos</journal-id>
        </journal-meta>
        <article-meta>
            <article-id pub-id-type="pmid">12345</article-id>
            <article-id pub-id-type="doi">10.1371/journal.pone.0000001</article-id>
            <article-id pub-id-type="doi">10.1371/journal.pone.0000002</article-id>
            <contrib-group>
                <contrib contrib-type="author"><name><surname>A</surname></name></contrib>
                <contrib contrib-type="author"><name><surname>B</surname></name></contrib>
                <contrib contrib-type="editor"><name><surname>C</surname></name></contrib>
            </contrib-group>
            <pub-date pub-type="epub"><day>1</day><month>2</month><year>2012</year></pub-date>
            <pub-date pub-type="ppub"><year>2013</year></pub-date>
        </article-meta>
    </front></article>"#;

    #[test]
    fn first_doi_in_document_order() {
        let article = Article::parse(FRONT).unwrap();
        assert_eq!(first_doi(&article).as_deref(), Some("10.1371/journal.pone.0000001"));
    }

    #[test]
    fn doi_with_embedded_newline_is_cleaned() {
        let xml = r#"<article><article-id pub-id-type="doi">10.1/
x</article-id></article>"#;
        let article = Article::parse(xml).unwrap();
        assert_eq!(first_doi(&article).as_deref(), Some("10.1/x"));
    }

    #[test]
    fn distinct_dois_counted_once_each() {
        let xml = r#"<article>
            <article-id pub-id-type="doi">10.1/a</article-id>
            <article-id pub-id-type="doi">10.1/a</article-id>
            <article-id pub-id-type="doi">10.1/b</article-id>
        </article>"#;
        let article = Article::parse(xml).unwrap();
        assert_eq!(distinct_doi_count(&article), 2);
    }

    #[test]
    fn journal_requires_nlm_ta() {
        let article = Article::parse(FRONT).unwrap();
        assert_eq!(journal_name(&article).as_deref(), Some("PLoS ONE"));

        let bare = Article::parse(r#"<article><journal-id journal-id-type="publisher-id">x</journal-id></article>"#).unwrap();
        assert_eq!(journal_name(&bare), None);
    }

    #[test]
    fn authors_exclude_other_contributors() {
        let article = Article::parse(FRONT).unwrap();
        assert_eq!(author_count(&article), 2);
    }

    #[test]
    fn year_comes_from_first_pub_date() {
        let article = Article::parse(FRONT).unwrap();
        assert_eq!(publication_year(&article).as_deref(), Some("2012"));
    }

    #[test]
    fn everything_degrades_to_absent() {
        let article = Article::parse("<article><body/></article>").unwrap();
        assert_eq!(first_doi(&article), None);
        assert_eq!(distinct_doi_count(&article), 0);
        assert_eq!(journal_name(&article), None);
        assert_eq!(author_count(&article), 0);
        assert_eq!(publication_year(&article), None);
    }
}
