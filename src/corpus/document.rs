// src/corpus/document.rs

use crate::utils::error::CorpusError;
use roxmltree::{Document, Node};

// Subtrees that pollute pattern matching and are excluded from any extracted
// text: subscript markup splits numbers apart (e.g. "P<sub>I vs D</sub><0.0001"),
// and tables/captions are full of non-prose numerics.
pub const NOISE_TAGS: &[&str] = &["sub", "table", "caption", "table-wrap", "table-wrap-foot"];

/// One parsed article file. Thin wrapper over the XML tree giving the
/// extractors tag lookup and normalized text extraction. Built and discarded
/// per file; holds no cross-document state.
pub struct Article<'input> {
    doc: Document<'input>,
}

impl<'input> Article<'input> {
    pub fn parse(xml: &'input str) -> Result<Self, CorpusError> {
        let doc = Document::parse(xml).map_err(|e| CorpusError::XmlParse(e.to_string()))?;
        Ok(Self { doc })
    }

    /// All elements with the given tag name, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        self.doc
            .root()
            .descendants()
            .filter(move |n| n.is_element() && n.tag_name().name() == tag)
    }

    /// Section candidates for the classifier: every `<sec>` element that is
    /// not nested inside an `<abstract>`. Abstracts are mined separately and
    /// must not be re-discovered as body sections.
    pub fn sections<'a>(&'a self) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        self.find_all("sec")
            .filter(|n| !n.ancestors().skip(1).any(|a| a.tag_name().name() == "abstract"))
    }

    /// Normalized text of the longest `<abstract>` in the document, if any.
    /// Some papers carry more than one abstract (one being a short precis);
    /// the longest is the real one.
    pub fn abstract_text(&self) -> Option<String> {
        self.find_all("abstract")
            .map(clean_text)
            .max_by_key(|t| t.len())
    }
}

/// Deep text of a node with the noise subtrees skipped and line breaks
/// collapsed. Pure: the tree itself is never modified, so repeated extraction
/// from the same node always yields the same text.
pub fn clean_text(node: Node) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    clarify_text(&out)
}

fn collect_text(node: Node, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            if let Some(text) = child.text() {
                out.push_str(text);
            }
        } else if child.is_element() && !NOISE_TAGS.contains(&child.tag_name().name()) {
            collect_text(child, out);
        }
    }
}

/// Deep text of a node with nothing skipped. Used for short identifier nodes
/// (DOIs, journal ids) where table/sub stripping does not apply.
pub fn raw_text(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Collapse line breaks to spaces. Idempotent.
pub fn clarify_text(text: &str) -> String {
    text.replace('\n', " ").replace('\r', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<article>
        <front><abstract><p>Short.</p></abstract>
        <abstract><p>The longer abstract, with a result (p&lt;.05).</p></abstract></front>
        <body>
            <sec sec-type="results"><title>Results</title>
                <p>Effect was significant
(p = 0.01).</p>
                <table-wrap><table><tr><td>p=0.9</td></tr></table></table-wrap>
                <p>Ratio<sub>a vs b</sub> held.</p>
            </sec>
        </body>
    </article>"#;

    #[test]
    fn clean_text_skips_noise_and_collapses_breaks() {
        let article = Article::parse(SAMPLE).unwrap();
        let sec = article.sections().next().unwrap();
        let text = clean_text(sec);
        assert!(text.contains("(p = 0.01)"), "kept prose: {text}");
        assert!(!text.contains('\n'), "line breaks collapsed");
        assert!(!text.contains("p=0.9"), "table content stripped");
        assert!(!text.contains("a vs b"), "subscript stripped");
        assert!(text.contains("Ratio held."), "text around subscript preserved: {text}");
    }

    #[test]
    fn clarify_text_is_idempotent() {
        let once = clarify_text("a\nb\rc");
        assert_eq!(once, "a b c");
        assert_eq!(clarify_text(&once), once);
    }

    #[test]
    fn abstract_text_prefers_longest() {
        let article = Article::parse(SAMPLE).unwrap();
        let text = article.abstract_text().unwrap();
        assert!(text.contains("longer abstract"));
    }

    #[test]
    fn sections_exclude_abstract_subtrees() {
        let xml = r#"<article>
            <abstract><sec><title>Background</title><p>inside</p></sec></abstract>
            <body><sec><title>Results</title><p>outside</p></sec></body>
        </article>"#;
        let article = Article::parse(xml).unwrap();
        let secs: Vec<_> = article.sections().map(clean_text).collect();
        assert_eq!(secs.len(), 1);
        assert!(secs[0].contains("outside"));
    }

    #[test]
    fn parse_rejects_broken_markup() {
        assert!(Article::parse("<article><unclosed>").is_err());
    }
}
