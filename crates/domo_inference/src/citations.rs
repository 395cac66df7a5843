use domo_core::types::ArticleMetadata;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ARTICLE_MARKER: Regex = Regex::new(r"\[ARTICLE:([^\]]+)\]").unwrap();
}

/// Outcome of scanning generated text for article markers.
#[derive(Debug, Clone)]
pub struct CitationExtract {
    /// The generated text with every marker removed, otherwise untouched.
    pub text: String,
    /// Catalog entries for resolved markers, in order of appearance.
    /// Repeated markers yield repeated entries; unknown slugs yield none.
    pub articles: Vec<ArticleMetadata>,
}

/// Resolves `[ARTICLE:slug]` markers embedded in generated text against the
/// catalog that was used to build the prompt, and strips them from the text.
pub fn extract_citations(raw: &str, catalog: &[ArticleMetadata]) -> CitationExtract {
    let articles = ARTICLE_MARKER
        .captures_iter(raw)
        .filter_map(|cap| {
            let slug = &cap[1];
            catalog.iter().find(|a| a.slug == slug).cloned()
        })
        .collect();

    let text = ARTICLE_MARKER.replace_all(raw, "").into_owned();

    CitationExtract { text, articles }
}
