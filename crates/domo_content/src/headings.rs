use domo_core::types::Heading;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"(?m)^(#{2,3})\s+(.+)$").unwrap();
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Extracts `##` and `###` headings from a markdown body, in document order.
///
/// Heading ids are the anchor targets used by the table of contents:
/// lowercased text with non-alphanumeric runs collapsed to a single hyphen.
pub fn extract_headings(content: &str) -> Vec<Heading> {
    HEADING
        .captures_iter(content)
        .map(|cap| {
            let text = cap[2].trim().to_string();
            Heading {
                id: slugify(&text),
                text,
                level: cap[1].len() as u8,
            }
        })
        .collect()
}

fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let hyphenated = NON_ALNUM.replace_all(&lowered, "-");
    hyphenated.trim_matches('-').to_string()
}
