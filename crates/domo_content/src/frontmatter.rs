use domo_core::types::FrontMatter;
use domo_core::{Error, Result};

const DELIMITER: &str = "---";

/// Splits a raw document into its YAML front matter and markdown body.
///
/// The document must open with a `---` line; the header runs until the next
/// `---` line and everything after it is the body, returned as written.
pub fn split_document(raw: &str) -> Result<(FrontMatter, String)> {
    let mut lines = raw.lines();
    match lines.next() {
        Some(line) if line.trim_end() == DELIMITER => {}
        _ => return Err(Error::Parse("missing front matter delimiter".to_string())),
    }

    let mut header = String::new();
    let mut body_lines = Vec::new();
    let mut in_header = true;
    for line in lines {
        if in_header {
            if line.trim_end() == DELIMITER {
                in_header = false;
            } else {
                header.push_str(line);
                header.push('\n');
            }
        } else {
            body_lines.push(line);
        }
    }

    if in_header {
        return Err(Error::Parse("unterminated front matter".to_string()));
    }

    let front: FrontMatter = serde_yaml::from_str(&header)
        .map_err(|e| Error::Parse(format!("invalid front matter: {}", e)))?;

    Ok((front, body_lines.join("\n")))
}
