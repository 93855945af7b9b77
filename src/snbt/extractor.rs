/*!
 * Extraction of translatable strings from description lists.
 *
 * This is deliberately a pattern matcher and not an SNBT parser. A description
 * list ends at the first `]` after its opening bracket, so a list containing a
 * literal `]` will be cut short.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;

/// Regex for a whole description list, non-greedy so consecutive lists are matched separately
pub(crate) static DESCRIPTION_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)description:\s*\[(.*?)\]").expect("Invalid description block regex")
});

/// Regex for a double-quoted literal; any backslash-escaped character may appear inside
pub(crate) static QUOTED_LITERAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)"([^"\\]*(?:\\.[^"\\]*)*)""#).expect("Invalid quoted literal regex")
});

/// A quoted literal found inside a description list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionLiteral {
    /// Index of the enclosing description list, in document order
    pub block_index: usize,
    /// Byte range of the literal including its quotes
    pub span: Range<usize>,
    /// Byte range of the literal content, quotes excluded
    pub content: Range<usize>,
}

/// Find every quoted literal inside every description list of `content`, in document order
pub fn description_literals(content: &str) -> Vec<DescriptionLiteral> {
    let mut literals = Vec::new();

    for (block_index, block) in DESCRIPTION_BLOCK_REGEX.captures_iter(content).enumerate() {
        let Some(inner) = block.get(1) else {
            continue;
        };

        for literal in QUOTED_LITERAL_REGEX.captures_iter(inner.as_str()) {
            let (Some(whole), Some(text)) = (literal.get(0), literal.get(1)) else {
                continue;
            };
            let offset = inner.start();
            literals.push(DescriptionLiteral {
                block_index,
                span: offset + whole.start()..offset + whole.end(),
                content: offset + text.start()..offset + text.end(),
            });
        }
    }

    literals
}

/// Extract the translatable strings of a document.
///
/// Returns the raw literal contents (escape sequences are kept as written) in
/// document order. Blank strings are dropped and duplicates keep their first
/// occurrence.
pub fn extract_descriptions(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    description_literals(content)
        .into_iter()
        .map(|literal| &content[literal.content])
        .filter(|text| !text.trim().is_empty())
        .filter(|text| seen.insert(*text))
        .map(str::to_string)
        .collect()
}
