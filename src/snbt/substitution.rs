/*!
 * Writing translations back into description lists.
 *
 * All records are applied in a single pass over the original text. Each quoted
 * literal inside a description list is compared with the record sources, so a
 * string that has just been replaced is never looked at again by another
 * record, and text outside description lists is never touched.
 */

use std::collections::{HashMap, HashSet};

use log::debug;

use super::extractor::description_literals;
use crate::store::TranslationStore;

/// Result of applying a store to a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionOutcome {
    /// The rewritten document
    pub content: String,
    /// Number of distinct records that replaced at least one literal
    pub substitution_count: usize,
}

impl SubstitutionOutcome {
    /// Whether any literal was replaced
    pub fn changed(&self) -> bool {
        self.substitution_count > 0
    }
}

/// Replace translated strings inside the description lists of `content`.
///
/// A literal is replaced when its raw content equals the source of a record
/// with a non-empty target; matching is literal, so sources containing `.`,
/// `(` or any other pattern syntax only ever match themselves. Within one
/// description list only the first occurrence of a given source is replaced.
pub fn apply_translations(content: &str, store: &TranslationStore) -> SubstitutionOutcome {
    let targets: HashMap<&str, (usize, String)> = store
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_translated())
        .map(|(index, record)| (record.source.as_str(), (index, quote_safe(&record.target))))
        .collect();

    if targets.is_empty() {
        return SubstitutionOutcome {
            content: content.to_string(),
            substitution_count: 0,
        };
    }

    let mut output = String::with_capacity(content.len());
    let mut cursor = 0;
    let mut replaced_in_block: HashSet<(usize, usize)> = HashSet::new();
    let mut substituted_records: HashSet<usize> = HashSet::new();

    for literal in description_literals(content) {
        let text = &content[literal.content.clone()];
        let Some((record_index, target)) = targets.get(text) else {
            continue;
        };
        if !replaced_in_block.insert((literal.block_index, *record_index)) {
            continue;
        }

        output.push_str(&content[cursor..literal.span.start]);
        output.push('"');
        output.push_str(target);
        output.push('"');
        cursor = literal.span.end;

        substituted_records.insert(*record_index);
    }
    output.push_str(&content[cursor..]);

    debug!(
        "Replaced {} literal(s) for {} record(s)",
        replaced_in_block.len(),
        substituted_records.len()
    );

    SubstitutionOutcome {
        content: output,
        substitution_count: substituted_records.len(),
    }
}

/// Make a translation safe to place between double quotes.
///
/// Existing escape sequences are kept, bare quotes are escaped and line breaks
/// become `\n` so the literal stays on its line.
pub fn quote_safe(target: &str) -> String {
    let mut escaped = String::with_capacity(target.len());
    let mut chars = target.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.peek() {
                // A line break is never part of an escape pair
                Some('\n' | '\r') | None => escaped.push_str("\\\\"),
                Some(&next) => {
                    escaped.push('\\');
                    escaped.push(next);
                    chars.next();
                }
            },
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }

    escaped
}
