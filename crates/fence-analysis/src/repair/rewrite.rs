//! Specifier rewriting by byte span. Quotes and everything outside the
//! specifier text stay byte-for-byte.

use super::types::FixEdit;
use crate::parsers::ParsedModule;

/// Apply every edit to `content` (newline-normalized, as parsed).
/// Returns the new text and the number of replaced specifiers.
pub fn apply_edits(content: &str, parsed: &ParsedModule, edits: &[&FixEdit]) -> (String, usize) {
    let mut replacements: Vec<(std::ops::Range<usize>, &str)> = parsed
        .records
        .iter()
        .filter_map(|record| {
            edits
                .iter()
                .find(|e| e.from_specifier == record.specifier)
                .map(|e| (record.span.clone(), e.to_specifier.as_str()))
        })
        .collect();
    replacements.sort_by(|a, b| b.0.start.cmp(&a.0.start));

    let mut out = content.to_string();
    let mut applied = 0;
    for (span, to) in replacements {
        if span.end <= out.len() && out.is_char_boundary(span.start) && out.is_char_boundary(span.end) {
            out.replace_range(span, to);
            applied += 1;
        }
    }
    (out, applied)
}
