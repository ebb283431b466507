//! Quote attribution layout.
//!
//! Chat clients render CJK glyphs roughly twice as wide as Latin ones, so the
//! attribution line is right-aligned under the quote by counting those glyphs
//! as two columns.

/// Widest quote line the attribution is aligned against.
pub const MAX_CONTENT_WIDTH: usize = 36;

const WIDE_RANGES: [(char, char); 4] = [
    ('\u{4e00}', '\u{9fa5}'),
    ('\u{3000}', '\u{30ff}'),
    ('\u{3130}', '\u{318f}'),
    ('\u{ac00}', '\u{d7af}'),
];

fn is_wide(c: char) -> bool {
    WIDE_RANGES
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&c))
}

/// Returns the display width of `text` in columns.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

/// Places `citation` on a second line, right-aligned to the quote.
#[must_use]
pub fn format_citation(content: &str, citation: &str) -> String {
    let spaces = display_width(content)
        .min(MAX_CONTENT_WIDTH)
        .saturating_sub(display_width(citation));
    format!("{content}\n{}{citation}", " ".repeat(spaces))
}

/// Builds the attribution line for a quote taken from `source`.
/// The author is shown only when known and different from the source.
#[must_use]
pub fn attribution(source: &str, author: Option<&str>) -> String {
    match author.filter(|a| !a.is_empty() && *a != source) {
        Some(author) => format!("—— {author}《{source}》"),
        None => format!("——《{source}》"),
    }
}
