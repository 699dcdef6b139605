//! Splitting a generated composition into a fixed number of paragraphs

use regex::Regex;
use std::sync::OnceLock;

/// Number of paragraphs a composition is normalized to
pub const PARAGRAPH_COUNT: usize = 5;

fn blank_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t\r]*\n").expect("blank line regex must compile"))
}

fn whitespace_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex must compile"))
}

/// Placeholder for a paragraph the composition did not provide (1-based ordinal)
pub fn placeholder_paragraph(ordinal: usize) -> String {
    format!("第{}段内容待补充", ordinal)
}

/// Split `text` on blank lines into exactly five whitespace-normalized paragraphs.
///
/// Paragraphs beyond the fifth are dropped; missing ones are filled with
/// placeholders naming their position.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs: Vec<String> = blank_line_re()
        .split(text)
        .map(|fragment| whitespace_run_re().replace_all(fragment.trim(), " ").into_owned())
        .filter(|fragment| !fragment.is_empty())
        .take(PARAGRAPH_COUNT)
        .collect();

    for ordinal in paragraphs.len() + 1..=PARAGRAPH_COUNT {
        paragraphs.push(placeholder_paragraph(ordinal));
    }

    paragraphs
}
