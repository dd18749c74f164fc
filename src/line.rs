use std::sync::LazyLock;

use regex::Regex;

/// ASCII digits, a period, then whitespace.
static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s").expect("numbered item pattern is valid"));

/// Classification of a single input line, borrowing from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// The whole raw line; cells are extracted by the table accumulator.
    TableRow(&'a str),
    Heading { level: u8, text: &'a str },
    Bullet(&'a str),
    Numbered { label: &'a str, text: &'a str },
    Blank,
    Paragraph(&'a str),
}

/// Classify one line. Rules are checked in order and the first match wins.
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if trimmed.starts_with('|') {
        return LineKind::TableRow(line);
    }
    if let Some(text) = line.strip_prefix("### ") {
        return LineKind::Heading { level: 3, text };
    }
    if let Some(text) = line.strip_prefix("## ") {
        return LineKind::Heading { level: 2, text };
    }
    // Checked on the fully trimmed line, so a lone "- " stays a paragraph
    if trimmed.starts_with("- ") {
        return LineKind::Bullet(&line.trim_start()["- ".len()..]);
    }
    if NUMBERED_RE.is_match(line) {
        return split_numbered(line);
    }
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    LineKind::Paragraph(line)
}

fn split_numbered(line: &str) -> LineKind<'_> {
    // The label ends at the first space. A tab-separated item has no space
    // after the period, so fall back to the whitespace the pattern matched.
    let (label, text) = match line.split_once(' ') {
        Some(parts) => parts,
        None => {
            let end = line.find(char::is_whitespace).unwrap_or(line.len());
            let ws_len = line[end..].chars().next().map_or(0, char::len_utf8);
            (&line[..end], &line[end + ws_len..])
        }
    };
    LineKind::Numbered { label, text }
}
