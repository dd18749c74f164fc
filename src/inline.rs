use std::sync::LazyLock;

use regex::Regex;

use crate::block::Span;

/// Shortest `**...**` run on a line.
static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("strong pattern is valid"));

/// Split text into literal and strong spans, in order.
///
/// Only complete `**...**` pairs become [`Span::Strong`]; a stray or
/// unterminated `**` stays inside the surrounding text. Empty literal
/// segments are dropped, so joining every span (markers removed) gives back
/// the input minus its paired markers.
pub fn parse_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain_start = 0;

    for caps in STRONG_RE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > plain_start {
            spans.push(Span::Text(text[plain_start..whole.start()].to_string()));
        }
        spans.push(Span::Strong(inner.as_str().to_string()));
        plain_start = whole.end();
    }

    if plain_start < text.len() {
        spans.push(Span::Text(text[plain_start..].to_string()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    fn strong(s: &str) -> Span {
        Span::Strong(s.to_string())
    }

    #[test]
    fn empty_input() {
        assert!(parse_spans("").is_empty());
    }

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(parse_spans("no markers here"), vec![text("no markers here")]);
    }

    #[test]
    fn strong_in_the_middle() {
        assert_eq!(
            parse_spans("Some **bold** text"),
            vec![text("Some "), strong("bold"), text(" text")]
        );
    }

    #[test]
    fn adjacent_and_leading_strong() {
        assert_eq!(
            parse_spans("**Debit** and **Credit**"),
            vec![strong("Debit"), text(" and "), strong("Credit")]
        );
    }

    #[test]
    fn matching_is_non_greedy() {
        assert_eq!(
            parse_spans("**a** b **c**"),
            vec![strong("a"), text(" b "), strong("c")]
        );
    }

    #[test]
    fn unterminated_marker_stays_literal() {
        assert_eq!(parse_spans("**open ended"), vec![text("**open ended")]);
        assert_eq!(
            parse_spans("**x** then **y"),
            vec![strong("x"), text(" then **y")]
        );
    }

    #[test]
    fn empty_pair_is_an_empty_strong() {
        assert_eq!(parse_spans("a****b"), vec![text("a"), strong(""), text("b")]);
    }

    #[test]
    fn joined_spans_reproduce_marker_free_text() {
        let line = "Net profit: **₹ 1,20,000** after tax (AS-22)";
        let joined: String = parse_spans(line).iter().map(Span::text).collect();
        assert_eq!(joined, "Net profit: ₹ 1,20,000 after tax (AS-22)");

        let plain = "Working capital = CA - CL";
        let joined: String = parse_spans(plain).iter().map(Span::text).collect();
        assert_eq!(joined, plain);
    }
}
