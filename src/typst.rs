use crate::config::PdfConfig;
use crate::render::{Grid, Marker, Node, Run};

/// Convert presentation nodes to Typst markup
pub fn nodes_to_typst(nodes: &[Node], config: &PdfConfig, title: Option<&str>) -> String {
    let mut out = String::new();

    emit_preamble(config, &mut out);
    if let Some(title) = title.filter(|_| config.title) {
        emit_title(title, &mut out);
    }

    let mut i = 0;
    while i < nodes.len() {
        let node = &nodes[i];

        match node {
            Node::Heading { level, text } => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_heading(*level, text, &mut out);

                if i + 1 < nodes.len() {
                    i += 1;
                    emit_node(&nodes[i], &mut out);
                    close_list(nodes, i, &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => {
                emit_node(node, &mut out);
                close_list(nodes, i, &mut out);
            }
        }

        i += 1;
    }

    out
}

fn emit_preamble(config: &PdfConfig, out: &mut String) {
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    out.push_str("#set page(paper: ");
    push_string_literal(&config.paper, out);
    if config.page_numbers {
        out.push_str(", numbering: \"1\"");
    }
    out.push_str(")\n\n");
}

fn emit_title(title: &str, out: &mut String) {
    out.push_str("#align(center)[#text(size: 1.4em, weight: \"bold\")[");
    escape_text(title, false, out);
    out.push_str("]]\n\n");
}

fn emit_heading(level: u8, text: &str, out: &mut String) {
    for _ in 0..level {
        out.push('=');
    }
    out.push(' ');
    escape_text(text, false, out);
    out.push('\n');
    out.push('\n');
}

fn emit_node(node: &Node, out: &mut String) {
    match node {
        Node::Heading { level, text } => emit_heading(*level, text, out),
        Node::Paragraph { runs } => {
            runs_to_typst(runs, true, out);
            out.push('\n');
            out.push('\n');
        }
        Node::ListItem {
            marker: Marker::Bullet,
            runs,
        } => {
            out.push_str("- ");
            runs_to_typst(runs, false, out);
            out.push('\n');
        }
        Node::ListItem {
            marker: Marker::Label(label),
            runs,
        } => {
            // The label is printed as given, never renumbered
            out.push_str("#pad(left: 1em)[#strong(");
            push_string_literal(label, out);
            out.push(')');
            if !runs.is_empty() {
                out.push(' ');
                runs_to_typst(runs, false, out);
            }
            out.push_str("]\n\n");
        }
        Node::Table(grid) => {
            // Keep tables together when possible
            out.push_str("#block(breakable: false)[\n");
            table_to_typst(grid, out);
            out.push_str("]\n\n");
        }
    }
}

/// Bullets are written tight; the blank line goes after the last one.
fn close_list(nodes: &[Node], i: usize, out: &mut String) {
    let is_bullet = |node: Option<&Node>| {
        matches!(
            node,
            Some(Node::ListItem {
                marker: Marker::Bullet,
                ..
            })
        )
    };
    if is_bullet(nodes.get(i)) && !is_bullet(nodes.get(i + 1)) {
        out.push('\n');
    }
}

fn runs_to_typst(runs: &[Run], line_start: bool, out: &mut String) {
    let mut at_start = line_start;
    let mut after_call = false;

    for run in runs.iter().filter(|run| !run.text.is_empty()) {
        if run.strong {
            out.push_str("#strong[");
            escape_text(&run.text, true, out);
            out.push(']');
            after_call = true;
        } else {
            // `#strong[..]` followed by `.x` or `(` would extend the call
            if after_call && run.text.starts_with(['.', '(']) {
                out.push('\\');
            }
            escape_text(&run.text, at_start, out);
            after_call = false;
        }
        at_start = false;
    }
}

/// Escape Typst markup characters. At the start of a line, list, enum and
/// heading markers are escaped as well.
fn escape_text(text: &str, line_start: bool, out: &mut String) {
    let mut rest = text;

    if line_start {
        let trimmed = rest.trim_start();
        out.push_str(&rest[..rest.len() - trimmed.len()]);
        rest = trimmed;

        if rest.starts_with(['=', '+', '-', '/']) {
            out.push('\\');
        } else {
            let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits > 0 && rest[digits..].starts_with('.') {
                out.push_str(&rest[..digits]);
                out.push('\\');
                rest = &rest[digits..];
            }
        }
    }

    for ch in rest.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

fn push_string_literal(value: &str, out: &mut String) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

fn table_to_typst(grid: &Grid, out: &mut String) {
    let col_count = grid.columns();
    if col_count == 0 {
        return;
    }

    out.push_str("#table(\n");
    out.push_str(&format!("  columns: {},\n", col_count));

    // Header cells (bold)
    if !grid.header.is_empty() {
        for cell in &grid.header {
            out.push_str("  [*");
            escape_text(cell, false, out);
            out.push_str("*],\n");
        }
        pad_row(grid.header.len(), col_count, out);
    }

    // Data rows, short ones padded at the end
    for row in &grid.rows {
        for cell in row {
            out.push_str("  [");
            escape_text(cell, true, out);
            out.push_str("],\n");
        }
        pad_row(row.len(), col_count, out);
    }

    out.push_str(")\n");
}

fn pad_row(len: usize, col_count: usize, out: &mut String) {
    for _ in len..col_count {
        out.push_str("  [],\n");
    }
}

#[cfg(test)]
mod tests {
    use crate::answer_to_typst;
    use crate::config::PdfConfig;

    const PREAMBLE: &str =
        "#set par(linebreaks: \"optimized\")\n#set page(paper: \"a4\", numbering: \"1\")\n\n";

    fn typst(text: &str) -> String {
        answer_to_typst(text, &PdfConfig::default(), None)
    }

    #[test]
    fn heading() {
        assert_eq!(
            typst("## Hello"),
            format!("{PREAMBLE}#block(breakable: false)[\n== Hello\n\n]\n\n")
        );
    }

    #[test]
    fn heading_with_following_content() {
        let result = typst("### Title\n\nSome text.");
        assert!(result.contains("#block(breakable: false)[\n=== Title\n\nSome text.\n\n]\n\n"));
    }

    #[test]
    fn heading_keeps_literal_stars() {
        let result = typst("## **Answer**");
        assert!(result.contains("== \\*\\*Answer\\*\\*\n"));
    }

    #[test]
    fn paragraph() {
        assert_eq!(typst("Hello world"), format!("{PREAMBLE}Hello world\n\n"));
    }

    #[test]
    fn strong_runs() {
        assert_eq!(
            typst("Some **bold** text"),
            format!("{PREAMBLE}Some #strong[bold] text\n\n")
        );
    }

    #[test]
    fn text_after_strong_cannot_extend_the_call() {
        assert_eq!(
            typst("**Note**.Then (AS-2)"),
            format!("{PREAMBLE}#strong[Note]\\.Then (AS-2)\n\n")
        );
    }

    #[test]
    fn bullets_are_tight() {
        assert_eq!(
            typst("- one\n- **two**\nafter"),
            format!("{PREAMBLE}- one\n- #strong[two]\n\nafter\n\n")
        );
    }

    #[test]
    fn numbered_item_keeps_its_label() {
        assert_eq!(
            typst("3. Keep **this**"),
            format!("{PREAMBLE}#pad(left: 1em)[#strong(\"3.\") Keep \\*\\*this\\*\\*]\n\n")
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(typst("a # b"), format!("{PREAMBLE}a \\# b\n\n"));
        assert_eq!(typst("a_b"), format!("{PREAMBLE}a\\_b\n\n"));
        assert_eq!(typst("5 / 2"), format!("{PREAMBLE}5 \\/ 2\n\n"));
    }

    #[test]
    fn escapes_line_start_markers() {
        assert_eq!(typst("= total"), format!("{PREAMBLE}\\= total\n\n"));
        assert_eq!(typst("+ more"), format!("{PREAMBLE}\\+ more\n\n"));
        assert_eq!(typst("2.Cash"), format!("{PREAMBLE}2\\.Cash\n\n"));
    }

    #[test]
    fn table() {
        let md = "| A | B |\n|---|---|\n| 1 | 2 |";
        let expected = format!(
            "{PREAMBLE}#block(breakable: false)[\n#table(\n  columns: 2,\n  [*A*],\n  [*B*],\n  [1],\n  [2],\n)\n]\n\n"
        );
        assert_eq!(typst(md), expected);
    }

    #[test]
    fn short_rows_are_padded() {
        let md = "| A | B |\n|---|---|\n|  | 2 |";
        let expected = format!(
            "{PREAMBLE}#block(breakable: false)[\n#table(\n  columns: 2,\n  [*A*],\n  [*B*],\n  [2],\n  [],\n)\n]\n\n"
        );
        assert_eq!(typst(md), expected);
    }

    #[test]
    fn title_and_page_settings() {
        let config = PdfConfig {
            paper: "us-letter".to_string(),
            page_numbers: false,
            title: true,
        };
        let result = answer_to_typst("x", &config, Some("Costing: what is #1?"));
        assert!(result.starts_with(
            "#set par(linebreaks: \"optimized\")\n#set page(paper: \"us-letter\")\n\n"
        ));
        assert!(result.contains("#text(size: 1.4em, weight: \"bold\")[Costing: what is \\#1?]"));
    }

    #[test]
    fn title_can_be_disabled() {
        let config = PdfConfig {
            title: false,
            ..PdfConfig::default()
        };
        let result = answer_to_typst("x", &config, Some("Question"));
        assert!(!result.contains("Question"));
    }
}
