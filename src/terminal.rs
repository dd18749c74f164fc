use comfy_table::{ContentArrangement, Table};

use crate::config::TerminalConfig;
use crate::render::{Grid, Marker, Node, Run};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Convert presentation nodes to text for a terminal.
///
/// Nodes are separated by a blank line, except between list items.
pub fn nodes_to_terminal(nodes: &[Node], config: &TerminalConfig) -> String {
    let mut out = String::new();

    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            let tight = is_list_item(&nodes[i - 1]) && is_list_item(node);
            if !tight {
                out.push('\n');
            }
        }
        emit_node(node, config, &mut out);
    }

    out
}

fn is_list_item(node: &Node) -> bool {
    matches!(node, Node::ListItem { .. })
}

fn emit_node(node: &Node, config: &TerminalConfig, out: &mut String) {
    match node {
        Node::Heading { level, text } => {
            let underline = if *level <= 2 { '=' } else { '-' };
            push_styled(text, config.color, out);
            out.push('\n');
            out.extend(std::iter::repeat_n(underline, text.chars().count()));
            out.push('\n');
        }
        Node::Paragraph { runs } => {
            runs_to_terminal(runs, config.color, out);
            out.push('\n');
        }
        Node::ListItem { marker, runs } => {
            match marker {
                Marker::Bullet => out.push_str("  • "),
                Marker::Label(label) => {
                    out.push_str("  ");
                    push_styled(label, config.color, out);
                    out.push(' ');
                }
            }
            runs_to_terminal(runs, config.color, out);
            out.push('\n');
        }
        Node::Table(grid) => {
            for line in render_grid(grid, config.width) {
                out.push_str(&line);
                out.push('\n');
            }
        }
    }
}

fn runs_to_terminal(runs: &[Run], color: bool, out: &mut String) {
    for run in runs {
        if run.strong {
            push_styled(&run.text, color, out);
        } else {
            out.push_str(&run.text);
        }
    }
}

fn push_styled(text: &str, color: bool, out: &mut String) {
    if color {
        out.push_str(BOLD);
        out.push_str(text);
        out.push_str(RESET);
    } else {
        out.push_str(text);
    }
}

/// Draw a grid with comfy-table; short rows are left with empty trailing cells.
fn render_grid(grid: &Grid, max_width: u16) -> Vec<String> {
    if grid.columns() == 0 {
        return Vec::new();
    }

    let mut table = Table::new();
    table.set_width(max_width);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if !grid.header.is_empty() {
        table.set_header(&grid.header);
    }
    for row in &grid.rows {
        table.add_row(row);
    }

    table.to_string().lines().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use crate::answer_to_terminal;
    use crate::config::TerminalConfig;

    fn plain(text: &str) -> String {
        let config = TerminalConfig {
            width: 80,
            color: false,
        };
        answer_to_terminal(text, &config)
    }

    #[test]
    fn empty() {
        assert_eq!(plain(""), "");
    }

    #[test]
    fn heading_is_underlined() {
        assert_eq!(plain("## Intro"), "Intro\n=====\n");
        assert_eq!(plain("### Notes"), "Notes\n-----\n");
    }

    #[test]
    fn list_items_stay_together() {
        assert_eq!(
            plain("Steps:\n- **one**\n1. two\nDone"),
            "Steps:\n\n  • one\n  1. two\n\nDone\n"
        );
    }

    #[test]
    fn strong_runs_use_bold_when_colored() {
        let config = TerminalConfig {
            width: 80,
            color: true,
        };
        assert_eq!(
            answer_to_terminal("a **b** c", &config),
            "a \x1b[1mb\x1b[0m c\n"
        );
    }

    #[test]
    fn numbered_text_keeps_markers() {
        assert_eq!(plain("1. a **b**"), "  1. a **b**\n");
    }

    #[test]
    fn rendered_nodes_can_be_reused() {
        let text = "## Ratios\n- **Current** ratio\n| A | B |\n| 1 | 2 |";
        let config = TerminalConfig {
            width: 80,
            color: false,
        };
        let nodes = crate::render(text);
        assert_eq!(
            crate::nodes_to_terminal(&nodes, &config),
            answer_to_terminal(text, &config)
        );
        assert_eq!(
            crate::nodes_to_typst(&nodes, &crate::PdfConfig::default(), None),
            crate::answer_to_typst(text, &crate::PdfConfig::default(), None)
        );
    }

    #[test]
    fn table_is_drawn_as_a_grid() {
        let out = plain("| Item | Cost |\n|---|---|\n| Rent | 500 |\n|  | 20 |");
        assert!(out.contains("Item"));
        assert!(out.contains("Rent"));
        assert!(out.contains("500"));
        assert!(out.contains("20"));
        assert!(out.lines().count() > 3);
    }
}
